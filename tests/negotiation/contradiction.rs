use parley::negotiation::{ContradictionTracker, OFFERED_PRICE_SLOT};

use super::{categorical_claim, numeric_claim};

const TOLERANCE: f64 = 0.01;

#[test]
fn given_repeated_identical_claim_when_checked_then_no_contradiction() {
    let existing = vec![categorical_claim("claimed-ship-type", "Scout Ship").stamp(1)];
    let incoming = vec![categorical_claim("claimed-ship-type", "scout ship").stamp(2)];

    let found = ContradictionTracker::check(&existing, &incoming, TOLERANCE);
    assert!(found.is_empty(), "repeats must never be flagged");
}

#[test]
fn given_numeric_claims_within_tolerance_when_checked_then_no_contradiction() {
    let existing = vec![numeric_claim(OFFERED_PRICE_SLOT, 100.0).stamp(1)];
    let incoming = vec![numeric_claim(OFFERED_PRICE_SLOT, 100.005).stamp(2)];

    let found = ContradictionTracker::check(&existing, &incoming, TOLERANCE);
    assert!(found.is_empty());
}

#[test]
fn given_numeric_claims_beyond_tolerance_when_checked_then_flagged_in_both_orders() {
    let low = vec![numeric_claim(OFFERED_PRICE_SLOT, 100.0).stamp(1)];
    let high = vec![numeric_claim(OFFERED_PRICE_SLOT, 150.0).stamp(2)];

    let forward = ContradictionTracker::check(&low, &high, TOLERANCE);
    assert_eq!(forward.len(), 1);
    assert_eq!(forward[0].slot, OFFERED_PRICE_SLOT);
    assert_eq!(forward[0].prior_turn, 1);
    assert_eq!(forward[0].new_turn, 2);

    let reverse = ContradictionTracker::check(&high, &low, TOLERANCE);
    assert_eq!(reverse.len(), 1, "detection must not depend on turn order");
}

#[test]
fn given_conflicting_categorical_claims_when_checked_then_flagged() {
    let existing = vec![categorical_claim("claimed-identity", "Reyes").stamp(1)];
    let incoming = vec![categorical_claim("claimed-identity", "Vale").stamp(3)];

    let found = ContradictionTracker::check(&existing, &incoming, TOLERANCE);
    assert_eq!(found.len(), 1);
}

#[test]
fn given_claims_in_different_slots_when_checked_then_no_contradiction() {
    let existing = vec![categorical_claim("claimed-identity", "Reyes").stamp(1)];
    let incoming = vec![categorical_claim("claimed-ship-type", "scout ship").stamp(2)];

    let found = ContradictionTracker::check(&existing, &incoming, TOLERANCE);
    assert!(found.is_empty());
}

#[test]
fn given_conflicting_claims_in_same_batch_when_checked_then_flagged() {
    let incoming = vec![
        categorical_claim("claimed-ship-type", "scout ship").stamp(1),
        categorical_claim("claimed-ship-type", "cargo freighter").stamp(1),
    ];

    let found = ContradictionTracker::check(&[], &incoming, TOLERANCE);
    assert_eq!(found.len(), 1, "same-turn conflicts must be caught");
}
