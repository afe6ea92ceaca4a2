use parley::negotiation::{
    Decision, NegotiationKind, NegotiationSession, NegotiationTuning, OFFERED_PRICE_SLOT,
    OutcomeResolver, TerminationReason,
};

use super::{categorical_claim, exchange, numeric_claim, scores};

fn open_session(kind: NegotiationKind, turn_budget: u32, suspicion: f32) -> NegotiationSession {
    let mut session = NegotiationSession::new("outcome-case", kind, turn_budget);
    session.suspicion = suspicion;
    session
}

#[test]
fn given_mid_suspicion_and_budget_left_when_resolved_then_session_stays_open() {
    let tuning = NegotiationTuning::interrogation_defaults();
    let session = open_session(NegotiationKind::Interrogation, 3, 0.5);

    assert_eq!(OutcomeResolver::resolve(&session, &tuning), None);
}

#[test]
fn given_suspicion_below_success_threshold_when_resolved_then_ship_granted_with_bonus() {
    let tuning = NegotiationTuning::interrogation_defaults();
    let mut session = open_session(NegotiationKind::Interrogation, 3, 0.2);
    session.record_exchange(exchange(1, scores(0.8, 0.7, 0.9, 0.9), Vec::new(), 0.2));

    let result = OutcomeResolver::resolve(&session, &tuning).expect("session should resolve");
    assert_eq!(result.decision, Decision::Granted);
    assert_eq!(result.reason, TerminationReason::TrustThresholdReached);
    assert!(
        (result.adjustment - 1.4).abs() < 1e-6,
        "good negotiation earns a credits bonus, got {}",
        result.adjustment
    );
}

#[test]
fn given_suspicion_above_failure_threshold_when_resolved_then_denied() {
    let tuning = NegotiationTuning::interrogation_defaults();
    let session = open_session(NegotiationKind::Interrogation, 3, 0.9);

    let result = OutcomeResolver::resolve(&session, &tuning).expect("session should resolve");
    assert_eq!(result.decision, Decision::Denied);
    assert_eq!(result.reason, TerminationReason::SuspicionThresholdExceeded);
    assert!((result.adjustment - 0.5).abs() < 1e-9);
}

#[test]
fn given_contradiction_overload_in_latest_turn_when_resolved_then_denied_immediately() {
    let tuning = NegotiationTuning::interrogation_defaults();
    let mut session = open_session(NegotiationKind::Interrogation, 4, 0.5);
    let contradictions = parley::negotiation::ContradictionTracker::check(
        &[
            categorical_claim("claimed-identity", "reyes").stamp(1),
            categorical_claim("claimed-ship-type", "scout ship").stamp(1),
            categorical_claim("claimed-registration", "tx-100").stamp(1),
        ],
        &[
            categorical_claim("claimed-identity", "vale").stamp(2),
            categorical_claim("claimed-ship-type", "cargo freighter").stamp(2),
            categorical_claim("claimed-registration", "tx-200").stamp(2),
        ],
        tuning.numeric_tolerance,
    );
    assert_eq!(contradictions.len(), 3);
    session.record_exchange(exchange(1, scores(0.5, 0.5, 0.5, 0.5), contradictions, 0.5));

    let result = OutcomeResolver::resolve(&session, &tuning).expect("session should resolve");
    assert_eq!(result.decision, Decision::Denied);
    assert_eq!(result.reason, TerminationReason::ContradictionOverload);
}

#[test]
fn given_exhausted_budget_when_resolved_then_denial_wins_even_over_low_suspicion() {
    let tuning = NegotiationTuning::interrogation_defaults();
    let session = open_session(NegotiationKind::Interrogation, 0, 0.1);

    let result = OutcomeResolver::resolve(&session, &tuning).expect("session should resolve");
    assert_eq!(result.decision, Decision::Denied);
    assert_eq!(result.reason, TerminationReason::TurnBudgetExhausted);
}

#[test]
fn given_unchanged_session_when_resolved_twice_then_results_are_identical() {
    let tuning = NegotiationTuning::interrogation_defaults();
    let mut session = open_session(NegotiationKind::Interrogation, 0, 0.6);
    session.record_exchange(exchange(1, scores(0.4, 0.4, 0.6, 0.5), Vec::new(), 0.6));

    let first = OutcomeResolver::resolve(&session, &tuning);
    let second = OutcomeResolver::resolve(&session, &tuning);
    assert_eq!(first, second);
}

#[test]
fn given_haggling_budget_exhausted_with_accepted_offer_then_settles_at_that_offer() {
    let tuning = NegotiationTuning::haggling_defaults();
    let mut session = open_session(NegotiationKind::Haggling, 0, 0.6);
    session.accepted_offer = Some(120.0);

    let result = OutcomeResolver::resolve(&session, &tuning).expect("session should resolve");
    assert_eq!(result.decision, Decision::Accepted);
    assert_eq!(result.reason, TerminationReason::TurnBudgetExhausted);
    assert_eq!(result.adjustment, 120.0);
}

#[test]
fn given_haggling_budget_exhausted_without_accepted_offer_then_rejected() {
    let tuning = NegotiationTuning::haggling_defaults();
    let session = open_session(NegotiationKind::Haggling, 0, 0.6);

    let result = OutcomeResolver::resolve(&session, &tuning).expect("session should resolve");
    assert_eq!(result.decision, Decision::Rejected);
    assert_eq!(result.reason, TerminationReason::TurnBudgetExhausted);
}

#[test]
fn given_haggling_success_with_offer_on_record_then_accepted_at_latest_offer() {
    let tuning = NegotiationTuning::haggling_defaults();
    let mut session = open_session(NegotiationKind::Haggling, 3, 0.2);
    session.append_claims(vec![
        numeric_claim(OFFERED_PRICE_SLOT, 100.0).stamp(1),
        numeric_claim(OFFERED_PRICE_SLOT, 140.0).stamp(2),
    ]);

    let result = OutcomeResolver::resolve(&session, &tuning).expect("session should resolve");
    assert_eq!(result.decision, Decision::Accepted);
    assert_eq!(result.reason, TerminationReason::TrustThresholdReached);
    assert_eq!(result.adjustment, 140.0, "the most recent offer settles");
}

#[test]
fn given_haggling_success_without_any_offer_then_countered() {
    let tuning = NegotiationTuning::haggling_defaults();
    let session = open_session(NegotiationKind::Haggling, 3, 0.2);

    let result = OutcomeResolver::resolve(&session, &tuning).expect("session should resolve");
    assert_eq!(result.decision, Decision::Countered);
    assert_eq!(result.reason, TerminationReason::TrustThresholdReached);
}
