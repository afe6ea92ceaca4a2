use crate::negotiation::types::{Claim, Contradiction};

pub struct ContradictionTracker;

impl ContradictionTracker {
    /// Compare incoming claims against the full history and against
    /// earlier claims in the same batch. A repeated claim with an
    /// identical normalized value is never a contradiction.
    ///
    /// Stateless: the caller appends both the incoming claims and the
    /// returned contradictions to session state.
    pub fn check(
        existing: &[Claim],
        incoming: &[Claim],
        numeric_tolerance: f64,
    ) -> Vec<Contradiction> {
        let mut found = Vec::new();
        for (index, new_claim) in incoming.iter().enumerate() {
            let earlier_in_batch = &incoming[..index];
            for prior in existing.iter().chain(earlier_in_batch) {
                if prior.slot != new_claim.slot {
                    continue;
                }
                if prior
                    .value
                    .conflicts_with(&new_claim.value, numeric_tolerance)
                {
                    found.push(Contradiction {
                        slot: new_claim.slot.clone(),
                        prior_turn: prior.turn_sequence,
                        new_turn: new_claim.turn_sequence,
                        prior_value: prior.value.clone(),
                        new_value: new_claim.value.clone(),
                    });
                }
            }
        }
        found
    }
}
