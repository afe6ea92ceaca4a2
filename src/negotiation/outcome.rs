use crate::negotiation::{
    state::NegotiationSession,
    types::{
        Decision, NegotiationKind, NegotiationTuning, OutcomeResult, ScoreSummary, SessionStatus,
        TerminationReason,
    },
};

pub struct OutcomeResolver;

impl OutcomeResolver {
    /// Decide whether the session terminates, reading already-updated
    /// state only. Rules are evaluated in fixed priority order:
    ///
    /// 1. Turn budget exhausted: forced terminal, biased toward denial.
    ///    An interrogation that runs out the clock is denied; a haggling
    ///    session settles at the last provisionally accepted offer, or
    ///    is rejected if none was ever accepted.
    /// 2. Suspicion/firmness at or below the success threshold.
    /// 3. Suspicion at or above the failure threshold, or more
    ///    contradictions in the latest turn than the hard cap allows.
    /// 4. Otherwise the session stays open.
    ///
    /// Pure: resolving the same unchanged session twice yields the same
    /// result, and an already-resolved session returns its stored result.
    pub fn resolve(
        session: &NegotiationSession,
        tuning: &NegotiationTuning,
    ) -> Option<OutcomeResult> {
        if let SessionStatus::Resolved(result) = &session.status {
            return Some(result.clone());
        }

        let summary = Self::summarize(session);

        if session.turn_budget == 0 {
            return Some(Self::forced(session, summary));
        }

        if session.suspicion <= tuning.success_threshold {
            return Some(Self::favorable(session, summary));
        }

        if session.suspicion >= tuning.failure_threshold {
            return Some(Self::unfavorable(
                session,
                summary,
                TerminationReason::SuspicionThresholdExceeded,
            ));
        }
        if session.last_turn_contradictions() > tuning.contradiction_hard_cap {
            return Some(Self::unfavorable(
                session,
                summary,
                TerminationReason::ContradictionOverload,
            ));
        }

        None
    }

    fn summarize(session: &NegotiationSession) -> ScoreSummary {
        ScoreSummary {
            final_suspicion: session.suspicion,
            mean_persuasiveness: session.mean_persuasiveness(),
            turns_taken: session.turns.len() as u32,
            contradiction_count: session.contradiction_total(),
        }
    }

    fn forced(session: &NegotiationSession, summary: ScoreSummary) -> OutcomeResult {
        match session.kind {
            NegotiationKind::Interrogation => OutcomeResult {
                decision: Decision::Denied,
                reason: TerminationReason::TurnBudgetExhausted,
                summary,
                adjustment: FAILED_CLAIM_CREDITS_MODIFIER,
            },
            NegotiationKind::Haggling => match session.accepted_offer {
                Some(offer) => OutcomeResult {
                    decision: Decision::Accepted,
                    reason: TerminationReason::TurnBudgetExhausted,
                    summary,
                    adjustment: offer,
                },
                None => OutcomeResult {
                    decision: Decision::Rejected,
                    reason: TerminationReason::TurnBudgetExhausted,
                    summary,
                    adjustment: 0.0,
                },
            },
        }
    }

    fn favorable(session: &NegotiationSession, summary: ScoreSummary) -> OutcomeResult {
        match session.kind {
            NegotiationKind::Interrogation => {
                // Good negotiation earns a starting-credits bonus.
                let adjustment = 1.0 + 0.5 * f64::from(summary.mean_persuasiveness);
                OutcomeResult {
                    decision: Decision::Granted,
                    reason: TerminationReason::TrustThresholdReached,
                    summary,
                    adjustment,
                }
            }
            NegotiationKind::Haggling => match session.latest_offer() {
                Some(offer) => OutcomeResult {
                    decision: Decision::Accepted,
                    reason: TerminationReason::TrustThresholdReached,
                    summary,
                    adjustment: offer,
                },
                // The trader is ready to deal but no concrete number is
                // on record; the outcome consumer picks the counter.
                None => OutcomeResult {
                    decision: Decision::Countered,
                    reason: TerminationReason::TrustThresholdReached,
                    summary,
                    adjustment: 0.0,
                },
            },
        }
    }

    fn unfavorable(
        session: &NegotiationSession,
        summary: ScoreSummary,
        reason: TerminationReason,
    ) -> OutcomeResult {
        match session.kind {
            NegotiationKind::Interrogation => OutcomeResult {
                decision: Decision::Denied,
                reason,
                summary,
                adjustment: FAILED_CLAIM_CREDITS_MODIFIER,
            },
            NegotiationKind::Haggling => OutcomeResult {
                decision: Decision::Rejected,
                reason,
                summary,
                adjustment: 0.0,
            },
        }
    }
}

/// Starting-credits penalty applied when a ship claim fails.
const FAILED_CLAIM_CREDITS_MODIFIER: f64 = 0.5;
