use crate::negotiation::{
    contradiction::ContradictionTracker,
    error::{NegotiationError, invalid_response, session_resolved},
    evaluator::ExchangeEvaluator,
    outcome::OutcomeResolver,
    ports::PromptSourcePort,
    prompts::TablePromptSource,
    state::NegotiationSession,
    trust::SuspicionTrustModel,
    types::{
        DialogueExchange, NegotiationKind, NegotiationTuning, SessionStatus, TurnOutcome,
    },
};

/// Composes the engine per session and drives the turn loop. This is the
/// only mutator of session state; every other component is a pure
/// function of its inputs.
pub struct NegotiationOrchestrator {
    evaluator: ExchangeEvaluator,
    prompt_source: Box<dyn PromptSourcePort>,
    interrogation: NegotiationTuning,
    haggling: NegotiationTuning,
}

impl NegotiationOrchestrator {
    pub fn new(
        evaluator: ExchangeEvaluator,
        prompt_source: Box<dyn PromptSourcePort>,
        interrogation: NegotiationTuning,
        haggling: NegotiationTuning,
    ) -> Self {
        Self {
            evaluator,
            prompt_source,
            interrogation,
            haggling,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            ExchangeEvaluator::with_defaults(),
            Box::new(TablePromptSource),
            NegotiationTuning::interrogation_defaults(),
            NegotiationTuning::haggling_defaults(),
        )
    }

    pub fn tuning_for(&self, kind: NegotiationKind) -> &NegotiationTuning {
        match kind {
            NegotiationKind::Interrogation => &self.interrogation,
            NegotiationKind::Haggling => &self.haggling,
        }
    }

    /// Create a session seeded by the id, with the opening NPC prompt
    /// already pending.
    pub fn open_session(
        &self,
        session_id: impl Into<String>,
        kind: NegotiationKind,
    ) -> NegotiationSession {
        let tuning = self.tuning_for(kind);
        let mut session = NegotiationSession::new(session_id, kind, tuning.turn_budget);
        session.pending_prompt = TablePromptSource::opening_prompt(kind).to_string();
        tracing::info!(
            target: "negotiation",
            session_id = %session.session_id,
            kind = ?kind,
            npc = %session.personality.name,
            trait_label = %session.personality.trait_label,
            base_suspicion = session.personality.base_suspicion,
            turn_budget = session.turn_budget,
            "session_opened"
        );
        session
    }

    /// Apply one player utterance. Validation failures leave the session
    /// untouched and consume no turn; once evaluation starts, the turn is
    /// atomic and runs to completion (external scoring falls back rather
    /// than failing).
    pub async fn advance(
        &self,
        session: &mut NegotiationSession,
        player_response: &str,
    ) -> Result<TurnOutcome, NegotiationError> {
        if let SessionStatus::Resolved(_) = &session.status {
            return Err(session_resolved(format!(
                "session '{}' is already resolved and accepts no further turns",
                session.session_id
            )));
        }

        let tuning = self.tuning_for(session.kind);
        let trimmed = player_response.trim();
        if trimmed.is_empty() {
            return Err(invalid_response("player response is empty"));
        }
        if trimmed.chars().count() > tuning.max_response_chars {
            return Err(invalid_response(format!(
                "player response exceeds {} characters",
                tuning.max_response_chars
            )));
        }

        let evaluated = self.evaluator.evaluate(session, trimmed).await;

        let sequence = session.next_sequence();
        let stamped: Vec<_> = evaluated
            .claims
            .into_iter()
            .map(|draft| draft.stamp(sequence))
            .collect();
        let contradictions =
            ContradictionTracker::check(&session.claims, &stamped, tuning.numeric_tolerance);

        let suspicion = SuspicionTrustModel::update(
            session.suspicion,
            &session.personality,
            &evaluated.scores,
            contradictions.len() as u32,
            evaluated.similarity,
            tuning,
        );
        session.set_suspicion(suspicion);

        session.record_exchange(DialogueExchange {
            sequence,
            npc_prompt: session.pending_prompt.clone(),
            player_response: trimmed.to_string(),
            scores: evaluated.scores,
            contradictions: contradictions.clone(),
            suspicion_after: session.suspicion,
            provider_id: evaluated.provider_id.clone(),
        });
        session.append_claims(stamped);

        if session.kind == NegotiationKind::Haggling
            && session.suspicion <= tuning.provisional_accept_threshold
        {
            if let Some(offer) = session.latest_offer() {
                session.accepted_offer = Some(offer);
            }
        }

        session.turn_budget = session.turn_budget.saturating_sub(1);

        tracing::debug!(
            target: "negotiation",
            session_id = %session.session_id,
            sequence,
            suspicion = session.suspicion,
            contradictions = contradictions.len(),
            provider_id = %evaluated.provider_id,
            latency_ms = evaluated.latency_ms,
            turns_remaining = session.turn_budget,
            "turn_applied"
        );

        if let Some(result) = OutcomeResolver::resolve(session, tuning) {
            session.status = SessionStatus::Resolved(result.clone());
            tracing::info!(
                target: "negotiation",
                session_id = %session.session_id,
                decision = ?result.decision,
                reason = ?result.reason,
                final_suspicion = result.summary.final_suspicion,
                turns_taken = result.summary.turns_taken,
                "session_resolved"
            );
            return Ok(TurnOutcome::Resolved(result));
        }

        let npc_prompt = self.prompt_source.next_prompt(session)?;
        session.pending_prompt = npc_prompt.clone();
        Ok(TurnOutcome::Continue { npc_prompt })
    }
}
