use serde::{Deserialize, Serialize};

use crate::negotiation::{
    personality::PersonalityGenerator,
    types::{
        Claim, ClaimValue, DialogueExchange, NegotiationKind, NpcPersonality, OFFERED_PRICE_SLOT,
        SessionId, SessionStatus, TurnSequence, clamp_unit,
    },
};

/// The unit of state for one conversation. Owned by exactly one caller at
/// a time; `advance` calls for a given session must be serialized by
/// whoever owns session storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationSession {
    pub session_id: SessionId,
    pub kind: NegotiationKind,
    pub personality: NpcPersonality,
    pub turns: Vec<DialogueExchange>,
    /// Suspicion (interrogation) or firmness (haggling), always in [0,1].
    /// Low is favorable for both kinds.
    pub suspicion: f32,
    pub claims: Vec<Claim>,
    /// Haggling only: the player offer most recently marked provisionally
    /// accepted. Budget exhaustion settles here.
    #[serde(default)]
    pub accepted_offer: Option<f64>,
    pub status: SessionStatus,
    /// Turns remaining; the session is forced terminal at 0.
    pub turn_budget: u32,
    /// The prompt the player is currently answering.
    #[serde(default)]
    pub pending_prompt: String,
}

impl NegotiationSession {
    pub fn new(session_id: impl Into<SessionId>, kind: NegotiationKind, turn_budget: u32) -> Self {
        let session_id = session_id.into();
        let personality = PersonalityGenerator::generate(&session_id, kind);
        let suspicion = personality.base_suspicion;
        Self {
            session_id,
            kind,
            personality,
            turns: Vec::new(),
            suspicion,
            claims: Vec::new(),
            accepted_offer: None,
            status: SessionStatus::Open,
            turn_budget,
            pending_prompt: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Sequence for the next exchange; 1-based, unique within the session.
    pub fn next_sequence(&self) -> TurnSequence {
        self.turns.len() as TurnSequence + 1
    }

    pub fn record_exchange(&mut self, mut exchange: DialogueExchange) {
        exchange.scores = exchange.scores.clamped();
        exchange.suspicion_after = clamp_unit(exchange.suspicion_after);
        self.turns.push(exchange);
    }

    /// Claims are append-only within a session.
    pub fn append_claims(&mut self, claims: Vec<Claim>) {
        self.claims.extend(claims);
    }

    pub fn set_suspicion(&mut self, value: f32) {
        self.suspicion = clamp_unit(value);
    }

    /// The most recent numeric price offer on record, if any.
    pub fn latest_offer(&self) -> Option<f64> {
        self.claims.iter().rev().find_map(|claim| {
            if claim.slot != OFFERED_PRICE_SLOT {
                return None;
            }
            match claim.value {
                ClaimValue::Numeric { value } => Some(value),
                ClaimValue::Categorical { .. } => None,
            }
        })
    }

    pub fn contradiction_total(&self) -> u32 {
        self.turns
            .iter()
            .map(|turn| turn.contradictions.len() as u32)
            .sum()
    }

    pub fn last_turn_contradictions(&self) -> u32 {
        self.turns
            .last()
            .map(|turn| turn.contradictions.len() as u32)
            .unwrap_or(0)
    }

    pub fn mean_persuasiveness(&self) -> f32 {
        if self.turns.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .turns
            .iter()
            .map(|turn| turn.scores.persuasiveness)
            .sum();
        sum / self.turns.len() as f32
    }
}
