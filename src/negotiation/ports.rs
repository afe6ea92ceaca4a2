use async_trait::async_trait;

use crate::negotiation::{
    error::NegotiationError,
    state::NegotiationSession,
    types::{Claim, DialogueExchange, NegotiationKind, NpcPersonality, ScoreReport},
};

/// Everything a scoring provider sees for one exchange: a read-only
/// snapshot plus the new player input. Providers never mutate sessions.
#[derive(Debug, Clone)]
pub struct ScoreRequest<'a> {
    pub session_id: &'a str,
    pub kind: NegotiationKind,
    pub personality: &'a NpcPersonality,
    pub history: &'a [DialogueExchange],
    pub prior_claims: &'a [Claim],
    pub player_response: &'a str,
}

/// External judge contract. Implementations must return every score axis
/// in [0,1]; the evaluator clamps defensively and substitutes a
/// deterministic fallback when the whole chain fails.
#[async_trait]
pub trait ScoreProviderPort: Send + Sync {
    fn provider_id(&self) -> &str;

    fn is_available(&self) -> bool {
        true
    }

    async fn score(&self, request: ScoreRequest<'_>) -> Result<ScoreReport, NegotiationError>;
}

/// Supplies the next NPC line when a session stays open. Content
/// selection only; never engine logic.
pub trait PromptSourcePort: Send + Sync {
    fn next_prompt(&self, session: &NegotiationSession) -> Result<String, NegotiationError>;
}

/// Session snapshot persistence. The engine defines the shape, not the
/// technology; implementations own per-session write serialization.
pub trait SessionStorePort: Send + Sync {
    fn load(&self, session_id: &str) -> Result<Option<NegotiationSession>, NegotiationError>;
    fn save(&self, session: &NegotiationSession) -> Result<(), NegotiationError>;
}
