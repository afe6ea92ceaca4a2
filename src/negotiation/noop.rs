use crate::negotiation::{
    error::NegotiationError, ports::PromptSourcePort, state::NegotiationSession,
};

/// Fixed-line prompt source for tests and headless callers.
#[derive(Debug, Clone, Default)]
pub struct NoopPromptSource;

impl PromptSourcePort for NoopPromptSource {
    fn next_prompt(&self, _session: &NegotiationSession) -> Result<String, NegotiationError> {
        Ok("Go on.".to_string())
    }
}
