use std::{collections::HashMap, sync::Mutex};

use crate::negotiation::{
    error::{NegotiationError, store_failure},
    ports::SessionStorePort,
    state::NegotiationSession,
};

/// Map-backed session store for tests and the demo binary. The mutex
/// serializes snapshot access; callers still own the one-advance-at-a-time
/// rule for any given session.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, NegotiationSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorePort for InMemorySessionStore {
    fn load(&self, session_id: &str) -> Result<Option<NegotiationSession>, NegotiationError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| store_failure("session store mutex poisoned"))?;
        Ok(sessions.get(session_id).cloned())
    }

    fn save(&self, session: &NegotiationSession) -> Result<(), NegotiationError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| store_failure("session store mutex poisoned"))?;
        sessions.insert(session.session_id.clone(), session.clone());
        Ok(())
    }
}
