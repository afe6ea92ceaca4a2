use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationErrorKind {
    InvalidResponse,
    SessionResolved,
    ProviderFailure,
    StoreFailure,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationError {
    pub kind: NegotiationErrorKind,
    pub message: String,
}

impl NegotiationError {
    pub fn new(kind: NegotiationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for NegotiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NegotiationError {}

pub fn invalid_response(message: impl Into<String>) -> NegotiationError {
    NegotiationError::new(NegotiationErrorKind::InvalidResponse, message)
}

pub fn session_resolved(message: impl Into<String>) -> NegotiationError {
    NegotiationError::new(NegotiationErrorKind::SessionResolved, message)
}

pub fn provider_failure(message: impl Into<String>) -> NegotiationError {
    NegotiationError::new(NegotiationErrorKind::ProviderFailure, message)
}

pub fn store_failure(message: impl Into<String>) -> NegotiationError {
    NegotiationError::new(NegotiationErrorKind::StoreFailure, message)
}

pub fn internal_error(message: impl Into<String>) -> NegotiationError {
    NegotiationError::new(NegotiationErrorKind::Internal, message)
}
