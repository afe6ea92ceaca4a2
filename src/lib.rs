// Negotiation engine library; the binary composes it with configured judges.
pub mod cli;
pub mod config;
pub mod logging;
pub mod negotiation;
