pub mod adapters;
pub mod contradiction;
pub mod error;
pub mod evaluator;
pub mod heuristic;
pub mod noop;
pub mod orchestrator;
pub mod outcome;
pub mod personality;
pub mod ports;
pub mod prompts;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod trust;
pub mod types;

pub use contradiction::ContradictionTracker;
pub use error::{NegotiationError, NegotiationErrorKind};
pub use evaluator::ExchangeEvaluator;
pub use heuristic::{HEURISTIC_PROVIDER_ID, HeuristicScoreProvider};
pub use noop::NoopPromptSource;
pub use orchestrator::NegotiationOrchestrator;
pub use outcome::OutcomeResolver;
pub use personality::PersonalityGenerator;
pub use ports::{PromptSourcePort, ScoreProviderPort, ScoreRequest, SessionStorePort};
pub use prompts::TablePromptSource;
pub use state::NegotiationSession;
pub use store::InMemorySessionStore;
pub use telemetry::{JudgeTelemetryEvent, NoopTelemetrySink, TelemetrySink, TracingTelemetrySink};
pub use trust::SuspicionTrustModel;
pub use types::{
    Claim, ClaimDraft, ClaimValue, Contradiction, Decision, DialogueExchange, EvaluatedExchange,
    ExchangeScores, NegotiationKind, NegotiationTuning, NpcPersonality, OFFERED_PRICE_SLOT,
    OutcomeResult, ScoreReport, ScoreSummary, SessionStatus, TerminationReason, TurnOutcome,
};
