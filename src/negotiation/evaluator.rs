use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::negotiation::{
    heuristic::{HEURISTIC_PROVIDER_ID, HeuristicScoreProvider},
    ports::{ScoreProviderPort, ScoreRequest},
    state::NegotiationSession,
    telemetry::{JudgeTelemetryEvent, NoopTelemetrySink, TelemetrySink},
    types::EvaluatedExchange,
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Scores one exchange through an ordered provider chain. Providers are
/// tried in priority order under a per-call timeout; unavailable or
/// failing providers are skipped with a warning. The built-in heuristic
/// terminates the chain, so evaluation is infallible and the negotiation
/// can always proceed.
pub struct ExchangeEvaluator {
    providers: Vec<Arc<dyn ScoreProviderPort>>,
    fallback: HeuristicScoreProvider,
    timeout: Duration,
    telemetry: Arc<dyn TelemetrySink>,
}

impl ExchangeEvaluator {
    pub fn new(
        providers: Vec<Arc<dyn ScoreProviderPort>>,
        timeout: Duration,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            providers,
            fallback: HeuristicScoreProvider,
            timeout,
            telemetry,
        }
    }

    /// Offline evaluator: no external providers, heuristic scoring only.
    pub fn with_defaults() -> Self {
        Self::new(
            Vec::new(),
            DEFAULT_REQUEST_TIMEOUT,
            Arc::new(NoopTelemetrySink),
        )
    }

    /// Pure transformation from (session snapshot, new input) to a scored
    /// exchange; never mutates the session, never errors.
    pub async fn evaluate(
        &self,
        session: &NegotiationSession,
        player_response: &str,
    ) -> EvaluatedExchange {
        let request = ScoreRequest {
            session_id: &session.session_id,
            kind: session.kind,
            personality: &session.personality,
            history: &session.turns,
            prior_claims: &session.claims,
            player_response,
        };

        for provider in &self.providers {
            if !provider.is_available() {
                tracing::debug!(
                    target: "judge",
                    provider_id = %provider.provider_id(),
                    "provider_unavailable"
                );
                continue;
            }

            self.telemetry.on_event(JudgeTelemetryEvent::ScoreRequested {
                session_id: session.session_id.clone(),
                provider_id: provider.provider_id().to_string(),
            });

            let started_at = Instant::now();
            match tokio::time::timeout(self.timeout, provider.score(request.clone())).await {
                Ok(Ok(report)) => {
                    let latency_ms = started_at.elapsed().as_millis() as u64;
                    self.telemetry.on_event(JudgeTelemetryEvent::ScoreSucceeded {
                        session_id: session.session_id.clone(),
                        provider_id: provider.provider_id().to_string(),
                        latency_ms,
                    });
                    return EvaluatedExchange {
                        scores: report.scores.clamped(),
                        claims: report.claims,
                        similarity: report.similarity,
                        provider_id: provider.provider_id().to_string(),
                        latency_ms,
                    };
                }
                Ok(Err(err)) => {
                    self.telemetry.on_event(JudgeTelemetryEvent::ScoreFailed {
                        session_id: session.session_id.clone(),
                        provider_id: provider.provider_id().to_string(),
                        latency_ms: started_at.elapsed().as_millis() as u64,
                        message: err.to_string(),
                    });
                }
                Err(_elapsed) => {
                    self.telemetry.on_event(JudgeTelemetryEvent::ScoreFailed {
                        session_id: session.session_id.clone(),
                        provider_id: provider.provider_id().to_string(),
                        latency_ms: self.timeout.as_millis() as u64,
                        message: "score request timed out".to_string(),
                    });
                }
            }
        }

        self.telemetry.on_event(JudgeTelemetryEvent::FallbackEngaged {
            session_id: session.session_id.clone(),
            provider_id: HEURISTIC_PROVIDER_ID.to_string(),
        });
        let started_at = Instant::now();
        let report = self.fallback.score_now(&request);
        EvaluatedExchange {
            scores: report.scores.clamped(),
            claims: report.claims,
            similarity: report.similarity,
            provider_id: HEURISTIC_PROVIDER_ID.to_string(),
            latency_ms: started_at.elapsed().as_millis() as u64,
        }
    }
}
