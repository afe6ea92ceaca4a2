#[derive(Debug, Clone)]
pub enum JudgeTelemetryEvent {
    ScoreRequested {
        session_id: String,
        provider_id: String,
    },
    ScoreSucceeded {
        session_id: String,
        provider_id: String,
        latency_ms: u64,
    },
    ScoreFailed {
        session_id: String,
        provider_id: String,
        latency_ms: u64,
        message: String,
    },
    FallbackEngaged {
        session_id: String,
        provider_id: String,
    },
}

pub trait TelemetrySink: Send + Sync {
    fn on_event(&self, event: JudgeTelemetryEvent);
}

#[derive(Default)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn on_event(&self, _event: JudgeTelemetryEvent) {}
}

/// Forwards judge telemetry into the tracing pipeline. The engine logs
/// provider identity and latency; it never interprets them.
#[derive(Default)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn on_event(&self, event: JudgeTelemetryEvent) {
        match event {
            JudgeTelemetryEvent::ScoreRequested {
                session_id,
                provider_id,
            } => {
                tracing::debug!(
                    target: "judge",
                    session_id = %session_id,
                    provider_id = %provider_id,
                    "score_requested"
                );
            }
            JudgeTelemetryEvent::ScoreSucceeded {
                session_id,
                provider_id,
                latency_ms,
            } => {
                tracing::info!(
                    target: "judge",
                    session_id = %session_id,
                    provider_id = %provider_id,
                    latency_ms,
                    "score_succeeded"
                );
            }
            JudgeTelemetryEvent::ScoreFailed {
                session_id,
                provider_id,
                latency_ms,
                message,
            } => {
                tracing::warn!(
                    target: "judge",
                    session_id = %session_id,
                    provider_id = %provider_id,
                    latency_ms,
                    message = %message,
                    "score_failed"
                );
            }
            JudgeTelemetryEvent::FallbackEngaged {
                session_id,
                provider_id,
            } => {
                tracing::warn!(
                    target: "judge",
                    session_id = %session_id,
                    provider_id = %provider_id,
                    "fallback_engaged"
                );
            }
        }
    }
}
