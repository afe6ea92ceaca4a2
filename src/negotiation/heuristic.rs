use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::negotiation::{
    error::NegotiationError,
    ports::{ScoreProviderPort, ScoreRequest},
    types::{
        ClaimDraft, ClaimValue, ExchangeScores, NegotiationKind, OFFERED_PRICE_SLOT, ScoreReport,
        clamp_unit,
    },
};

pub const HEURISTIC_PROVIDER_ID: &str = "heuristic";

const CONFIDENT_WORDS: [&str; 8] = [
    "absolutely",
    "definitely",
    "certainly",
    "of course",
    "without a doubt",
    "obviously",
    "clearly",
    "indeed",
];

const HESITANT_WORDS: [&str; 7] = [
    "maybe",
    "perhaps",
    "possibly",
    "might",
    "i think",
    "i guess",
    "not sure",
];

const DETAIL_KEYWORDS: [&str; 15] = [
    "serial",
    "number",
    "code",
    "registration",
    "license",
    "captain",
    "commander",
    "officer",
    "station",
    "sector",
    "authorization",
    "clearance",
    "manifest",
    "cargo",
    "duty",
];

const TACTIC_KEYWORDS: [&str; 6] = [
    "understand",
    "appreciate",
    "respect",
    "protocol",
    "procedure",
    "regulation",
];

const SHIP_TYPES: [&str; 7] = [
    "escape pod",
    "scout ship",
    "cargo freighter",
    "light freighter",
    "mining vessel",
    "patrol craft",
    "luxury yacht",
];

fn identity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(?:my name is|i am|i'm|captain|commander)\s+([a-z][a-z'\-]+)")
            .expect("identity pattern must compile")
    })
}

fn registration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b([A-Z]{2,4}-\d{2,6})\b").expect("registration pattern must compile")
    })
}

fn offer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(?:credits|creds|cr)\b")
            .expect("offer pattern must compile")
    })
}

/// Rule-based judge: always available, fully deterministic, the terminal
/// entry of every provider chain. Also serves as the offline demo judge.
#[derive(Debug, Clone, Default)]
pub struct HeuristicScoreProvider;

impl HeuristicScoreProvider {
    /// Synchronous scoring path; infallible by construction so the
    /// evaluator can always substitute it for a failed chain.
    pub fn score_now(&self, request: &ScoreRequest<'_>) -> ScoreReport {
        let response = request.player_response;
        let lower = response.to_lowercase();
        let word_count = response.split_whitespace().count();

        let confidence = Self::confidence(&lower, word_count);
        let persuasiveness = Self::persuasiveness(&lower, word_count);
        let consistency = Self::consistency(request);
        let believability =
            clamp_unit(0.4 * persuasiveness + 0.3 * confidence + 0.3 * consistency);

        ScoreReport {
            scores: ExchangeScores {
                persuasiveness,
                confidence,
                consistency,
                believability,
            },
            claims: Self::extract_claims(request.kind, response, &lower),
            similarity: None,
        }
    }

    fn confidence(lower: &str, word_count: usize) -> f32 {
        // Longer answers read as more confident, up to a point.
        let mut confidence = (word_count as f32 / 20.0).min(1.0);
        for word in CONFIDENT_WORDS {
            if lower.contains(word) {
                confidence += 0.1;
            }
        }
        for word in HESITANT_WORDS {
            if lower.contains(word) {
                confidence -= 0.15;
            }
        }
        clamp_unit(confidence)
    }

    fn persuasiveness(lower: &str, word_count: usize) -> f32 {
        let base = match word_count {
            0..=2 => 0.2,
            3..=9 => 0.4,
            10..=24 => 0.6,
            _ => 0.7,
        };

        let detail_count = DETAIL_KEYWORDS
            .iter()
            .filter(|keyword| lower.contains(*keyword))
            .count();
        let detail_bonus = (detail_count as f32 * 0.03).min(0.2);

        let tactic_count = TACTIC_KEYWORDS
            .iter()
            .filter(|keyword| lower.contains(*keyword))
            .count();
        let tactic_bonus = (tactic_count as f32 * 0.05).min(0.1);

        clamp_unit(base + detail_bonus + tactic_bonus)
    }

    /// Prior contradictions drag consistency down, floored so a rough
    /// start can still be talked around.
    fn consistency(request: &ScoreRequest<'_>) -> f32 {
        let prior_contradictions: usize = request
            .history
            .iter()
            .map(|turn| turn.contradictions.len())
            .sum();
        (1.0 - prior_contradictions as f32 * 0.2).max(0.3)
    }

    fn extract_claims(kind: NegotiationKind, response: &str, lower: &str) -> Vec<ClaimDraft> {
        let mut claims = Vec::new();

        for capture in identity_pattern().captures_iter(response) {
            if let Some(name) = capture.get(1) {
                claims.push(ClaimDraft {
                    slot: "claimed-identity".to_string(),
                    value: ClaimValue::categorical(name.as_str()),
                    text: name.as_str().to_string(),
                });
                break;
            }
        }

        for capture in registration_pattern().captures_iter(response) {
            if let Some(code) = capture.get(1) {
                claims.push(ClaimDraft {
                    slot: "claimed-registration".to_string(),
                    value: ClaimValue::categorical(code.as_str()),
                    text: code.as_str().to_string(),
                });
                break;
            }
        }

        for ship in SHIP_TYPES {
            if lower.contains(ship) {
                claims.push(ClaimDraft {
                    slot: "claimed-ship-type".to_string(),
                    value: ClaimValue::categorical(ship),
                    text: ship.to_string(),
                });
                break;
            }
        }

        if kind == NegotiationKind::Haggling {
            for capture in offer_pattern().captures_iter(response) {
                if let Some(amount) = capture.get(1) {
                    if let Ok(value) = amount.as_str().parse::<f64>() {
                        claims.push(ClaimDraft {
                            slot: OFFERED_PRICE_SLOT.to_string(),
                            value: ClaimValue::numeric(value),
                            text: amount.as_str().to_string(),
                        });
                        break;
                    }
                }
            }
        }

        claims
    }
}

#[async_trait]
impl ScoreProviderPort for HeuristicScoreProvider {
    fn provider_id(&self) -> &str {
        HEURISTIC_PROVIDER_ID
    }

    async fn score(&self, request: ScoreRequest<'_>) -> Result<ScoreReport, NegotiationError> {
        Ok(self.score_now(&request))
    }
}
