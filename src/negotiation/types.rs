use serde::{Deserialize, Serialize};

pub type SessionId = String;
pub type TurnSequence = u32;

/// Slot used by numeric price offers extracted during haggling.
pub const OFFERED_PRICE_SLOT: &str = "offered-price";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationKind {
    Interrogation,
    Haggling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcPersonality {
    pub name: String,
    pub title: String,
    pub trait_label: String,
    /// Base suspicion for interrogation, base firmness for haggling.
    pub base_suspicion: f32,
    pub description: String,
}

/// The four score axes every exchange carries, each in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeScores {
    pub persuasiveness: f32,
    pub confidence: f32,
    pub consistency: f32,
    pub believability: f32,
}

impl ExchangeScores {
    pub fn clamped(self) -> Self {
        Self {
            persuasiveness: clamp_unit(self.persuasiveness),
            confidence: clamp_unit(self.confidence),
            consistency: clamp_unit(self.consistency),
            believability: clamp_unit(self.believability),
        }
    }

    /// Neutral midpoint scores, the substitute of last resort.
    pub fn neutral() -> Self {
        Self {
            persuasiveness: 0.5,
            confidence: 0.5,
            consistency: 0.5,
            believability: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaimValue {
    Categorical { value: String },
    Numeric { value: f64 },
}

impl ClaimValue {
    pub fn categorical(value: impl Into<String>) -> Self {
        Self::Categorical {
            value: normalize_categorical(&value.into()),
        }
    }

    pub fn numeric(value: f64) -> Self {
        Self::Numeric { value }
    }

    /// Two values in the same slot conflict when they differ beyond
    /// tolerance. A variant mismatch in one slot is always a conflict.
    pub fn conflicts_with(&self, other: &Self, numeric_tolerance: f64) -> bool {
        match (self, other) {
            (Self::Categorical { value: a }, Self::Categorical { value: b }) => {
                normalize_categorical(a) != normalize_categorical(b)
            }
            (Self::Numeric { value: a }, Self::Numeric { value: b }) => {
                (a - b).abs() > numeric_tolerance
            }
            _ => true,
        }
    }
}

pub fn normalize_categorical(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A claim as extracted by a provider, before the orchestrator stamps the
/// producing turn onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDraft {
    pub slot: String,
    pub value: ClaimValue,
    pub text: String,
}

impl ClaimDraft {
    pub fn stamp(self, turn_sequence: TurnSequence) -> Claim {
        Claim {
            slot: self.slot,
            value: self.value,
            text: self.text,
            turn_sequence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub slot: String,
    pub value: ClaimValue,
    pub text: String,
    pub turn_sequence: TurnSequence,
}

/// A relationship between two conflicting claims. Neither claim is mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contradiction {
    pub slot: String,
    pub prior_turn: TurnSequence,
    pub new_turn: TurnSequence,
    pub prior_value: ClaimValue,
    pub new_value: ClaimValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueExchange {
    pub sequence: TurnSequence,
    pub npc_prompt: String,
    pub player_response: String,
    pub scores: ExchangeScores,
    pub contradictions: Vec<Contradiction>,
    /// Session suspicion immediately after this turn, for audit/replay.
    pub suspicion_after: f32,
    pub provider_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Granted,
    Denied,
    Accepted,
    Rejected,
    Countered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    TurnBudgetExhausted,
    TrustThresholdReached,
    SuspicionThresholdExceeded,
    ContradictionOverload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub final_suspicion: f32,
    pub mean_persuasiveness: f32,
    pub turns_taken: u32,
    pub contradiction_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeResult {
    pub decision: Decision,
    pub reason: TerminationReason,
    pub summary: ScoreSummary,
    /// Credits multiplier (interrogation) or settled price (haggling).
    /// Computed here, applied by the outcome consumer.
    pub adjustment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionStatus {
    Open,
    Resolved(OutcomeResult),
}

impl SessionStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// What `advance` hands back: the conversation continues, or it is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnOutcome {
    Continue { npc_prompt: String },
    Resolved(OutcomeResult),
}

/// What a scoring provider returns for one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub scores: ExchangeScores,
    #[serde(default)]
    pub claims: Vec<ClaimDraft>,
    /// How similar the response is to previous attempts, if the provider
    /// reports it. Consumed through `similarity_weight` only.
    #[serde(default)]
    pub similarity: Option<f32>,
}

/// A scored exchange with provider attribution, ready for the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedExchange {
    pub scores: ExchangeScores,
    pub claims: Vec<ClaimDraft>,
    pub similarity: Option<f32>,
    pub provider_id: String,
    pub latency_ms: u64,
}

/// Per-kind tuning. Thresholds and weights are configuration, never
/// hardcoded in the components that read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationTuning {
    #[serde(default = "default_success_threshold")]
    pub success_threshold: f32,
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: f32,
    #[serde(default = "default_provisional_accept_threshold")]
    pub provisional_accept_threshold: f32,
    #[serde(default = "default_contradiction_hard_cap")]
    pub contradiction_hard_cap: u32,
    #[serde(default = "default_turn_budget")]
    pub turn_budget: u32,
    #[serde(default = "default_numeric_tolerance")]
    pub numeric_tolerance: f64,
    #[serde(default = "default_max_response_chars")]
    pub max_response_chars: usize,
    #[serde(default = "default_consistency_weight")]
    pub consistency_weight: f32,
    #[serde(default = "default_believability_weight")]
    pub believability_weight: f32,
    #[serde(default = "default_contradiction_increment")]
    pub contradiction_increment: f32,
    #[serde(default = "default_persuasion_weight")]
    pub persuasion_weight: f32,
    #[serde(default = "default_confidence_weight")]
    pub confidence_weight: f32,
    #[serde(default = "default_paranoia_discount")]
    pub paranoia_discount: f32,
    #[serde(default = "default_similarity_weight")]
    pub similarity_weight: f32,
}

fn default_success_threshold() -> f32 {
    0.25
}

fn default_failure_threshold() -> f32 {
    0.85
}

fn default_provisional_accept_threshold() -> f32 {
    0.35
}

fn default_contradiction_hard_cap() -> u32 {
    2
}

fn default_turn_budget() -> u32 {
    5
}

fn default_numeric_tolerance() -> f64 {
    0.01
}

fn default_max_response_chars() -> usize {
    2000
}

fn default_consistency_weight() -> f32 {
    0.30
}

fn default_believability_weight() -> f32 {
    0.30
}

fn default_contradiction_increment() -> f32 {
    0.12
}

fn default_persuasion_weight() -> f32 {
    0.35
}

fn default_confidence_weight() -> f32 {
    0.25
}

fn default_paranoia_discount() -> f32 {
    0.5
}

fn default_similarity_weight() -> f32 {
    0.0
}

impl NegotiationTuning {
    pub fn interrogation_defaults() -> Self {
        Self {
            success_threshold: default_success_threshold(),
            failure_threshold: default_failure_threshold(),
            provisional_accept_threshold: default_provisional_accept_threshold(),
            contradiction_hard_cap: default_contradiction_hard_cap(),
            turn_budget: default_turn_budget(),
            numeric_tolerance: default_numeric_tolerance(),
            max_response_chars: default_max_response_chars(),
            consistency_weight: default_consistency_weight(),
            believability_weight: default_believability_weight(),
            contradiction_increment: default_contradiction_increment(),
            persuasion_weight: default_persuasion_weight(),
            confidence_weight: default_confidence_weight(),
            paranoia_discount: default_paranoia_discount(),
            similarity_weight: default_similarity_weight(),
        }
    }

    pub fn haggling_defaults() -> Self {
        Self {
            success_threshold: 0.30,
            failure_threshold: 0.90,
            turn_budget: 6,
            ..Self::interrogation_defaults()
        }
    }

    pub fn for_kind(kind: NegotiationKind) -> Self {
        match kind {
            NegotiationKind::Interrogation => Self::interrogation_defaults(),
            NegotiationKind::Haggling => Self::haggling_defaults(),
        }
    }
}

impl Default for NegotiationTuning {
    fn default() -> Self {
        Self::interrogation_defaults()
    }
}

pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
