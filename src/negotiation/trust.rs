use crate::negotiation::types::{
    ExchangeScores, NegotiationTuning, NpcPersonality, clamp_unit,
};

pub struct SuspicionTrustModel;

impl SuspicionTrustModel {
    /// One turn's suspicion/firmness update. Pure and reproducible
    /// byte-for-byte given identical inputs; exercised directly by the
    /// property tests.
    ///
    /// Poor consistency and believability raise the value; each
    /// contradiction adds a fixed increment (additive, so one bad turn
    /// cannot escalate multiplicatively). Persuasiveness and confidence
    /// pull the value down, attenuated by the personality's base
    /// suspicion: a paranoid NPC discounts persuasive arguments more
    /// heavily. The result is always clamped to [0,1].
    pub fn update(
        current: f32,
        personality: &NpcPersonality,
        scores: &ExchangeScores,
        contradiction_count: u32,
        similarity: Option<f32>,
        tuning: &NegotiationTuning,
    ) -> f32 {
        let scores = scores.clamped();

        let mut raise = tuning.consistency_weight * (1.0 - scores.consistency)
            + tuning.believability_weight * (1.0 - scores.believability)
            + tuning.contradiction_increment * contradiction_count as f32;
        if let Some(similarity) = similarity {
            raise += tuning.similarity_weight * clamp_unit(similarity);
        }

        let discount = 1.0 - tuning.paranoia_discount * clamp_unit(personality.base_suspicion);
        let pull = (tuning.persuasion_weight * scores.persuasiveness
            + tuning.confidence_weight * scores.confidence)
            * discount;

        clamp_unit(current + raise - pull)
    }
}
