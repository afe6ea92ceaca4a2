use crate::negotiation::{
    error::NegotiationError,
    personality::seed_hash,
    ports::PromptSourcePort,
    state::NegotiationSession,
    types::NegotiationKind,
};

const INTERROGATION_TOPICS: [&[&str]; 4] = [
    // identity verification
    &[
        "What's your pilot certification class?",
        "Which academy did you graduate from?",
        "What's your ship's registration number?",
        "What's your emergency evacuation ID number?",
        "Which shipping consortium do you work for?",
        "What's your cargo manifest authorization code?",
    ],
    // arrival details
    &[
        "What's your flight plan registration number?",
        "Which traffic controller cleared your approach?",
        "What was your departure time from the last station?",
        "Which loading dock were you assigned?",
        "Who signed off on your manifest?",
    ],
    // ship knowledge
    &[
        "What's your ship's maximum warp factor?",
        "How many crew stations does it have?",
        "What's the fuel consumption rate?",
        "What's the maximum cargo tonnage?",
        "What's the life support duration on your vessel?",
    ],
    // situational awareness
    &[
        "Are you aware of the current navigation hazards?",
        "Have you filed your departure customs forms?",
        "Do you have insurance coverage for this vessel?",
        "Have you declared any hazardous materials?",
        "Do you have the required safety certifications?",
    ],
];

const HAGGLING_PROMPTS: [&str; 8] = [
    "What are you actually willing to pay?",
    "That cargo didn't haul itself across three sectors. Make me a real offer.",
    "I can hold this price until the next freighter docks. Your move.",
    "Give me a number, not a speech.",
    "The manifest says premium grade. The price says so too.",
    "You know what the guild rate is. Why should I go under it?",
    "Every trader on this dock will quote you worse. Try again.",
    "Sweeten it and we might have a deal.",
];

const NEUTRAL_WRAPPERS: [&str; 4] = [
    "I see. {q}",
    "Interesting. {q}",
    "Alright. {q}",
    "Let me check something. {q}",
];

const SUSPICIOUS_WRAPPERS: [&str; 4] = [
    "Hmm, that's odd. {q}",
    "Something doesn't add up. {q}",
    "I'm not entirely convinced. {q}",
    "That raises some questions. {q}",
];

const VERY_SUSPICIOUS_WRAPPERS: [&str; 4] = [
    "Wait just a minute here. {q}",
    "I don't believe that for a second. {q}",
    "Your story has more holes than a stripped hull plate. {q}",
    "Nice try, but I wasn't born yesterday. {q}",
];

const CONVINCED_WRAPPERS: [&str; 3] = [
    "That checks out with our records. {q}",
    "I appreciate your cooperation. {q}",
    "Everything seems legitimate so far. {q}",
];

const INTERROGATION_OPENING: &str =
    "Hold it right there. This dock is restricted. Which ship are you claiming, and who are you?";
const HAGGLING_OPENING: &str =
    "You're looking at the best stock on this station. Tell me what you want and what you'll pay.";

/// Default prompt source: the question tables cycled by topic, wrapped in
/// a mood template keyed by the current suspicion band. Selection is
/// seeded by the session hash and turn sequence, never a process RNG, so
/// a replayed session asks the same questions.
#[derive(Debug, Clone, Default)]
pub struct TablePromptSource;

impl TablePromptSource {
    pub fn opening_prompt(kind: NegotiationKind) -> &'static str {
        match kind {
            NegotiationKind::Interrogation => INTERROGATION_OPENING,
            NegotiationKind::Haggling => HAGGLING_OPENING,
        }
    }

    fn pick<'a>(pool: &[&'a str], seed: usize) -> &'a str {
        pool[seed % pool.len()]
    }

    fn wrap(question: &str, suspicion: f32, seed: usize) -> String {
        let wrappers: &[&str] = if suspicion < 0.25 {
            &CONVINCED_WRAPPERS
        } else if suspicion < 0.5 {
            &NEUTRAL_WRAPPERS
        } else if suspicion < 0.75 {
            &SUSPICIOUS_WRAPPERS
        } else {
            &VERY_SUSPICIOUS_WRAPPERS
        };
        Self::pick(wrappers, seed).replace("{q}", question)
    }
}

impl PromptSourcePort for TablePromptSource {
    fn next_prompt(&self, session: &NegotiationSession) -> Result<String, NegotiationError> {
        let turn = session.turns.len();
        let seed = seed_hash(&session.session_id).unsigned_abs() as usize;

        let question = match session.kind {
            NegotiationKind::Interrogation => {
                let topic = INTERROGATION_TOPICS[turn % INTERROGATION_TOPICS.len()];
                Self::pick(topic, seed.wrapping_add(turn))
            }
            NegotiationKind::Haggling => Self::pick(&HAGGLING_PROMPTS, seed.wrapping_add(turn)),
        };

        let mut prompt = Self::wrap(question, session.suspicion, seed.wrapping_add(turn * 7));

        // Late-dialogue pressure once the story has worn thin.
        if turn >= 2 && session.suspicion > 0.7 {
            prompt = format!("Look, I've heard enough. {prompt}");
        } else if turn >= 2 && session.suspicion > 0.4 {
            prompt = format!("Your story keeps changing. {prompt}");
        }

        Ok(prompt)
    }
}
