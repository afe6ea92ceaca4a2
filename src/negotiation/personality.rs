use crate::negotiation::types::{NegotiationKind, NpcPersonality};

// Name pool is shared across both NPC roles; titles and traits are
// per-kind. Trait selection is decorrelated from name selection by
// indexing with shifted slices of the same hash.

const NPC_SURNAMES: [&str; 12] = [
    "Chen",
    "Rodriguez",
    "Sato",
    "O'Brien",
    "Kowalski",
    "Singh",
    "Müller",
    "Nakamura",
    "Garcia",
    "Petrov",
    "Kim",
    "Anderson",
];

const GUARD_TITLES: [&str; 6] = [
    "Security Officer",
    "Guard",
    "Security Chief",
    "Station Inspector",
    "Docking Authority",
    "Customs Officer",
];

const TRADER_TITLES: [&str; 6] = [
    "Dockside Trader",
    "Commodities Broker",
    "Cargo Merchant",
    "Port Quartermaster",
    "Freelance Dealer",
    "Guild Factor",
];

struct TraitEntry {
    label: &'static str,
    base: f32,
    description: &'static str,
}

const GUARD_TRAITS: [TraitEntry; 6] = [
    TraitEntry {
        label: "Strict Rule-Follower",
        base: 0.6,
        description: "By-the-book enforcer who trusts procedure over instinct",
    },
    TraitEntry {
        label: "Friendly Veteran",
        base: 0.3,
        description: "Experienced officer who's seen it all and can spot a good story",
    },
    TraitEntry {
        label: "Paranoid Newbie",
        base: 0.7,
        description: "Fresh recruit trying to prove themselves, suspicious of everyone",
    },
    TraitEntry {
        label: "Tired Night-Shifter",
        base: 0.4,
        description: "Exhausted from long shifts, just wants to process paperwork quickly",
    },
    TraitEntry {
        label: "Shrewd Investigator",
        base: 0.5,
        description: "Keen observer who listens carefully and catches inconsistencies",
    },
    TraitEntry {
        label: "Cynical Bureaucrat",
        base: 0.55,
        description: "Seen too many lies to trust anyone easily",
    },
];

const TRADER_TRAITS: [TraitEntry; 6] = [
    TraitEntry {
        label: "Margin Hawk",
        base: 0.7,
        description: "Counts every credit twice and concedes nothing without a fight",
    },
    TraitEntry {
        label: "Eager Mover",
        base: 0.35,
        description: "Wants the cargo off the dock today and prices accordingly",
    },
    TraitEntry {
        label: "Stubborn Veteran",
        base: 0.65,
        description: "Has heard every sob story a spacer can tell and priced them all in",
    },
    TraitEntry {
        label: "Weary Closer",
        base: 0.4,
        description: "End of a long shift; a plausible number closes the deal",
    },
    TraitEntry {
        label: "Calculating Broker",
        base: 0.55,
        description: "Tracks what you said three offers ago and will quote it back",
    },
    TraitEntry {
        label: "Genial Hustler",
        base: 0.45,
        description: "All smiles until the number on the slate moves the wrong way",
    },
];

pub struct PersonalityGenerator;

impl PersonalityGenerator {
    /// Pure function of (session_id, kind): same inputs, same personality.
    /// An empty session id hashes to 0 and selects the first table entries.
    pub fn generate(session_id: &str, kind: NegotiationKind) -> NpcPersonality {
        let hash = seed_hash(session_id);
        let name_index = hash.unsigned_abs() as usize % NPC_SURNAMES.len();

        let (titles, traits): (&[&str], &[TraitEntry]) = match kind {
            NegotiationKind::Interrogation => (&GUARD_TITLES, &GUARD_TRAITS),
            NegotiationKind::Haggling => (&TRADER_TITLES, &TRADER_TRAITS),
        };
        let title_index = (hash >> 4).unsigned_abs() as usize % titles.len();
        let trait_index = (hash >> 8).unsigned_abs() as usize % traits.len();
        let trait_entry = &traits[trait_index];

        NpcPersonality {
            name: NPC_SURNAMES[name_index].to_string(),
            title: titles[title_index].to_string(),
            trait_label: trait_entry.label.to_string(),
            base_suspicion: trait_entry.base,
            description: trait_entry.description.to_string(),
        }
    }
}

/// 32-bit string hash: h = (h << 5) - h + c, wrapping. The session id is
/// the only entropy source; no process RNG anywhere in the engine.
pub(crate) fn seed_hash(input: &str) -> i32 {
    let mut hash: i32 = 0;
    for ch in input.chars() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(ch as i32);
    }
    hash
}
