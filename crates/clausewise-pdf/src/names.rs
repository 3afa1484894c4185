//! Fake company, person and job-title names for synthetic contracts.

use rand::Rng;
use rand::seq::SliceRandom;

const SURNAMES: &[&str] = &[
    "Anderson", "Baker", "Castillo", "Dawson", "Ellison", "Fischer", "Garcia", "Holm",
    "Ibsen", "Jensen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Patel",
    "Quinn", "Reyes", "Schneider", "Turner", "Umar", "Vasquez", "Whitfield", "Young",
];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Ben", "Carla", "David", "Elena", "Farid", "Grace", "Henrik", "Ines",
    "James", "Keiko", "Liam", "Maria", "Noah", "Olga", "Pierre", "Rosa", "Samuel",
    "Tara", "Victor",
];

const ADJECTIVES: &[&str] = &[
    "Blue", "Bright", "Granite", "Harbor", "Iron", "Maple", "North", "Silver", "Summit",
    "Vertex",
];

const NOUNS: &[&str] = &[
    "Analytics", "Dynamics", "Logistics", "Systems", "Solutions", "Networks", "Labs",
    "Ventures", "Works", "Partners",
];

const SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Group", "PLC", "and Sons", "Holdings"];

const JOBS: &[&str] = &[
    "Chief Executive Officer",
    "Chief Financial Officer",
    "General Counsel",
    "Head of Procurement",
    "Managing Director",
    "Operations Manager",
    "Legal Operations Lead",
    "Vice President, Sales",
    "Contracts Manager",
    "Director of Compliance",
];

pub(crate) fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &'static [&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// A company name such as "Whitfield Ltd", "Baker, Holm and Reyes" or
/// "Granite Analytics Group". Never contains `_`.
pub fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", pick(rng, SURNAMES), pick(rng, SUFFIXES)),
        1 => format!(
            "{}, {} and {}",
            pick(rng, SURNAMES),
            pick(rng, SURNAMES),
            pick(rng, SURNAMES)
        ),
        _ => format!(
            "{} {} {}",
            pick(rng, ADJECTIVES),
            pick(rng, NOUNS),
            pick(rng, SUFFIXES)
        ),
    }
}

pub fn person<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, SURNAMES))
}

pub fn job<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, JOBS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn names_are_non_empty_and_folder_safe() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let c = company(&mut rng);
            assert!(!c.is_empty());
            assert!(!c.contains('_'), "{c}");
            assert!(!c.contains('/'), "{c}");
            assert!(person(&mut rng).contains(' '));
            assert!(!job(&mut rng).is_empty());
        }
    }
}
