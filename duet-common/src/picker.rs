//! Random pick from a fixed list
//!
//! Used by the truth-or-dare game. Randomness comes from a caller-supplied
//! [`Rng`] so tests can seed it.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Truth-or-dare card type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Truth,
    Dare,
}

impl PromptKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "truth" => Some(PromptKind::Truth),
            "dare" => Some(PromptKind::Dare),
            _ => None,
        }
    }

    /// Pick a kind with equal probability
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            PromptKind::Truth
        } else {
            PromptKind::Dare
        }
    }

    /// The fixed deck for this kind
    pub fn deck(&self) -> &'static [&'static str] {
        match self {
            PromptKind::Truth => TRUTHS,
            PromptKind::Dare => DARES,
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptKind::Truth => write!(f, "Truth"),
            PromptKind::Dare => write!(f, "Dare"),
        }
    }
}

const TRUTHS: &[&str] = &[
    "What was your first impression of me?",
    "What is a habit of mine you secretly love?",
    "When did you first realize you had feelings for me?",
    "What is something you have never told me?",
    "What is your favorite memory of us?",
    "What is one thing you would change about our first date?",
    "Which of my friends do you like the most?",
    "What song reminds you of me?",
    "What is the most romantic thing I have ever done?",
    "What is one dream you have not shared with me yet?",
    "What small thing do I do that makes your day better?",
    "What is your biggest fear about our future?",
];

const DARES: &[&str] = &[
    "Give me a 30 second massage.",
    "Sing the chorus of our song.",
    "Write me a four line love poem right now.",
    "Do your best impression of me.",
    "Plan our next date in under a minute.",
    "Send me a voice note saying why you love me.",
    "Dance with me for one full song.",
    "Recreate our first selfie together.",
    "Let me choose your phone wallpaper for a day.",
    "Cook me breakfast tomorrow morning.",
    "Tell me three things you love about me without pausing.",
    "Hold eye contact with me for 60 seconds.",
];

/// Pick one item uniformly at random
///
/// # Errors
/// [`Error::InvalidInput`] when `items` is empty.
pub fn pick_one<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Result<&'a T> {
    items
        .choose(rng)
        .ok_or_else(|| Error::InvalidInput("cannot pick from an empty list".to_string()))
}

/// Pick a truth-or-dare card of the given kind
pub fn pick<R: Rng + ?Sized>(kind: PromptKind, rng: &mut R) -> Result<&'static str> {
    pick_one(kind.deck(), rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_one_empty_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: [u8; 0] = [];
        assert!(matches!(
            pick_one(&empty, &mut rng),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_pick_one_single_item() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_one(&["only"], &mut rng).unwrap(), &"only");
    }

    #[test]
    fn test_pick_is_deterministic_for_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                pick(PromptKind::Dare, &mut a).unwrap(),
                pick(PromptKind::Dare, &mut b).unwrap()
            );
        }
    }

    #[test]
    fn test_pick_comes_from_deck() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let truth = pick(PromptKind::Truth, &mut rng).unwrap();
            assert!(TRUTHS.contains(&truth));
            let dare = pick(PromptKind::Dare, &mut rng).unwrap();
            assert!(DARES.contains(&dare));
        }
    }

    #[test]
    fn test_random_kind_covers_both() {
        let mut rng = StdRng::seed_from_u64(3);
        let kinds: Vec<PromptKind> = (0..64).map(|_| PromptKind::random(&mut rng)).collect();
        assert!(kinds.contains(&PromptKind::Truth));
        assert!(kinds.contains(&PromptKind::Dare));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(PromptKind::from_str("Truth"), Some(PromptKind::Truth));
        assert_eq!(PromptKind::from_str(" DARE "), Some(PromptKind::Dare));
        assert_eq!(PromptKind::from_str("maybe"), None);
    }
}
