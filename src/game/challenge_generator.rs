use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{Coordinate, GridSize};

pub const ENCOURAGING_MESSAGES: [&str; 7] = [
    "Great job! You found it! ⭐",
    "You are doing amazing! 🌟",
    "Wonderful! Keep exploring! 🦇",
    "Incredible work, explorer! 💎",
    "You're a coordinate superstar! ✨",
    "Pro Learner! You nailed it! 🏆",
    "Champ move! That was perfect! 🥇",
];

pub const HINT_MESSAGES: [&str; 5] = [
    "Almost there! Let's try again together! 💙",
    "That's okay! Look at the numbers on the sides! 🔍",
    "No worries! Try counting across, then up! 🗺️",
    "You're learning! Give it another try! 🌈",
    "So close! You've got this, explorer! 🌟",
];

/// Source of random targets and feedback lines. Every draw is independent;
/// repeats of the previous target are allowed.
pub struct ChallengeGenerator {
    seed: u64,
    rng: Box<StdRng>,
}

impl ChallengeGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: Box::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    /// Seeded when `seed` is given, random otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generate(&mut self, grid_size: GridSize) -> Coordinate {
        let bound = grid_size.value();
        let target = Coordinate {
            x: self.rng.random_range(0..bound),
            y: self.rng.random_range(0..bound),
        };
        trace!(target: "round", "Generated target {} on {} grid", target, grid_size);
        target
    }

    pub fn pick_message(&mut self, pool: &[&'static str]) -> &'static str {
        if pool.is_empty() {
            return "";
        }
        pool[self.rng.random_range(0..pool.len())]
    }

    pub fn encouragement(&mut self) -> &'static str {
        self.pick_message(&ENCOURAGING_MESSAGES)
    }

    pub fn hint(&mut self) -> &'static str {
        self.pick_message(&HINT_MESSAGES)
    }
}
