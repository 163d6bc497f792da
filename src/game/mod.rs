pub mod challenge_generator;
pub mod clock;
pub mod game_engine;
pub mod progression;
pub mod round_controller;
pub mod scheduler;
pub mod settings;
pub mod storage;

pub use game_engine::GameEngine;
pub use progression::{reduce, ProgressionEngine};
pub use settings::{Settings, SettingsChange};
