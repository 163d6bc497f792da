use uuid::Uuid;

use super::{Badge, Coordinate, MotivationalTag, ProgressionState, RoundState};
use crate::game::settings::Settings;

#[derive(Debug, Clone)]
pub enum GameEngineEvent {
    SessionStarted(Uuid),
    ProgressionChanged(ProgressionState),
    RoundChanged(RoundState),
    GuessResolved {
        coordinate: Coordinate,
        correct: bool,
    },
    LeveledUp {
        level: u32,
        badge: Option<Badge>,
        tag: &'static MotivationalTag,
    },
    LevelUpBannerChanged(bool),
    HintChanged(Option<String>),
    InputFeedback(Option<String>),
    SettingsChanged(Settings),
    SessionEnded,
}
