mod badge;
mod coordinate;
mod difficulty;
mod game_engine_command;
mod game_engine_event;
mod grid_size;
mod input_event;
pub mod motivational_tag;
mod play_view;
mod progress_summary;
mod progression_event;
mod progression_state;
mod round_state;
mod text_size;

pub use badge::Badge;
pub use coordinate::{range_hint, Coordinate, TypedCoordinate, FORMAT_HINT};
pub use difficulty::Difficulty;
pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::GameEngineEvent;
pub use grid_size::GridSize;
pub use input_event::Shortcut;
pub use motivational_tag::{MotivationalTag, MOTIVATIONAL_TAGS};
pub use play_view::{LevelUpBanner, PlayView};
pub use progress_summary::ProgressSummary;
pub use progression_event::ProgressionEvent;
pub use progression_state::{ProgressPatch, ProgressionState, SavedProgress};
pub use round_state::{RoundPhase, RoundState};
pub use text_size::{AnimationSpeed, TextSize};
