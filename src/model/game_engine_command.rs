use super::{Coordinate, Shortcut};
use crate::game::settings::SettingsChange;

/// Intents sent to the play session by input collaborators.
#[derive(Debug, Clone)]
pub enum GameEngineCommand {
    StartSession,
    SubmitGuess(Coordinate),
    PreviewTypedCoordinate(String),
    SubmitTypedCoordinate(String),
    NextQuestion,
    LevelUp,
    Reset,
    EnterCalmMode,
    ExitCalmMode,
    TogglePause,
    FinishGame,
    ShowHint,
    Shortcut(Shortcut),
    ChangeSettings(SettingsChange),
    ClearSavedProgress,
    /// Fires whichever deferred actions have come due.
    Tick,
    EndSession,
}
