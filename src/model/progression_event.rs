use super::ProgressPatch;

/// The closed set of transitions applied to [`super::ProgressionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionEvent {
    CorrectAnswer,
    WrongAnswer,
    NextLevel,
    FinishGame,
    TogglePause,
    EnterCalmMode,
    ExitCalmMode,
    ResetGame,
    LoadProgress(ProgressPatch),
}
