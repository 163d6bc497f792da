use serde::Serialize;
use serde_with::skip_serializing_none;

use super::Coordinate;

/// Feedback phase of the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RoundPhase {
    #[default]
    AwaitingAnswer,
    CorrectShown,
    /// Collapses back to `AwaitingAnswer` semantics on the next guess.
    WrongShown,
}

impl RoundPhase {
    /// Tri-state correctness flag for the most recent guess.
    pub fn is_correct(&self) -> Option<bool> {
        match self {
            RoundPhase::AwaitingAnswer => None,
            RoundPhase::CorrectShown => Some(true),
            RoundPhase::WrongShown => Some(false),
        }
    }
}

/// Read-only snapshot of a play round for renderers.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    pub target: Option<Coordinate>,
    pub streak: u32,
    pub questions_in_level: u32,
    pub questions_per_level: u32,
    pub phase: RoundPhase,
    pub message: Option<String>,
    pub generation: u64,
    pub auto_advance_pending: bool,
}

impl RoundState {
    pub fn is_correct(&self) -> Option<bool> {
        self.phase.is_correct()
    }

    pub fn is_level_complete(&self) -> bool {
        self.questions_in_level >= self.questions_per_level
    }

    /// The "Next" button is offered after a correct answer that did not finish the level.
    pub fn can_advance(&self) -> bool {
        self.phase == RoundPhase::CorrectShown && !self.is_level_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_complete_hides_next_button() {
        let mut round = RoundState {
            target: Some(Coordinate::new(1, 2)),
            streak: 5,
            questions_in_level: 5,
            questions_per_level: 5,
            phase: RoundPhase::CorrectShown,
            message: None,
            generation: 5,
            auto_advance_pending: false,
        };
        assert!(round.is_level_complete());
        assert!(!round.can_advance());

        round.questions_in_level = 4;
        assert!(round.can_advance());
        assert_eq!(round.is_correct(), Some(true));
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let round = RoundState {
            target: None,
            streak: 0,
            questions_in_level: 0,
            questions_per_level: 5,
            phase: RoundPhase::AwaitingAnswer,
            message: None,
            generation: 0,
            auto_advance_pending: false,
        };
        let json = serde_json::to_value(&round).unwrap();
        assert!(json.get("target").is_none());
        assert!(json.get("message").is_none());
        assert_eq!(json["questionsPerLevel"], 5);
    }
}
