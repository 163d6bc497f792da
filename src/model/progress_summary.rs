use crate::helpers::rounded_percentage;

use super::motivational_tag::{current_tag, next_tag, stars_to_next_tag};
use super::{Badge, MotivationalTag, ProgressionState};

/// What the parent dashboard shows about lifetime progress.
#[readonly::make]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub games_played: u32,
    pub accuracy_percent: u32,
    pub stars: u32,
    pub levels_done: usize,
    pub badges: Vec<Badge>,
    pub current_tag: &'static MotivationalTag,
    pub next_tag: Option<&'static MotivationalTag>,
    pub stars_to_next_tag: Option<u32>,
}

impl ProgressSummary {
    pub fn from_state(state: &ProgressionState) -> Self {
        Self {
            games_played: state.total_games,
            accuracy_percent: rounded_percentage(state.correct_answers, state.total_answers),
            stars: state.stars,
            levels_done: state.levels_completed.len(),
            badges: state.badges.clone(),
            current_tag: current_tag(state.stars),
            next_tag: next_tag(state.stars),
            stars_to_next_tag: stars_to_next_tag(state.stars),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_fresh_state() {
        let summary = ProgressSummary::from_state(&ProgressionState::default());
        assert_eq!(summary.accuracy_percent, 0);
        assert_eq!(summary.current_tag.id, "newcomer");
        assert_eq!(summary.stars_to_next_tag, Some(3));
    }

    #[test]
    fn test_summary_accuracy_and_levels() {
        let state = ProgressionState {
            total_games: 2,
            correct_answers: 10,
            total_answers: 12,
            stars: 10,
            levels_completed: vec![1, 2],
            ..Default::default()
        };
        let summary = ProgressSummary::from_state(&state);
        assert_eq!(summary.games_played, 2);
        assert_eq!(summary.accuracy_percent, 83);
        assert_eq!(summary.levels_done, 2);
        assert_eq!(summary.next_tag.map(|tag| tag.id), Some("navigator"));
    }
}
