use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

use super::Badge;

/// Cumulative player progress. The lifetime counters survive `ResetGame`; see
/// [`crate::game::progression::reduce`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionState {
    pub score: u32,
    pub level: u32,
    pub total_games: u32,
    pub correct_answers: u32,
    pub total_answers: u32,
    pub stars: u32,
    pub badges: Vec<Badge>,
    pub is_paused: bool,
    pub is_calm_mode: bool,
    pub levels_completed: Vec<u32>,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            total_games: 0,
            correct_answers: 0,
            total_answers: 0,
            stars: 0,
            badges: vec![],
            is_paused: false,
            is_calm_mode: false,
            levels_completed: vec![],
        }
    }
}

impl ProgressionState {
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|badge| badge.id == id)
    }

    pub fn saved_progress(&self) -> SavedProgress {
        SavedProgress {
            total_games: self.total_games,
            correct_answers: self.correct_answers,
            total_answers: self.total_answers,
            stars: self.stars,
            badges: self.badges.clone(),
            levels_completed: self.levels_completed.clone(),
        }
    }

    /// Overwrites every field present in `patch`, then restores the state invariants.
    pub fn merge(&mut self, patch: ProgressPatch) {
        if let Some(score) = patch.score {
            self.score = score;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(total_games) = patch.total_games {
            self.total_games = total_games;
        }
        if let Some(correct_answers) = patch.correct_answers {
            self.correct_answers = correct_answers;
        }
        if let Some(total_answers) = patch.total_answers {
            self.total_answers = total_answers;
        }
        if let Some(stars) = patch.stars {
            self.stars = stars;
        }
        if let Some(badges) = patch.badges {
            self.badges = badges;
        }
        if let Some(is_paused) = patch.is_paused {
            self.is_paused = is_paused;
        }
        if let Some(is_calm_mode) = patch.is_calm_mode {
            self.is_calm_mode = is_calm_mode;
        }
        if let Some(levels_completed) = patch.levels_completed {
            self.levels_completed = levels_completed;
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        self.level = self.level.max(1);
        self.total_answers = self.total_answers.max(self.correct_answers);
        if self.is_calm_mode {
            self.is_paused = true;
        }
        if self.badges.iter().map(|badge| &badge.id).all_unique() {
            return;
        }
        self.badges = std::mem::take(&mut self.badges)
            .into_iter()
            .unique_by(|badge| badge.id.clone())
            .collect();
    }
}

/// The lifetime subset written to storage after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProgress {
    pub total_games: u32,
    pub correct_answers: u32,
    pub total_answers: u32,
    pub stars: u32,
    pub badges: Vec<Badge>,
    pub levels_completed: Vec<u32>,
}

/// Partial progress, as found in a saved blob. Fields with an unexpected JSON
/// type are dropped instead of rejecting the whole blob.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPatch {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub score: Option<u32>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub level: Option<u32>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub total_games: Option<u32>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub correct_answers: Option<u32>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub total_answers: Option<u32>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub stars: Option<u32>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub badges: Option<Vec<Badge>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub is_paused: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub is_calm_mode: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub levels_completed: Option<Vec<u32>>,
}

impl From<SavedProgress> for ProgressPatch {
    fn from(saved: SavedProgress) -> Self {
        ProgressPatch {
            total_games: Some(saved.total_games),
            correct_answers: Some(saved.correct_answers),
            total_answers: Some(saved.total_answers),
            stars: Some(saved.stars),
            badges: Some(saved.badges),
            levels_completed: Some(saved.levels_completed),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_progress_wire_shape() {
        let mut state = ProgressionState::default();
        state.stars = 4;
        state.score = 40;
        state.badges.push(Badge::for_completed_level(1).unwrap());
        state.levels_completed.push(1);

        let json = serde_json::to_value(state.saved_progress()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalGames": 0,
                "correctAnswers": 0,
                "totalAnswers": 0,
                "stars": 4,
                "badges": [{"id": "first-steps", "name": "First Steps", "icon": "🐾"}],
                "levelsCompleted": [1],
            })
        );
    }

    #[test]
    fn test_patch_drops_mistyped_fields_only() {
        let patch: ProgressPatch =
            serde_json::from_str(r#"{"stars": "lots", "totalGames": 3, "badges": 7, "extra": true}"#)
                .unwrap();
        assert_eq!(patch.stars, None);
        assert_eq!(patch.total_games, Some(3));
        assert_eq!(patch.badges, None);
    }

    #[test]
    fn test_merge_restores_invariants() {
        let mut state = ProgressionState::default();
        let first = Badge::for_completed_level(1).unwrap();
        state.merge(ProgressPatch {
            level: Some(0),
            correct_answers: Some(9),
            total_answers: Some(4),
            badges: Some(vec![first.clone(), first.clone()]),
            ..Default::default()
        });
        assert_eq!(state.level, 1);
        assert_eq!(state.total_answers, 9);
        assert_eq!(state.badges, vec![first]);
    }
}
