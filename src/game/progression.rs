use log::{debug, info, warn};

use super::storage::{load_json, save_json, SharedStore, PROGRESS_KEY};
use crate::model::motivational_tag::{current_tag, next_tag, unlocked_tags};
use crate::model::{
    Badge, MotivationalTag, ProgressPatch, ProgressSummary, ProgressionEvent, ProgressionState,
};

pub const POINTS_PER_CORRECT_ANSWER: u32 = 10;

/// Applies one event to `state`, returning the next state.
///
/// `ResetGame` only restarts the active run: score, level and the pause/calm
/// flags return to their defaults while the lifetime counters (games, stars,
/// answers, badges, completed levels) carry over untouched.
pub fn reduce(state: &ProgressionState, event: &ProgressionEvent) -> ProgressionState {
    let mut next = state.clone();
    match event {
        ProgressionEvent::CorrectAnswer => {
            next.score = state.score.saturating_add(POINTS_PER_CORRECT_ANSWER);
            next.correct_answers = state.correct_answers.saturating_add(1);
            next.total_answers = state.total_answers.saturating_add(1);
            next.stars = state.stars.saturating_add(1);
        }
        ProgressionEvent::WrongAnswer => {
            next.total_answers = state.total_answers.saturating_add(1);
        }
        ProgressionEvent::NextLevel => {
            let finished = state.level;
            next.level = finished.saturating_add(1);
            next.levels_completed.push(finished);
            if let Some(badge) = Badge::for_completed_level(finished) {
                // replaying a milestone after a reset must not duplicate its badge
                if !next.has_badge(&badge.id) {
                    next.badges.push(badge);
                }
            }
            next.total_games = state.total_games.saturating_add(1);
        }
        ProgressionEvent::FinishGame => {
            next.total_games = state.total_games.saturating_add(1);
        }
        ProgressionEvent::TogglePause => {
            next.is_paused = !state.is_paused;
        }
        ProgressionEvent::EnterCalmMode => {
            next.is_paused = true;
            next.is_calm_mode = true;
        }
        ProgressionEvent::ExitCalmMode => {
            next.is_paused = false;
            next.is_calm_mode = false;
        }
        ProgressionEvent::ResetGame => {
            next = ProgressionState {
                total_games: state.total_games,
                badges: state.badges.clone(),
                stars: state.stars,
                correct_answers: state.correct_answers,
                total_answers: state.total_answers,
                levels_completed: state.levels_completed.clone(),
                ..ProgressionState::default()
            };
        }
        ProgressionEvent::LoadProgress(patch) => {
            next.merge(patch.clone());
        }
    }
    next
}

/// Owns the cumulative state and writes its lifetime subset after every change.
pub struct ProgressionEngine {
    state: ProgressionState,
    store: SharedStore,
}

impl ProgressionEngine {
    /// Starts from defaults, overlaid with saved progress when a readable blob exists.
    pub fn new(store: SharedStore) -> Self {
        let mut engine = Self {
            state: ProgressionState::default(),
            store,
        };
        match load_json::<ProgressPatch>(&engine.store, PROGRESS_KEY) {
            Some(patch) => {
                debug!(target: "progression", "Loading saved progress {:?}", patch);
                engine.state = reduce(&engine.state, &ProgressionEvent::LoadProgress(patch));
            }
            None => debug!(target: "progression", "No saved progress"),
        }
        engine
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// Applies `event`; persists when the state actually changed. Returns whether it did.
    pub fn dispatch(&mut self, event: ProgressionEvent) -> bool {
        let next = reduce(&self.state, &event);
        if next == self.state {
            return false;
        }
        debug!(target: "progression", "{:?}: level {} stars {} score {}", event, next.level, next.stars, next.score);
        if next.level > self.state.level {
            info!(target: "progression", "Level {} completed", self.state.level);
        }
        self.state = next;
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(err) = save_json(&self.store, PROGRESS_KEY, &self.state.saved_progress()) {
            warn!(target: "progression", "Failed to save progress: {}", err);
        }
    }

    /// Forgets everything, including lifetime statistics and the saved blob.
    pub fn clear_saved_progress(&mut self) {
        if let Err(err) = self.store.borrow_mut().remove(PROGRESS_KEY) {
            warn!(target: "progression", "Failed to remove saved progress: {}", err);
        }
        self.state = ProgressionState::default();
        info!(target: "progression", "Saved progress cleared");
    }

    pub fn current_tag(&self) -> &'static MotivationalTag {
        current_tag(self.state.stars)
    }

    pub fn next_tag(&self) -> Option<&'static MotivationalTag> {
        next_tag(self.state.stars)
    }

    pub fn unlocked_tags(&self) -> Vec<&'static MotivationalTag> {
        unlocked_tags(self.state.stars)
    }

    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary::from_state(&self.state)
    }
}
