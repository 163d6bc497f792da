use log::{debug, trace};
use std::time::Duration;

use super::challenge_generator::ChallengeGenerator;
use super::scheduler::{DeferredSlot, AUTO_ADVANCE_DELAY};
use crate::model::{Coordinate, GridSize, RoundPhase, RoundState};

pub const QUESTIONS_PER_LEVEL: u32 = 5;

/// Ephemeral state of one play session: the current target, streak and level
/// progress, plus the pending auto-advance to the next target.
///
/// Every new target bumps `generation`. The auto-advance task remembers the
/// generation it was scheduled under, so a task that outlives its round is
/// discarded by [`RoundController::poll`] instead of replacing a fresh target.
pub struct RoundController {
    grid_size: GridSize,
    generator: ChallengeGenerator,
    target: Option<Coordinate>,
    streak: u32,
    questions_in_level: u32,
    phase: RoundPhase,
    message: Option<String>,
    generation: u64,
    auto_advance: DeferredSlot,
}

impl RoundController {
    pub fn new(grid_size: GridSize, generator: ChallengeGenerator) -> Self {
        Self {
            grid_size,
            generator,
            target: None,
            streak: 0,
            questions_in_level: 0,
            phase: RoundPhase::AwaitingAnswer,
            message: None,
            generation: 0,
            auto_advance: DeferredSlot::new(),
        }
    }

    /// Entering play: first target, fresh streak and level progress.
    pub fn start(&mut self) {
        self.auto_advance.cancel();
        self.streak = 0;
        self.questions_in_level = 0;
        self.generate_target();
    }

    fn generate_target(&mut self) {
        self.target = Some(self.generator.generate(self.grid_size));
        self.generation += 1;
        self.phase = RoundPhase::AwaitingAnswer;
        self.message = None;
    }

    /// Checks a guess against the target.
    ///
    /// Returns `None` when there is nothing to answer or the previous correct
    /// answer is still on display.
    pub fn submit_guess(&mut self, guess: Coordinate, now: Duration) -> Option<bool> {
        let target = self.target?;
        if self.is_level_complete() {
            trace!(target: "round", "Ignoring {} after the level is complete", guess);
            return None;
        }
        if self.phase == RoundPhase::CorrectShown {
            trace!(target: "round", "Ignoring {} while correct answer is shown", guess);
            return None;
        }

        if guess == target {
            self.phase = RoundPhase::CorrectShown;
            self.message = Some(self.generator.encouragement().to_string());
            self.streak += 1;
            self.questions_in_level += 1;
            if self.questions_in_level < QUESTIONS_PER_LEVEL {
                self.auto_advance
                    .schedule(now, AUTO_ADVANCE_DELAY, self.generation);
            } else {
                self.auto_advance.cancel();
            }
            debug!(
                target: "round",
                "Correct guess {}; streak {}; {}/{}",
                guess, self.streak, self.questions_in_level, QUESTIONS_PER_LEVEL
            );
            Some(true)
        } else {
            self.phase = RoundPhase::WrongShown;
            self.message = Some(self.generator.hint().to_string());
            self.streak = 0;
            debug!(target: "round", "Wrong guess {}; target was {}", guess, target);
            Some(false)
        }
    }

    pub fn is_level_complete(&self) -> bool {
        self.questions_in_level >= QUESTIONS_PER_LEVEL
    }

    pub fn advance_to_next(&mut self) {
        self.auto_advance.cancel();
        self.generate_target();
    }

    pub fn reset_level(&mut self) {
        self.auto_advance.cancel();
        self.questions_in_level = 0;
        self.streak = 0;
        self.generate_target();
    }

    /// A new bound restarts the round, as entering play does.
    pub fn set_grid_size(&mut self, grid_size: GridSize) {
        if self.grid_size == grid_size {
            return;
        }
        self.grid_size = grid_size;
        if self.target.is_some() {
            self.start();
        }
    }

    /// Applies a due auto-advance. Returns whether a new target was drawn.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.auto_advance.take_due(now) {
            Some(task) if task.generation == self.generation && self.target.is_some() => {
                trace!(target: "round", "Auto-advancing generation {}", task.generation);
                self.generate_target();
                true
            }
            Some(task) => {
                trace!(
                    target: "round",
                    "Dropping stale auto-advance from generation {} (now {})",
                    task.generation, self.generation
                );
                false
            }
            None => false,
        }
    }

    /// Leaving play: nothing may fire afterwards.
    pub fn dispose(&mut self) {
        self.auto_advance.cancel();
        self.target = None;
        self.phase = RoundPhase::AwaitingAnswer;
        self.message = None;
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<Coordinate> {
        self.target
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> RoundState {
        RoundState {
            target: self.target,
            streak: self.streak,
            questions_in_level: self.questions_in_level,
            questions_per_level: QUESTIONS_PER_LEVEL,
            phase: self.phase,
            message: self.message.clone(),
            generation: self.generation,
            auto_advance_pending: self.auto_advance.is_pending(),
        }
    }
}
