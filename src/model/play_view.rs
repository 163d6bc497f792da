use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use super::motivational_tag::{current_tag, next_tag};
use super::{Badge, GameEngineEvent, MotivationalTag, ProgressionState, RoundState};
use crate::events::EventHandler;
use crate::game::settings::Settings;

/// Latest level-up announcement, kept while the banner is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUpBanner {
    pub level: u32,
    pub badge: Option<Badge>,
    pub tag: &'static MotivationalTag,
}

/// Everything a renderer needs for the play screen, folded from engine events.
pub struct PlayView {
    session_id: Option<Uuid>,
    progression: ProgressionState,
    round: Option<RoundState>,
    settings: Settings,
    hint: Option<String>,
    input_feedback: Option<String>,
    level_up: Option<LevelUpBanner>,
    last_guess_correct: Option<bool>,
}

impl PlayView {
    pub fn new(progression: &ProgressionState, settings: &Settings) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            session_id: None,
            progression: progression.clone(),
            round: None,
            settings: settings.clone(),
            hint: None,
            input_feedback: None,
            level_up: None,
            last_guess_correct: None,
        }))
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn input_feedback(&self) -> Option<&str> {
        self.input_feedback.as_deref()
    }

    pub fn level_up(&self) -> Option<&LevelUpBanner> {
        self.level_up.as_ref()
    }

    pub fn last_guess_correct(&self) -> Option<bool> {
        self.last_guess_correct
    }

    pub fn current_tag(&self) -> &'static MotivationalTag {
        current_tag(self.progression.stars)
    }

    pub fn next_tag(&self) -> Option<&'static MotivationalTag> {
        next_tag(self.progression.stars)
    }

    /// Grid input is disabled while the game is paused.
    pub fn grid_enabled(&self) -> bool {
        !self.progression.is_paused && self.round.is_some()
    }
}

impl EventHandler<GameEngineEvent> for PlayView {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::SessionStarted(id) => self.session_id = Some(*id),
            GameEngineEvent::ProgressionChanged(state) => self.progression = state.clone(),
            GameEngineEvent::RoundChanged(round) => self.round = Some(round.clone()),
            GameEngineEvent::GuessResolved { correct, .. } => {
                self.last_guess_correct = Some(*correct)
            }
            GameEngineEvent::LeveledUp { level, badge, tag } => {
                self.level_up = Some(LevelUpBanner {
                    level: *level,
                    badge: badge.clone(),
                    tag: *tag,
                })
            }
            GameEngineEvent::LevelUpBannerChanged(visible) => {
                if !visible {
                    self.level_up = None;
                }
            }
            GameEngineEvent::HintChanged(hint) => self.hint = hint.clone(),
            GameEngineEvent::InputFeedback(feedback) => self.input_feedback = feedback.clone(),
            GameEngineEvent::SettingsChanged(settings) => self.settings = settings.clone(),
            GameEngineEvent::SessionEnded => {
                self.round = None;
                self.hint = None;
                self.level_up = None;
                self.last_guess_correct = None;
            }
        }
    }
}
