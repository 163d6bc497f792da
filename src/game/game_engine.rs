use log::{debug, info, trace};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

use super::challenge_generator::ChallengeGenerator;
use super::clock::Clock;
use super::progression::ProgressionEngine;
use super::round_controller::RoundController;
use super::scheduler::{
    DeferredSlot, ThrottleWindow, CLICK_GUARD_WINDOW, HINT_DISPLAY_DURATION,
    LEVEL_UP_BANNER_DURATION, SHORTCUT_THROTTLE_WINDOW,
};
use super::settings::{Settings, SettingsChange, SettingsStore};
use super::storage::SharedStore;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::motivational_tag::current_tag;
use crate::model::{
    range_hint, Coordinate, GameEngineCommand, GameEngineEvent, MotivationalTag,
    ProgressSummary, ProgressionEvent, ProgressionState, RoundState, Shortcut, TypedCoordinate,
    FORMAT_HINT,
};

/// Coordinates one play session: routes input intents to the round and the
/// progression engine, applies the play-screen guards and publishes the
/// resulting state.
///
/// Listeners of the event channel are called while the engine is borrowed and
/// must not send commands synchronously.
pub struct GameEngine {
    session_id: Option<Uuid>,
    progression: ProgressionEngine,
    round: RoundController,
    settings: SettingsStore,
    clock: Rc<dyn Clock>,
    click_guard: ThrottleWindow,
    shortcut_throttle: ThrottleWindow,
    hint: Option<String>,
    hint_timer: DeferredSlot,
    level_up_visible: bool,
    level_up_timer: DeferredSlot,
    subscription: Option<Unsubscriber<GameEngineCommand>>,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
}

impl Destroyable for GameEngine {
    fn destroy(&mut self) {
        self.end_session();
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GameEngine {
    pub fn new(
        game_engine_command_observer: EventObserver<GameEngineCommand>,
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
        store: SharedStore,
        clock: Rc<dyn Clock>,
        seed: Option<u64>,
    ) -> Rc<RefCell<Self>> {
        let settings = SettingsStore::load(store.clone());
        let generator = ChallengeGenerator::new(seed);
        debug!(target: "game_engine", "Challenge seed: {}", generator.seed());
        let game_engine = Self {
            session_id: None,
            progression: ProgressionEngine::new(store),
            round: RoundController::new(settings.current().grid_size, generator),
            settings,
            clock,
            click_guard: ThrottleWindow::new(CLICK_GUARD_WINDOW),
            shortcut_throttle: ThrottleWindow::new(SHORTCUT_THROTTLE_WINDOW),
            hint: None,
            hint_timer: DeferredSlot::new(),
            level_up_visible: false,
            level_up_timer: DeferredSlot::new(),
            subscription: None,
            game_engine_event_emitter,
        };
        let refcell = Rc::new(RefCell::new(game_engine));
        GameEngine::wire_subscription(refcell.clone(), game_engine_command_observer);
        refcell
    }

    fn wire_subscription(
        game_engine: Rc<RefCell<Self>>,
        game_engine_command_observer: EventObserver<GameEngineCommand>,
    ) {
        // weak: the command channel must not keep the engine alive
        let handler = Rc::downgrade(&game_engine);
        let subscription = game_engine_command_observer.subscribe(move |command| {
            if let Some(game_engine) = handler.upgrade() {
                game_engine.borrow_mut().handle_command(command.clone());
            }
        });
        game_engine.borrow_mut().subscription = Some(subscription);
    }

    fn handle_command(&mut self, command: GameEngineCommand) {
        trace!(target: "game_engine", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::StartSession => self.start_session(),
            GameEngineCommand::SubmitGuess(coordinate) => self.submit_guess(coordinate),
            GameEngineCommand::PreviewTypedCoordinate(text) => self.preview_typed(&text),
            GameEngineCommand::SubmitTypedCoordinate(text) => self.submit_typed(&text),
            GameEngineCommand::NextQuestion => self.next_question(),
            GameEngineCommand::LevelUp => self.level_up(),
            GameEngineCommand::Reset => self.reset(),
            GameEngineCommand::EnterCalmMode => self.dispatch(ProgressionEvent::EnterCalmMode),
            GameEngineCommand::ExitCalmMode => self.dispatch(ProgressionEvent::ExitCalmMode),
            GameEngineCommand::TogglePause => self.dispatch(ProgressionEvent::TogglePause),
            GameEngineCommand::FinishGame => self.dispatch(ProgressionEvent::FinishGame),
            GameEngineCommand::ShowHint => self.show_hint(),
            GameEngineCommand::Shortcut(shortcut) => self.handle_shortcut(shortcut),
            GameEngineCommand::ChangeSettings(change) => self.change_settings(&change),
            GameEngineCommand::ClearSavedProgress => self.clear_saved_progress(),
            GameEngineCommand::Tick => self.tick(),
            GameEngineCommand::EndSession => self.end_session(),
        }
    }

    fn start_session(&mut self) {
        let session_id = Uuid::new_v4();
        info!(target: "game_engine", "Starting play session {}", session_id);
        self.session_id = Some(session_id);
        self.click_guard.reset();
        self.shortcut_throttle.reset();
        self.round.start();
        self.emit(GameEngineEvent::SessionStarted(session_id));
        self.emit(GameEngineEvent::ProgressionChanged(
            self.progression.state().clone(),
        ));
        self.emit_round();
    }

    fn end_session(&mut self) {
        if self.session_id.take().is_none() {
            return;
        }
        self.round.dispose();
        self.hint_timer.cancel();
        self.level_up_timer.cancel();
        self.hint = None;
        self.level_up_visible = false;
        info!(target: "game_engine", "Play session ended");
        self.emit(GameEngineEvent::SessionEnded);
    }

    fn submit_guess(&mut self, coordinate: Coordinate) {
        if self.progression.state().is_paused {
            debug!(target: "game_engine", "Ignoring guess {} while paused", coordinate);
            return;
        }
        let now = self.clock.now();
        if !self.click_guard.try_accept(now) {
            trace!(target: "game_engine", "Click guard dropped {}", coordinate);
            return;
        }

        let correct = match self.round.submit_guess(coordinate, now) {
            Some(correct) => correct,
            None => return,
        };
        self.emit(GameEngineEvent::GuessResolved {
            coordinate,
            correct,
        });
        if correct {
            self.dispatch(ProgressionEvent::CorrectAnswer);
            self.set_hint(None);
        } else {
            self.dispatch(ProgressionEvent::WrongAnswer);
        }
        self.emit_round();
    }

    fn preview_typed(&mut self, text: &str) {
        let grid_size = self.round.grid_size();
        let feedback = TypedCoordinate::check(text, grid_size).preview_feedback(grid_size);
        self.emit(GameEngineEvent::InputFeedback(feedback));
    }

    fn submit_typed(&mut self, text: &str) {
        let grid_size = self.round.grid_size();
        match TypedCoordinate::check(text, grid_size) {
            TypedCoordinate::Empty | TypedCoordinate::Malformed => self.emit(
                GameEngineEvent::InputFeedback(Some(FORMAT_HINT.to_string())),
            ),
            TypedCoordinate::OutOfRange(coordinate) => {
                debug!(target: "game_engine", "Typed {} is off the grid", coordinate);
                self.emit(GameEngineEvent::InputFeedback(Some(range_hint(grid_size))));
            }
            TypedCoordinate::Valid(coordinate) => {
                self.emit(GameEngineEvent::InputFeedback(None));
                self.submit_guess(coordinate);
            }
        }
    }

    fn next_question(&mut self) {
        if !self.round.snapshot().can_advance() {
            debug!(target: "game_engine", "Next question only follows a correct answer mid-level");
            return;
        }
        self.round.advance_to_next();
        self.set_hint(None);
        self.emit_round();
    }

    fn level_up(&mut self) {
        if !self.round.is_active() || !self.round.is_level_complete() {
            debug!(target: "game_engine", "Level up requested before the level is complete");
            return;
        }
        let badges_before = self.progression.state().badges.len();
        self.dispatch(ProgressionEvent::NextLevel);
        let state = self.progression.state();
        let badge = if state.badges.len() > badges_before {
            state.badges.last().cloned()
        } else {
            None
        };
        let level = state.level;
        let tag = current_tag(state.stars);

        self.round.reset_level();
        self.set_hint(None);
        self.level_up_visible = true;
        self.level_up_timer.schedule(
            self.clock.now(),
            LEVEL_UP_BANNER_DURATION,
            self.round.generation(),
        );
        info!(target: "game_engine", "Level up to {}; badge {:?}", level, badge.as_ref().map(|b| &b.id));
        self.emit(GameEngineEvent::LeveledUp { level, badge, tag });
        self.emit(GameEngineEvent::LevelUpBannerChanged(true));
        self.emit_round();
    }

    fn reset(&mut self) {
        if self.progression.state().is_calm_mode {
            debug!(target: "game_engine", "Ignoring reset during calm mode");
            return;
        }
        self.dispatch(ProgressionEvent::ResetGame);
        self.set_hint(None);
        self.emit(GameEngineEvent::InputFeedback(None));
        if self.round.is_active() {
            self.round.reset_level();
            self.emit_round();
        }
    }

    fn show_hint(&mut self) {
        if self.progression.state().is_calm_mode {
            return;
        }
        let Some(target) = self.round.target() else {
            return;
        };
        self.hint_timer.schedule(
            self.clock.now(),
            HINT_DISPLAY_DURATION,
            self.round.generation(),
        );
        self.set_hint(Some(format!(
            "Count across to {}, then up to {}",
            target.x, target.y
        )));
    }

    fn handle_shortcut(&mut self, shortcut: Shortcut) {
        if !self.shortcut_throttle.try_accept(self.clock.now()) {
            trace!(target: "game_engine", "Throttled shortcut {:?}", shortcut);
            return;
        }
        match shortcut {
            Shortcut::CalmMode => {
                if !self.progression.state().is_calm_mode {
                    self.dispatch(ProgressionEvent::EnterCalmMode);
                }
            }
            Shortcut::Reset => self.reset(),
            Shortcut::Hint => self.show_hint(),
        }
    }

    fn change_settings(&mut self, change: &SettingsChange) {
        let settings = self.settings.update(change).clone();
        self.emit(GameEngineEvent::SettingsChanged(settings.clone()));
        if settings.grid_size != self.round.grid_size() {
            info!(target: "game_engine", "Grid size changed to {}", settings.grid_size);
            self.round.set_grid_size(settings.grid_size);
            if self.round.is_active() {
                self.set_hint(None);
                self.emit_round();
            }
        }
    }

    fn clear_saved_progress(&mut self) {
        self.progression.clear_saved_progress();
        self.emit(GameEngineEvent::ProgressionChanged(
            self.progression.state().clone(),
        ));
    }

    fn tick(&mut self) {
        let now = self.clock.now();
        if self.round.poll(now) {
            self.set_hint(None);
            self.emit_round();
        }
        if self.hint_timer.take_due(now).is_some() {
            self.set_hint(None);
        }
        if self.level_up_timer.take_due(now).is_some() && self.level_up_visible {
            self.level_up_visible = false;
            self.emit(GameEngineEvent::LevelUpBannerChanged(false));
        }
    }

    fn dispatch(&mut self, event: ProgressionEvent) {
        if self.progression.dispatch(event) {
            self.emit(GameEngineEvent::ProgressionChanged(
                self.progression.state().clone(),
            ));
        }
    }

    fn set_hint(&mut self, hint: Option<String>) {
        if hint.is_none() {
            self.hint_timer.cancel();
        }
        if self.hint != hint {
            self.hint = hint.clone();
            self.emit(GameEngineEvent::HintChanged(hint));
        }
    }

    fn emit_round(&self) {
        self.emit(GameEngineEvent::RoundChanged(self.round.snapshot()));
    }

    fn emit(&self, event: GameEngineEvent) {
        self.game_engine_event_emitter.emit(event);
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn progression(&self) -> &ProgressionState {
        self.progression.state()
    }

    pub fn round(&self) -> RoundState {
        self.round.snapshot()
    }

    pub fn settings(&self) -> &Settings {
        self.settings.current()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn is_level_up_visible(&self) -> bool {
        self.level_up_visible
    }

    pub fn summary(&self) -> ProgressSummary {
        self.progression.summary()
    }

    pub fn current_tag(&self) -> &'static MotivationalTag {
        self.progression.current_tag()
    }

    pub fn next_tag(&self) -> Option<&'static MotivationalTag> {
        self.progression.next_tag()
    }

    pub fn unlocked_tags(&self) -> Vec<&'static MotivationalTag> {
        self.progression.unlocked_tags()
    }
}
