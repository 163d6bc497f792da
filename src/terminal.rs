use itertools::Itertools;
use log::warn;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::io::Write;

use coordinate_cave::events::EventHandler;
use coordinate_cave::game::SettingsChange;
use coordinate_cave::model::{
    GameEngineCommand, GameEngineEvent, GridSize, MotivationalTag, ProgressSummary,
    ProgressionState, RoundPhase, RoundState, Shortcut,
};

pub const HELP: &str = "\
Commands:
  x,y or (x,y)   guess a cell
  n              next question
  l              level up (after 5 correct answers)
  r              start the level over
  h              hint
  p              pause / resume
  c / x          enter / leave calm mode
  esc            calm mode shortcut
  f              finish game
  g <4|6|8>      change grid size
  d <easy|medium|hard>
                 change difficulty
  t <small|medium|large>
                 change text size
  sound <on|off>, motion <on|off>, speed <slow|very-slow>
                 other settings (motion off reduces animation)
  s              progress summary
  reset-progress forget all saved progress
  ?              this help
  q              quit
Press Enter on an empty line to let time pass.";

#[derive(Debug, Clone)]
pub enum HostCommand {
    Engine(GameEngineCommand),
    Summary,
    Help,
    Idle,
    Quit,
}

/// Parses a settings value by its saved wire name; dashes stand for spaces.
fn parse_setting<T: DeserializeOwned>(word: Option<&str>, expected: &str) -> Result<T, String> {
    word.and_then(|word| {
        serde_json::from_value(serde_json::Value::String(word.replace('-', " "))).ok()
    })
    .ok_or_else(|| format!("Expected {}", expected))
}

fn parse_switch(word: Option<&str>) -> Result<bool, String> {
    match word {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err("Expected on or off".to_string()),
    }
}

pub fn parse_command(line: &str) -> Result<HostCommand, String> {
    let line = line.trim();
    if line.contains(',') {
        return Ok(HostCommand::Engine(
            GameEngineCommand::SubmitTypedCoordinate(line.to_string()),
        ));
    }
    let mut words = line.split_whitespace();
    let command = match words.next() {
        None => return Ok(HostCommand::Idle),
        Some(word) => word,
    };
    let engine = |command: GameEngineCommand| -> Result<HostCommand, String> {
        Ok(HostCommand::Engine(command))
    };
    let shortcut = |key: &str| -> Result<HostCommand, String> {
        Shortcut::from_key(key, false)
            .map(|shortcut| HostCommand::Engine(GameEngineCommand::Shortcut(shortcut)))
            .ok_or_else(|| format!("No shortcut for {:?}", key))
    };
    match command {
        "n" => engine(GameEngineCommand::NextQuestion),
        "l" => engine(GameEngineCommand::LevelUp),
        "r" | "h" => shortcut(command),
        "esc" => shortcut("Escape"),
        "p" => engine(GameEngineCommand::TogglePause),
        "c" => engine(GameEngineCommand::EnterCalmMode),
        "x" => engine(GameEngineCommand::ExitCalmMode),
        "f" => engine(GameEngineCommand::FinishGame),
        "g" => {
            let size = words
                .next()
                .and_then(|word| word.parse::<u32>().ok())
                .and_then(|value| GridSize::try_from(value).ok())
                .ok_or_else(|| "Grid size must be 4, 6 or 8".to_string())?;
            engine(GameEngineCommand::ChangeSettings(SettingsChange::grid_size(
                size,
            )))
        }
        "d" => engine(GameEngineCommand::ChangeSettings(SettingsChange::difficulty(
            parse_setting(words.next(), "easy, medium or hard")?,
        ))),
        "t" => engine(GameEngineCommand::ChangeSettings(SettingsChange::text_size(
            parse_setting(words.next(), "small, medium or large")?,
        ))),
        "speed" => engine(GameEngineCommand::ChangeSettings(
            SettingsChange::animation_speed(parse_setting(words.next(), "slow or very-slow")?),
        )),
        "sound" => engine(GameEngineCommand::ChangeSettings(
            SettingsChange::sound_enabled(parse_switch(words.next())?),
        )),
        "motion" => engine(GameEngineCommand::ChangeSettings(
            SettingsChange::reduce_motion(!parse_switch(words.next())?),
        )),
        "reset-progress" => engine(GameEngineCommand::ClearSavedProgress),
        "s" => Ok(HostCommand::Summary),
        "?" | "help" => Ok(HostCommand::Help),
        "q" | "quit" => Ok(HostCommand::Quit),
        other => Err(format!("Unknown command {:?}; type ? for help", other)),
    }
}

pub fn format_summary(summary: &ProgressSummary, unlocked: &[&MotivationalTag]) -> String {
    let badges = if summary.badges.is_empty() {
        "none yet".to_string()
    } else {
        summary
            .badges
            .iter()
            .map(|badge| format!("{} {}", badge.icon, badge.name))
            .join(", ")
    };
    let next = match (summary.next_tag, summary.stars_to_next_tag) {
        (Some(tag), Some(stars)) => format!("{} more ⭐ to {} {}", stars, tag.icon, tag.title),
        _ => "every title unlocked!".to_string(),
    };
    format!(
        "Games played: {}\nAccuracy: {}%\nStars: {}\nLevels done: {}\nBadges: {}\nTitle: {} {} ({})\nTitles unlocked: {}",
        summary.games_played,
        summary.accuracy_percent,
        summary.stars,
        summary.levels_done,
        badges,
        summary.current_tag.icon,
        summary.current_tag.title,
        next,
        unlocked.iter().map(|tag| tag.icon).join(" ")
    )
}

/// Prints engine events as plain lines and redraws the grid for every new target.
pub struct TerminalRenderer<W: Write> {
    out: W,
    grid_size: GridSize,
    last_round: Option<RoundState>,
    debug: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, grid_size: GridSize, debug: bool) -> Self {
        Self {
            out,
            grid_size,
            last_round: None,
            debug,
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(err) = writeln!(self.out, "{}", text) {
            warn!(target: "terminal", "Failed to write output: {}", err);
        }
    }

    fn draw_grid(&mut self) {
        let size = self.grid_size.value();
        for y in (0..size).rev() {
            let row = (0..size).map(|_| "·").join(" ");
            self.line(format!("{:>2} │ {}", y, row));
        }
        self.line(format!("   └{}", "──".repeat(size as usize)));
        self.line(format!("     {}", (0..size).join(" ")));
    }

    fn show_status(&mut self, state: &ProgressionState) {
        let mode = if state.is_calm_mode {
            " · calm mode 🌙"
        } else if state.is_paused {
            " · paused"
        } else {
            ""
        };
        self.line(format!(
            "⭐ {} · score {} · level {}{}",
            state.stars, state.score, state.level, mode
        ));
    }

    fn show_round(&mut self, round: &RoundState) {
        if self.debug {
            match serde_json::to_string(round) {
                Ok(json) => self.line(format!("[round] {}", json)),
                Err(err) => warn!(target: "terminal", "Failed to serialize round: {}", err),
            }
        }

        let previous = self.last_round.replace(round.clone());
        let new_target = previous
            .as_ref()
            .map_or(true, |previous| previous.generation != round.generation);
        if new_target {
            if let Some(target) = round.target {
                self.draw_grid();
                self.line(format!(
                    "💎 Find the crystal at {} ({}/{})",
                    target,
                    (round.questions_in_level + 1).min(round.questions_per_level),
                    round.questions_per_level
                ));
            }
            return;
        }

        let phase_changed = previous.map_or(true, |previous| previous != *round);
        if !phase_changed || round.phase == RoundPhase::AwaitingAnswer {
            return;
        }
        if let Some(message) = &round.message {
            self.line(message);
        }
        if round.is_level_complete() {
            self.line("🏁 Level complete! Type l to level up.");
        }
    }
}

impl<W: Write> EventHandler<GameEngineEvent> for TerminalRenderer<W> {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::SessionStarted(session_id) => {
                self.line("🦇 Welcome to Coordinate Cave!");
                if self.debug {
                    self.line(format!("[session] {}", session_id));
                }
            }
            GameEngineEvent::ProgressionChanged(state) => self.show_status(state),
            GameEngineEvent::RoundChanged(round) => self.show_round(round),
            GameEngineEvent::GuessResolved {
                coordinate,
                correct,
            } => {
                let mark = if *correct { "✔" } else { "✘" };
                self.line(format!("{} {}", mark, coordinate));
            }
            GameEngineEvent::LeveledUp { level, badge, tag } => {
                self.line(format!("🎉 Level {}! You are a {} {}", level, tag.icon, tag.title));
                if let Some(badge) = badge {
                    self.line(format!("New badge: {} {}", badge.icon, badge.name));
                }
            }
            GameEngineEvent::LevelUpBannerChanged(_) => {}
            GameEngineEvent::HintChanged(Some(hint)) => self.line(format!("💡 {}", hint)),
            GameEngineEvent::HintChanged(None) => {}
            GameEngineEvent::InputFeedback(Some(feedback)) => self.line(feedback),
            GameEngineEvent::InputFeedback(None) => {}
            GameEngineEvent::SettingsChanged(settings) => {
                self.grid_size = settings.grid_size;
                self.line(format!(
                    "Settings saved; grid is {} · {} · text {}px · sound {}",
                    settings.grid_size,
                    settings.difficulty.label(),
                    settings.text_size.base_font_px(),
                    if settings.sound_enabled { "on" } else { "off" }
                ));
            }
            GameEngineEvent::SessionEnded => {
                self.last_round = None;
                self.line("👋 See you next time, explorer!");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coordinate_cave::game::Settings;
    use coordinate_cave::model::{
        AnimationSpeed, Badge, Coordinate, Difficulty, TextSize, MOTIVATIONAL_TAGS,
    };

    fn rendered(events: &[GameEngineEvent]) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new(), GridSize::FOUR, false);
        for event in events {
            renderer.handle_event(event);
        }
        String::from_utf8(renderer.output().clone()).unwrap()
    }

    fn round(generation: u64, phase: RoundPhase, questions_in_level: u32) -> RoundState {
        RoundState {
            target: Some(Coordinate::new(2, 3)),
            streak: 0,
            questions_in_level,
            questions_per_level: 5,
            phase,
            message: match phase {
                RoundPhase::AwaitingAnswer => None,
                _ => Some("Great job! You found it! ⭐".to_string()),
            },
            generation,
            auto_advance_pending: false,
        }
    }

    #[test]
    fn test_parse_commands() {
        assert!(matches!(
            parse_command(" (2, 3) "),
            Ok(HostCommand::Engine(GameEngineCommand::SubmitTypedCoordinate(text))) if text == "(2, 3)"
        ));
        assert!(matches!(
            parse_command("r"),
            Ok(HostCommand::Engine(GameEngineCommand::Shortcut(Shortcut::Reset)))
        ));
        assert!(matches!(
            parse_command("esc"),
            Ok(HostCommand::Engine(GameEngineCommand::Shortcut(Shortcut::CalmMode)))
        ));
        assert!(matches!(
            parse_command("x"),
            Ok(HostCommand::Engine(GameEngineCommand::ExitCalmMode))
        ));
        assert!(matches!(
            parse_command("g 8"),
            Ok(HostCommand::Engine(GameEngineCommand::ChangeSettings(change)))
                if change.grid_size == Some(GridSize::EIGHT)
        ));
        assert!(parse_command("g 5").is_err());
        assert!(matches!(
            parse_command("d hard"),
            Ok(HostCommand::Engine(GameEngineCommand::ChangeSettings(change)))
                if change.difficulty == Some(Difficulty::Hard)
        ));
        assert!(matches!(
            parse_command("t large"),
            Ok(HostCommand::Engine(GameEngineCommand::ChangeSettings(change)))
                if change.text_size == Some(TextSize::Large)
        ));
        assert!(matches!(
            parse_command("speed very-slow"),
            Ok(HostCommand::Engine(GameEngineCommand::ChangeSettings(change)))
                if change.animation_speed == Some(AnimationSpeed::VerySlow)
        ));
        assert!(matches!(
            parse_command("sound off"),
            Ok(HostCommand::Engine(GameEngineCommand::ChangeSettings(change)))
                if change.sound_enabled == Some(false)
        ));
        assert!(matches!(
            parse_command("motion off"),
            Ok(HostCommand::Engine(GameEngineCommand::ChangeSettings(change)))
                if change.reduce_motion == Some(true)
        ));
        assert!(matches!(
            parse_command("reset-progress"),
            Ok(HostCommand::Engine(GameEngineCommand::ClearSavedProgress))
        ));
        assert!(parse_command("d impossible").is_err());
        assert!(parse_command("sound").is_err());
        assert!(parse_command("jump").is_err());
        assert!(matches!(parse_command(""), Ok(HostCommand::Idle)));
        assert!(matches!(parse_command("q"), Ok(HostCommand::Quit)));
    }

    #[test]
    fn test_new_target_draws_grid_once() {
        let output = rendered(&[
            GameEngineEvent::RoundChanged(round(1, RoundPhase::AwaitingAnswer, 0)),
            GameEngineEvent::RoundChanged(round(1, RoundPhase::CorrectShown, 1)),
        ]);
        assert_eq!(output.matches("Find the crystal at (2, 3) (1/5)").count(), 1);
        assert!(output.contains(" 3 │ · · · ·"));
        assert!(output.contains("     0 1 2 3"));
        assert!(output.contains("Great job! You found it! ⭐"));
        assert!(!output.contains("Level complete"));
    }

    #[test]
    fn test_level_complete_prompt() {
        let output = rendered(&[
            GameEngineEvent::RoundChanged(round(5, RoundPhase::AwaitingAnswer, 4)),
            GameEngineEvent::RoundChanged(round(5, RoundPhase::CorrectShown, 5)),
            GameEngineEvent::LeveledUp {
                level: 2,
                badge: Badge::for_completed_level(1),
                tag: &MOTIVATIONAL_TAGS[1],
            },
        ]);
        assert!(output.contains("Level complete! Type l to level up."));
        assert!(output.contains("🎉 Level 2! You are a 🦇 Cave Explorer"));
        assert!(output.contains("New badge: 🐾 First Steps"));
    }

    #[test]
    fn test_settings_line() {
        let settings = Settings {
            grid_size: GridSize::EIGHT,
            difficulty: Difficulty::Medium,
            text_size: TextSize::Large,
            sound_enabled: false,
            ..Settings::default()
        };
        let output = rendered(&[GameEngineEvent::SettingsChanged(settings)]);
        assert!(output.contains("Settings saved; grid is 8×8 · 🌿 Medium · text 20px · sound off"));
    }

    #[test]
    fn test_summary_lists_badges() {
        let state = ProgressionState {
            stars: 12,
            total_games: 3,
            correct_answers: 12,
            total_answers: 14,
            badges: vec![
                Badge::for_completed_level(1).unwrap(),
                Badge::for_completed_level(2).unwrap(),
            ],
            levels_completed: vec![1, 2],
            ..ProgressionState::default()
        };
        let unlocked: Vec<&MotivationalTag> = MOTIVATIONAL_TAGS.iter().take(3).collect();
        let text = format_summary(&ProgressSummary::from_state(&state), &unlocked);
        assert!(text.contains("Accuracy: 86%"));
        assert!(text.contains("Badges: 🐾 First Steps, 🦇 Cave Explorer"));
        assert!(text.contains("Title: 📚 Pro Learner (3 more ⭐ to 🗺️ Grid Navigator)"));
        assert!(text.contains("Titles unlocked: 🌱 🦇 📚"));
    }
}
