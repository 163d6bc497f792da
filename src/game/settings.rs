use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

use super::storage::{load_json, save_json, SharedStore, SETTINGS_KEY};
use crate::model::{AnimationSpeed, Difficulty, GridSize, TextSize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    #[serde(default)]
    pub grid_size: GridSize,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub reduce_motion: bool,

    #[serde(default)]
    pub text_size: TextSize,

    #[serde(default)]
    pub animation_speed: AnimationSpeed,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sound_enabled: true,
            grid_size: GridSize::default(),
            difficulty: Difficulty::default(),
            reduce_motion: false,
            text_size: TextSize::default(),
            animation_speed: AnimationSpeed::default(),
        }
    }
}

impl Settings {
    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    /// `SEED` from the environment; unparseable values are ignored.
    pub fn seed_from_env() -> Option<u64> {
        let raw = std::env::var("SEED").ok()?;
        match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!(target: "settings", "Ignoring SEED={:?}; expected an unsigned integer", raw);
                None
            }
        }
    }

    pub fn apply(&mut self, change: &SettingsChange) {
        if let Some(sound_enabled) = change.sound_enabled {
            self.sound_enabled = sound_enabled;
        }
        if let Some(grid_size) = change.grid_size {
            self.grid_size = grid_size;
        }
        if let Some(difficulty) = change.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(reduce_motion) = change.reduce_motion {
            self.reduce_motion = reduce_motion;
        }
        if let Some(text_size) = change.text_size {
            self.text_size = text_size;
        }
        if let Some(animation_speed) = change.animation_speed {
            self.animation_speed = animation_speed;
        }
    }
}

/// Partial settings update. Also the parse target for saved blobs, so one bad
/// field falls back to its default without discarding the others.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsChange {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub sound_enabled: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub grid_size: Option<GridSize>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub reduce_motion: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub text_size: Option<TextSize>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub animation_speed: Option<AnimationSpeed>,
}

impl SettingsChange {
    pub fn sound_enabled(value: bool) -> Self {
        Self {
            sound_enabled: Some(value),
            ..Default::default()
        }
    }

    pub fn grid_size(value: GridSize) -> Self {
        Self {
            grid_size: Some(value),
            ..Default::default()
        }
    }

    pub fn difficulty(value: Difficulty) -> Self {
        Self {
            difficulty: Some(value),
            ..Default::default()
        }
    }

    pub fn reduce_motion(value: bool) -> Self {
        Self {
            reduce_motion: Some(value),
            ..Default::default()
        }
    }

    pub fn text_size(value: TextSize) -> Self {
        Self {
            text_size: Some(value),
            ..Default::default()
        }
    }

    pub fn animation_speed(value: AnimationSpeed) -> Self {
        Self {
            animation_speed: Some(value),
            ..Default::default()
        }
    }
}

/// Settings with their own persistence, independent of game progress.
pub struct SettingsStore {
    settings: Settings,
    store: SharedStore,
}

impl SettingsStore {
    pub fn load(store: SharedStore) -> Self {
        let mut settings = Settings::default();
        if let Some(saved) = load_json::<SettingsChange>(&store, SETTINGS_KEY) {
            settings.apply(&saved);
        }
        debug!(target: "settings", "Loaded settings {:?}", settings);
        Self { settings, store }
    }

    pub fn current(&self) -> &Settings {
        &self.settings
    }

    /// Applies `change` and writes the whole settings object.
    pub fn update(&mut self, change: &SettingsChange) -> &Settings {
        self.settings.apply(change);
        self.save();
        &self.settings
    }

    fn save(&self) {
        if let Err(err) = save_json(&self.store, SETTINGS_KEY, &self.settings) {
            warn!(target: "settings", "Failed to save settings: {}", err);
        }
    }
}
