use serde::{Deserialize, Serialize};

use crate::helpers::Capitalize;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn key(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Difficulty::Easy => "🌱",
            Difficulty::Medium => "🌿",
            Difficulty::Hard => "🌳",
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.icon(), self.key().to_string().capitalize())
    }
}
