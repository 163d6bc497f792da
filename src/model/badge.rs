use serde::{Deserialize, Serialize};

/// Trophy awarded when a milestone level is completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl Badge {
    fn new(id: &str, name: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }

    /// The badge earned by finishing `level`, if that level is a milestone.
    pub fn for_completed_level(level: u32) -> Option<Badge> {
        let badge = match level {
            1 => Badge::new("first-steps", "First Steps", "🐾"),
            2 => Badge::new("explorer", "Cave Explorer", "🦇"),
            3 => Badge::new("navigator", "Grid Navigator", "🗺️"),
            5 => Badge::new("pro-learner", "Pro Learner", "📚"),
            7 => Badge::new("champ", "Coordinate Champ", "🥇"),
            10 => Badge::new("master", "Cave Master", "🏆"),
            15 => Badge::new("legend", "Cave Legend", "👑"),
            _ => return None,
        };
        Some(badge)
    }
}
