use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    /// Root font size the view layer applies for this preference.
    pub fn base_font_px(&self) -> u32 {
        match self {
            TextSize::Small => 14,
            TextSize::Medium => 16,
            TextSize::Large => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum AnimationSpeed {
    #[default]
    #[serde(rename = "slow")]
    Slow,
    #[serde(rename = "very slow")]
    VerySlow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&TextSize::Large).ok(), Some("\"large\"".to_string()));
        assert_eq!(
            serde_json::from_str::<AnimationSpeed>("\"very slow\"").ok(),
            Some(AnimationSpeed::VerySlow)
        );
        assert_eq!(TextSize::default().base_font_px(), 16);
    }
}
