use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Side length of the square play grid. Only 4, 6 and 8 are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct GridSize(u32);

impl GridSize {
    pub const FOUR: GridSize = GridSize(4);
    pub const SIX: GridSize = GridSize(6);
    pub const EIGHT: GridSize = GridSize(8);

    pub fn all() -> Vec<GridSize> {
        vec![GridSize::FOUR, GridSize::SIX, GridSize::EIGHT]
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        GridSize::SIX
    }
}

impl TryFrom<u32> for GridSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            4 | 6 | 8 => Ok(GridSize(value)),
            _ => Err(format!("unsupported grid size {}", value)),
        }
    }
}

impl From<GridSize> for u32 {
    fn from(size: GridSize) -> u32 {
        size.0
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.0, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_offered_sizes_parse() {
        assert_eq!(serde_json::from_str::<GridSize>("8").ok(), Some(GridSize::EIGHT));
        assert!(serde_json::from_str::<GridSize>("5").is_err());
        assert!(serde_json::from_str::<GridSize>("\"6\"").is_err());
        assert_eq!(serde_json::to_string(&GridSize::FOUR).ok(), Some("4".to_string()));
    }
}
