use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::GridSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn is_within(&self, grid_size: GridSize) -> bool {
        self.x < grid_size.value() && self.y < grid_size.value()
    }

    /// Parses typed input such as `2,3`, `(2,3)` or ` ( 2 , 3 ) `.
    pub fn parse(input: &str) -> Option<Coordinate> {
        let trimmed = input.trim();
        let inner = match trimmed.strip_prefix('(') {
            Some(rest) => rest.trim_start(),
            None => trimmed,
        };
        let inner = match inner.strip_suffix(')') {
            Some(rest) => rest.trim_end(),
            None => inner,
        };
        let (x, y) = inner.split_once(',')?;
        Some(Coordinate {
            x: parse_digits(x)?,
            y: parse_digits(y)?,
        })
    }
}

/// Digits only; values too large for `u32` saturate, so they read as off the grid.
fn parse_digits(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(part.parse().unwrap_or(u32::MAX))
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Outcome of checking typed coordinate text against the current grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedCoordinate {
    Empty,
    Malformed,
    OutOfRange(Coordinate),
    Valid(Coordinate),
}

impl TypedCoordinate {
    pub fn check(input: &str, grid_size: GridSize) -> Self {
        if input.is_empty() {
            return TypedCoordinate::Empty;
        }
        match Coordinate::parse(input) {
            None => TypedCoordinate::Malformed,
            Some(coordinate) if coordinate.is_within(grid_size) => {
                TypedCoordinate::Valid(coordinate)
            }
            Some(coordinate) => TypedCoordinate::OutOfRange(coordinate),
        }
    }

    /// Inline feedback shown while the player is still typing.
    pub fn preview_feedback(&self, grid_size: GridSize) -> Option<String> {
        match self {
            TypedCoordinate::Empty => None,
            TypedCoordinate::Malformed => Some("💙 Type like: 2,3 or (2,3)".to_string()),
            TypedCoordinate::OutOfRange(_) => Some(range_hint(grid_size)),
            TypedCoordinate::Valid(_) => Some("✨ Great choice! Press Enter to check.".to_string()),
        }
    }
}

pub fn range_hint(grid_size: GridSize) -> String {
    format!("💙 Try numbers between 0 and {}", grid_size.value() - 1)
}

pub const FORMAT_HINT: &str = "💙 Let's try the format: 2,3";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_and_parenthesised() {
        assert_eq!(Coordinate::parse("2,3"), Some(Coordinate::new(2, 3)));
        assert_eq!(Coordinate::parse("(2,3)"), Some(Coordinate::new(2, 3)));
        assert_eq!(Coordinate::parse("  ( 4 , 0 )  "), Some(Coordinate::new(4, 0)));
        assert_eq!(Coordinate::parse("10,11"), Some(Coordinate::new(10, 11)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Coordinate::parse("2;3"), None);
        assert_eq!(Coordinate::parse("2,"), None);
        assert_eq!(Coordinate::parse("-1,2"), None);
        assert_eq!(Coordinate::parse("+1,2"), None);
        assert_eq!(Coordinate::parse("a,b"), None);
        assert_eq!(Coordinate::parse("1,2,3"), None);
        assert_eq!(Coordinate::parse(""), None);
    }

    #[test]
    fn test_check_against_grid() {
        let six = GridSize::SIX;
        assert_eq!(TypedCoordinate::check("", six), TypedCoordinate::Empty);
        assert_eq!(TypedCoordinate::check("x", six), TypedCoordinate::Malformed);
        assert_eq!(
            TypedCoordinate::check("5,5", six),
            TypedCoordinate::Valid(Coordinate::new(5, 5))
        );
        assert_eq!(
            TypedCoordinate::check("6,1", six),
            TypedCoordinate::OutOfRange(Coordinate::new(6, 1))
        );
    }

    #[test]
    fn test_huge_numbers_are_off_the_grid() {
        let six = GridSize::SIX;
        assert_eq!(
            TypedCoordinate::check("99999999999,1", six),
            TypedCoordinate::OutOfRange(Coordinate::new(u32::MAX, 1))
        );
        assert_eq!(
            TypedCoordinate::check("(2, 123456789012345)", six).preview_feedback(six),
            Some("💙 Try numbers between 0 and 5".to_string())
        );
    }

    #[test]
    fn test_preview_feedback_text() {
        let four = GridSize::FOUR;
        assert_eq!(TypedCoordinate::Empty.preview_feedback(four), None);
        assert_eq!(
            TypedCoordinate::check("9,9", four).preview_feedback(four),
            Some("💙 Try numbers between 0 and 3".to_string())
        );
        assert_eq!(
            TypedCoordinate::check("1 2", four).preview_feedback(four),
            Some("💙 Type like: 2,3 or (2,3)".to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(1, 4).to_string(), "(1, 4)");
    }
}
