/// Global keyboard shortcuts available on the play screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    CalmMode,
    Reset,
    Hint,
}

impl Shortcut {
    /// Maps a DOM-style key name; modified presses (ctrl/meta) never map to Reset or Hint.
    pub fn from_key(key: &str, modified: bool) -> Option<Shortcut> {
        match key {
            "Escape" => Some(Shortcut::CalmMode),
            "r" | "R" if !modified => Some(Shortcut::Reset),
            "h" | "H" if !modified => Some(Shortcut::Hint),
            _ => None,
        }
    }
}
