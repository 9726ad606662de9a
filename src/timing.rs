use serde::{Deserialize, Serialize};

/// A keystroke that extended the input, captured at the moment it was accepted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterTiming {
    pub char: char,
    /// Milliseconds on the session clock
    pub timestamp: u64,
    /// Index into the text the character was typed at
    pub position: usize,
}

/// One step of a recorded attempt, as replayed by the ghost cursor.
///
/// Timestamps are relative to the first keystroke of the attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingProgress {
    pub timestamp: u64,
    pub position: usize,
}

impl TypingProgress {
    pub fn new(timestamp: u64, position: usize) -> Self {
        Self {
            timestamp,
            position,
        }
    }
}

impl From<(u64, usize)> for TypingProgress {
    fn from(v: (u64, usize)) -> Self {
        TypingProgress::new(v.0, v.1)
    }
}
