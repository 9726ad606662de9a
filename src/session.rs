use crate::text_generator::TextId;
use crate::timing::{CharacterTiming, TypingProgress};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Text shown, nothing typed yet
    Idle,
    Running,
    /// Terminal until the next generate or retry
    Complete,
}

/// The authoritative record of one attempt at one text
#[derive(Debug, Clone)]
pub struct SessionState {
    pub text: String,
    pub text_id: TextId,
    pub input: String,
    pub started_at: Option<u64>,
    pub ended_at: Option<u64>,
    pub is_complete: bool,
    pub character_timings: Vec<CharacterTiming>,
    pub previous_progress: Option<Vec<TypingProgress>>,
}

impl SessionState {
    pub fn new(text: String, previous_progress: Option<Vec<TypingProgress>>) -> Self {
        let text_id = TextId::from_text(&text);
        Self {
            text,
            text_id,
            input: String::new(),
            started_at: None,
            ended_at: None,
            is_complete: false,
            character_timings: Vec::new(),
            previous_progress,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.is_complete, self.started_at) {
            (true, _) => Phase::Complete,
            (false, Some(_)) => Phase::Running,
            (false, None) => Phase::Idle,
        }
    }

    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Always the number of characters typed
    pub fn cursor_position(&self) -> usize {
        self.input.chars().count()
    }

    pub fn expected_char(&self, idx: usize) -> Option<char> {
        self.text.chars().nth(idx)
    }

    /// Back to a blank attempt at the same text
    pub fn clear_attempt(&mut self) {
        self.input.clear();
        self.started_at = None;
        self.ended_at = None;
        self.is_complete = false;
        self.character_timings.clear();
    }
}
