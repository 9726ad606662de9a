use std::io::{self, Write};
use tracing::trace;

/// Keystroke feedback. Fire-and-forget: implementations swallow their own failures.
pub trait AudioFeedback {
    fn notify(&self, correct: bool);
}

/// Rings the terminal bell on mistakes; correct keys stay quiet
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AudioFeedback for TerminalBell {
    fn notify(&self, correct: bool) {
        if correct {
            return;
        }
        let mut out = io::stdout();
        if let Err(err) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            trace!(%err, "bell unavailable");
        }
    }
}

/// No feedback at all
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioFeedback for Silent {
    fn notify(&self, _correct: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_accepts_anything() {
        let audio: Box<dyn AudioFeedback> = Box::new(Silent);
        audio.notify(true);
        audio.notify(false);
    }

    #[test]
    fn bell_ignores_correct_keys() {
        TerminalBell.notify(true);
    }
}
