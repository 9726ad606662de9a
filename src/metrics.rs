use crate::timing::{CharacterTiming, TypingProgress};

/// Characters per word used by every wpm figure
pub const CHARS_PER_WORD: f64 = 5.0;

/// Words per minute for `chars_typed` characters over `elapsed_secs` seconds.
///
/// Returns 0 when no time has elapsed.
pub fn wpm(chars_typed: usize, elapsed_secs: f64) -> u32 {
    if elapsed_secs <= 0.0 {
        return 0;
    }

    let words = chars_typed as f64 / CHARS_PER_WORD;
    let minutes = elapsed_secs / 60.0;

    (words / minutes).round() as u32
}

/// Percentage of correct characters, 100 when nothing has been typed yet
pub fn accuracy(correct_chars: usize, total_chars: usize) -> u32 {
    if total_chars == 0 {
        return 100;
    }

    let pct = (correct_chars as f64 / total_chars as f64) * 100.0;
    (pct.round() as u32).min(100)
}

/// Rebase a timing log so that its first entry sits at timestamp 0
pub fn normalize_timings(timings: &[CharacterTiming]) -> Vec<TypingProgress> {
    let Some(first) = timings.first() else {
        return Vec::new();
    };

    timings
        .iter()
        .map(|t| TypingProgress::new(t.timestamp.saturating_sub(first.timestamp), t.position))
        .collect()
}

/// Number of positions where the input matches the text
pub fn correct_chars(text: &str, input: &str) -> usize {
    text.chars()
        .zip(input.chars())
        .filter(|(expected, typed)| expected == typed)
        .count()
}

/// Share of the text covered by the cursor, in percent
pub fn progress(cursor_position: usize, text_len: usize) -> f64 {
    if text_len == 0 {
        return 100.0;
    }
    (cursor_position as f64 / text_len as f64) * 100.0
}

/// Feedback line shown once an attempt is complete
pub fn completion_message(accuracy: u32) -> &'static str {
    match accuracy {
        95.. => "Excellent! Your typing skills are impressive.",
        85..=94 => "Good job! Keep practicing to improve your speed and accuracy.",
        _ => "Nice try! Regular practice will help you improve.",
    }
}
