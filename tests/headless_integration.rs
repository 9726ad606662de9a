use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use typeghost::audio::Silent;
use typeghost::clock::{Clock, ManualClock, SystemClock};
use typeghost::replay_store::ReplayStore;
use typeghost::runtime::{until_deadline, FixedTicker, Runner, TestEventSource, TypingEvent};
use typeghost::settings::{Settings, TimeLimit};
use typeghost::text_generator::FixedTextProvider;
use typeghost::{Completion, TypingTest};

fn real_time_test(text: &str, settings: Settings) -> (TypingTest, Arc<dyn Clock>) {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let test = TypingTest::new(
        settings,
        Box::new(FixedTextProvider::new(text)),
        ReplayStore::in_memory(),
        Box::new(Silent),
        Arc::clone(&clock),
    );
    (test, clock)
}

// Headless integration using the runtime + session core without a TTY.
// Verifies that a minimal typing flow completes via Runner/TestEventSource.
#[test]
fn headless_typing_flow_completes() {
    let (mut test, clock) = real_time_test("hi", Settings::default());

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_millis(5)));

    for c in ['h', 'i'] {
        tx.send(TypingEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
            .unwrap();
    }

    for _ in 0..100u32 {
        let wait = until_deadline(clock.now_ms(), test.next_deadline());
        if let TypingEvent::Key(key) = runner.step(wait) {
            if let KeyCode::Char(c) = key.code {
                let mut next = test.input().to_string();
                next.push(c);
                test.apply_input(&next);
            }
        }
        test.poll_timers();
        if test.is_complete() {
            break;
        }
    }

    assert!(test.is_complete(), "session should have finished typing");
    assert_eq!(test.completion(), Some(Completion::TextFinished));
    assert_eq!(test.accuracy(), 100);
    assert_eq!(test.progress(), 100.0);
    assert_eq!(test.pending_timers(), 0);
}

// Timed session on a hand-driven clock: every idle step advances a second
#[test]
fn headless_timed_session_finishes_by_time() {
    let clock = ManualClock::new(0);
    let mut test = TypingTest::new(
        Settings {
            time_limit: TimeLimit::Secs15,
            ..Settings::default()
        },
        Box::new(FixedTextProvider::new("hello")),
        ReplayStore::in_memory(),
        Box::new(Silent),
        Arc::new(clock.clone()),
    );

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_millis(1)));

    test.apply_input("h");

    for _ in 0..30u32 {
        if let TypingEvent::Tick = runner.step(None) {
            clock.advance(1_000);
            test.poll_timers();
        }
        if test.is_complete() {
            break;
        }
    }

    assert!(test.is_complete(), "timed session should finish by timeout");
    assert_eq!(test.completion(), Some(Completion::TimeUp));
    assert_eq!(test.state().ended_at, Some(15_000));
    assert_eq!(test.time_remaining(), 0);
    assert_eq!(test.input(), "h");
}
