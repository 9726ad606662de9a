use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TypingEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived before the wait ran out; time to poll the session timers
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TypingEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports releases too; only presses type characters
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    tx.send(TypingEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(TypingEvent::Resize),
                Ok(_) => Ok(()),
                Err(_) => break,
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Upper bound on how long the runner idles between redraws
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TypingEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TypingEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Time left until `deadline_ms`, zero if it has already passed
pub fn until_deadline(now_ms: u64, deadline_ms: Option<u64>) -> Option<Duration> {
    deadline_ms.map(|due| Duration::from_millis(due.saturating_sub(now_ms)))
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks until the next event, the next timer deadline or the tick interval,
    /// whichever comes first. Returns Tick when nothing arrived.
    pub fn step(&self, next_timer: Option<Duration>) -> TypingEvent {
        let interval = self.ticker.interval();
        let wait = next_timer.map_or(interval, |d| d.min(interval));
        match self.event_source.recv_timeout(wait) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => TypingEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::mpsc;
    use std::time::Instant;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        assert_matches!(runner.step(None), TypingEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(TypingEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        assert_matches!(runner.step(None), TypingEvent::Resize);
    }

    #[test]
    fn step_wakes_for_timer_before_interval() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_secs(5)));

        let start = Instant::now();
        assert_matches!(runner.step(Some(Duration::from_millis(5))), TypingEvent::Tick);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn until_deadline_saturates() {
        assert_eq!(until_deadline(100, None), None);
        assert_eq!(until_deadline(100, Some(350)), Some(Duration::from_millis(250)));
        assert_eq!(until_deadline(400, Some(350)), Some(Duration::ZERO));
    }
}
