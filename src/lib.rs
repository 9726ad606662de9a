// Library surface for the binary, headless/integration tests and reuse.
pub mod app_dirs;
pub mod audio;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod ghost;
pub mod live_metrics;
pub mod logging;
pub mod metrics;
pub mod replay_store;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod text_generator;
pub mod timing;
pub mod ui;

pub use error::{Error, Result};
pub use typing_test::{Completion, InputOutcome, SessionView, TypingTest};
