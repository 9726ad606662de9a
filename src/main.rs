use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    sync::Arc,
    time::Duration,
};
use tracing::{info, warn};

use typeghost::{
    app_dirs::AppDirs,
    audio::TerminalBell,
    clock::{Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    logging::init_logging,
    replay_store::{ReplayStore, SqliteStore},
    runtime::{until_deadline, CrosstermEventSource, FixedTicker, Runner, TypingEvent},
    settings::{ContentType, Difficulty, TimeLimit},
    text_generator::{FixedTextProvider, TextProvider, WordListGenerator},
    typing_test::TypingTest,
};

/// Longest the loop idles without redrawing
const TICK_RATE_MS: u64 = 100;

/// typing practice in the terminal, racing a ghost of your last attempt
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing trainer with live wpm and accuracy, optional time limits, and a ghost cursor replaying your previous attempt at the same text."
)]
pub struct Cli {
    /// difficulty of the generated text
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// kind of text to practise on
    #[clap(short = 'c', long = "content", value_enum)]
    content_type: Option<ContentType>,

    /// time limit in seconds, 0 for none
    #[clap(short = 't', long, value_enum)]
    time_limit: Option<TimeLimit>,

    /// number of words per generated text
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// custom prompt to use instead of generated text
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// no bell on mistakes
    #[clap(long)]
    mute: bool,

    /// log verbosity, repeat for more (-v warn, -vv info, -vvv debug)
    #[clap(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// write logs here instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// keep replay records in memory only
    #[clap(long)]
    memory_store: bool,
}

impl Cli {
    /// Layer command line overrides on top of the saved config
    fn apply_to(&self, config: &mut Config) {
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(content_type) = self.content_type {
            config.content_type = content_type;
        }
        if let Some(time_limit) = self.time_limit {
            config.time_limit = time_limit;
        }
        if let Some(words) = self.words {
            config.word_count = words.max(1);
        }
        if self.mute {
            config.sound_enabled = false;
        }
    }

    fn text_provider(&self, config: &Config) -> Box<dyn TextProvider> {
        match &self.prompt {
            Some(prompt) => Box::new(FixedTextProvider::new(prompt.clone())),
            None => Box::new(WordListGenerator::new(config.word_count)),
        }
    }

    fn replay_store(&self) -> ReplayStore {
        if self.memory_store {
            return ReplayStore::in_memory();
        }
        let Some(path) = AppDirs::db_path() else {
            warn!("no state directory, replay records kept in memory");
            return ReplayStore::in_memory();
        };
        match SqliteStore::open(&path) {
            Ok(store) => ReplayStore::new(Box::new(store)),
            Err(err) => {
                warn!(path = %path.display(), %err, "replay database unavailable, using memory");
                ReplayStore::in_memory()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub test: TypingTest,
    pub config: Config,
    clock: Arc<dyn Clock>,
}

impl App {
    pub fn new(cli: &Cli, mut config: Config) -> Self {
        cli.apply_to(&mut config);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

        let test = TypingTest::new(
            config.settings(),
            cli.text_provider(&config),
            cli.replay_store(),
            Box::new(TerminalBell),
            Arc::clone(&clock),
        );

        Self {
            test,
            config,
            clock,
        }
    }

    /// Time until the session's next timer, for the runner to sleep on
    fn next_wakeup(&self) -> Option<Duration> {
        until_deadline(self.clock.now_ms(), self.test.next_deadline())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit
            }
            KeyCode::Char(c) => {
                let mut next = self.test.input().to_string();
                next.push(c);
                self.test.apply_input(&next);
            }
            KeyCode::Backspace => {
                let mut next = self.test.input().to_string();
                if next.pop().is_some() {
                    self.test.apply_input(&next);
                }
            }
            KeyCode::Tab => {
                self.test.retry();
            }
            KeyCode::Enter => self.test.new_text(),
            KeyCode::F(1) => {
                let next = self.test.settings().difficulty.next();
                self.test.set_difficulty(next);
            }
            KeyCode::F(2) => {
                let next = self.test.settings().content_type.next();
                self.test.set_content_type(next);
            }
            KeyCode::F(3) => {
                let next = self.test.settings().time_limit.next();
                self.test.set_time_limit(next);
            }
            KeyCode::F(4) => {
                self.test.toggle_sound();
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Config to persist on exit, with whatever was changed at runtime
    fn final_config(&self) -> Config {
        let mut config = self.config.clone();
        config.apply(self.test.settings());
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_file) = cli.log_file.clone().or_else(AppDirs::log_path) {
        if let Err(err) = init_logging(cli.verbose, &log_file) {
            eprintln!("typeghost: logging disabled: {err}");
        }
    }

    let config_store = FileConfigStore::new();
    let mut app = App::new(&cli, config_store.load());
    info!(settings = ?app.test.settings(), "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.test.shutdown();
    if let Err(err) = config_store.save(&app.final_config()) {
        warn!(%err, "could not save config");
    }

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| f.render_widget(app.test.view(), f.area()))?;

        match runner.step(app.next_wakeup()) {
            TypingEvent::Tick | TypingEvent::Resize => {}
            TypingEvent::Key(key) => {
                if app.handle_key(key) == Flow::Quit {
                    break;
                }
            }
        }
        app.test.poll_timers();
    }

    Ok(())
}
