use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::settings::{ContentType, Difficulty, Settings, TimeLimit};
use crate::text_generator::DEFAULT_WORD_COUNT;

/// User preferences remembered between runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub difficulty: Difficulty,
    pub content_type: ContentType,
    pub time_limit: TimeLimit,
    pub sound_enabled: bool,
    pub word_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            content_type: ContentType::Words,
            time_limit: TimeLimit::Unlimited,
            sound_enabled: true,
            word_count: DEFAULT_WORD_COUNT,
        }
    }
}

impl Config {
    pub fn settings(&self) -> Settings {
        Settings {
            difficulty: self.difficulty,
            content_type: self.content_type,
            time_limit: self.time_limit,
            sound_enabled: self.sound_enabled,
        }
    }

    /// Take over the session settings, keeping `word_count`
    pub fn apply(&mut self, settings: Settings) {
        self.difficulty = settings.difficulty;
        self.content_type = settings.content_type;
        self.time_limit = settings.time_limit;
        self.sound_enabled = settings.sound_enabled;
    }
}

pub trait ConfigStore {
    /// Missing or unreadable config yields the defaults
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("typeghost_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "config unreadable, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
