use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Size of the word pool a text is drawn from
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// Flavour of generated text
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentType {
    #[default]
    Words,
    Punctuation,
    Numbers,
    Mixed,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Words,
        ContentType::Punctuation,
        ContentType::Numbers,
        ContentType::Mixed,
    ];

    pub fn next(self) -> Self {
        match self {
            ContentType::Words => ContentType::Punctuation,
            ContentType::Punctuation => ContentType::Numbers,
            ContentType::Numbers => ContentType::Mixed,
            ContentType::Mixed => ContentType::Words,
        }
    }

    pub fn has_punctuation(self) -> bool {
        matches!(self, ContentType::Punctuation | ContentType::Mixed)
    }

    pub fn has_numbers(self) -> bool {
        matches!(self, ContentType::Numbers | ContentType::Mixed)
    }
}

/// Time budget of a session; `Unlimited` runs until the text is typed
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeLimit {
    #[default]
    #[value(name = "0")]
    Unlimited,
    #[value(name = "15")]
    Secs15,
    #[value(name = "30")]
    Secs30,
    #[value(name = "60")]
    Secs60,
    #[value(name = "120")]
    Secs120,
}

impl TimeLimit {
    pub fn as_secs(self) -> u32 {
        match self {
            TimeLimit::Unlimited => 0,
            TimeLimit::Secs15 => 15,
            TimeLimit::Secs30 => 30,
            TimeLimit::Secs60 => 60,
            TimeLimit::Secs120 => 120,
        }
    }

    pub fn is_unlimited(self) -> bool {
        self == TimeLimit::Unlimited
    }

    pub fn next(self) -> Self {
        match self {
            TimeLimit::Unlimited => TimeLimit::Secs15,
            TimeLimit::Secs15 => TimeLimit::Secs30,
            TimeLimit::Secs30 => TimeLimit::Secs60,
            TimeLimit::Secs60 => TimeLimit::Secs120,
            TimeLimit::Secs120 => TimeLimit::Unlimited,
        }
    }
}

impl TryFrom<u32> for TimeLimit {
    type Error = String;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        match secs {
            0 => Ok(TimeLimit::Unlimited),
            15 => Ok(TimeLimit::Secs15),
            30 => Ok(TimeLimit::Secs30),
            60 => Ok(TimeLimit::Secs60),
            120 => Ok(TimeLimit::Secs120),
            other => Err(format!("unsupported time limit: {other}s")),
        }
    }
}

impl From<TimeLimit> for u32 {
    fn from(limit: TimeLimit) -> Self {
        limit.as_secs()
    }
}

impl std::fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeLimit::Unlimited => write!(f, "no limit"),
            limit => write!(f, "{}s", limit.as_secs()),
        }
    }
}

/// Everything a session is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub content_type: ContentType,
    pub time_limit: TimeLimit,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            content_type: ContentType::Words,
            time_limit: TimeLimit::Unlimited,
            sound_enabled: true,
        }
    }
}
