use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typeghost";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    /// `$HOME/.local/state/typeghost`, falling back to the platform data dir
    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            Self::project_dirs().map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|pd| pd.config_dir().join("config.json"))
    }

    /// Replay record database
    pub fn db_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("replays.db"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("typeghost.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_files_share_a_directory() {
        let (Some(db), Some(log)) = (AppDirs::db_path(), AppDirs::log_path()) else {
            return;
        };
        assert_eq!(db.parent(), log.parent());
        assert!(db.ends_with("replays.db"));
        assert!(log.ends_with("typeghost.log"));
    }
}
