use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static CONFIG_DIR_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

pub struct PathManager;

impl PathManager {
    /// Use a custom configuration directory instead of the platform default.
    /// Logs then live under it too.
    pub fn set_config_dir(path: PathBuf) {
        let _ = CONFIG_DIR_OVERRIDE.set(path);
    }

    pub fn config_dir() -> Option<PathBuf> {
        if let Some(d) = CONFIG_DIR_OVERRIDE.get() {
            return Some(d.clone());
        }
        dirs::config_dir().map(|d| d.join("timetravel"))
    }

    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.toml"))
    }

    pub fn logs_dir() -> Option<PathBuf> {
        logs_dir_for(CONFIG_DIR_OVERRIDE.get().map(PathBuf::as_path))
    }

    pub fn log_file_path() -> Option<PathBuf> {
        Self::logs_dir().map(|d| d.join("timetravel.log"))
    }
}

fn logs_dir_for(config_override: Option<&Path>) -> Option<PathBuf> {
    match config_override {
        Some(dir) => Some(dir.join("logs")),
        None => dirs::data_local_dir().map(|d| d.join("timetravel").join("logs")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_their_directories() {
        if let (Some(dir), Some(file)) = (PathManager::config_dir(), PathManager::settings_path()) {
            assert_eq!(file, dir.join("settings.toml"));
        }
        if let (Some(dir), Some(file)) = (PathManager::logs_dir(), PathManager::log_file_path()) {
            assert_eq!(file, dir.join("timetravel.log"));
        }
    }

    #[test]
    fn test_logs_follow_config_dir_override() {
        let dir = Path::new("/tmp/timetravel-custom");
        assert_eq!(logs_dir_for(Some(dir)), Some(dir.join("logs")));

        if let Some(default) = logs_dir_for(None) {
            assert!(default.ends_with("timetravel/logs"));
        }
    }
}
