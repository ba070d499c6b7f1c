//! Application settings management

use crate::PathManager;
use llm::Sampling;
use llm::providers::openai::{DEFAULT_GROQ_MODEL, GROQ_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Application settings stored in settings.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Chat-completions endpoint root, without the `/chat/completions` suffix
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for Settings {
    fn default() -> Self {
        let sampling = Sampling::default();
        Self {
            base_url: GROQ_BASE_URL.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the settings file, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = PathManager::settings_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`. Missing or malformed files give defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };

        Self::from_toml_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), "ignoring malformed settings: {}", e);
            Self::default()
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse settings: {}", e))
    }

    /// Save settings to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config dir: {}", e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        fs::write(path, content).map_err(|e| format!("Failed to write settings: {}", e))?;
        Ok(())
    }

    /// Read the API key from the environment variable named by `api_key_env`.
    /// Empty values count as absent.
    pub fn api_key(&self) -> Option<String> {
        let key = std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if key.is_none() {
            warn!(var = %self.api_key_env, "no API key configured; requests will be rejected");
        }
        key
    }

    pub fn sampling(&self) -> Sampling {
        Sampling {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_target_groq() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(settings.model, "llama-3.3-70b-versatile");
        assert_eq!(settings.api_key_env, "GROQ_API_KEY");
        assert_eq!(settings.sampling(), Sampling::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml_str("model = \"llama-3.1-8b-instant\"\nmax_tokens = 256\n").unwrap();
        assert_eq!(settings.model, "llama-3.1-8b-instant");
        assert_eq!(settings.max_tokens, 256);
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.base_url, GROQ_BASE_URL);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(Settings::from_toml_str("temperature = \"hot\"").is_err());
    }

    #[test]
    fn test_save_then_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let settings = Settings {
            base_url: "http://localhost:8080/v1".to_string(),
            temperature: 0.2,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_or_broken_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load_from(&dir.path().join("absent.toml")), Settings::default());

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "max_tokens = [").unwrap();
        assert_eq!(Settings::load_from(&broken), Settings::default());
    }

    #[test]
    fn test_api_key_from_named_variable() {
        // SAFETY: the variable names are unique to this test.
        unsafe {
            std::env::set_var("TIMETRAVEL_TEST_KEY", "  gsk_test  ");
            std::env::set_var("TIMETRAVEL_TEST_BLANK", "   ");
        }

        let mut settings = Settings {
            api_key_env: "TIMETRAVEL_TEST_KEY".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.api_key().as_deref(), Some("gsk_test"));

        settings.api_key_env = "TIMETRAVEL_TEST_BLANK".to_string();
        assert_eq!(settings.api_key(), None);

        settings.api_key_env = "TIMETRAVEL_TEST_UNSET".to_string();
        assert_eq!(settings.api_key(), None);
    }
}
