pub mod paths;
pub mod settings;

pub use paths::PathManager;
pub use settings::{DEFAULT_API_KEY_ENV, Settings};

/// Load environment variables from .env files.
/// Variables already set win over file values, and ./.env is read before
/// ~/.env so project values take precedence over home values.
/// Call this before parsing CLI args to ensure env vars are available.
pub fn load_env_file() {
    dotenv::dotenv().ok();

    if let Some(home) = dirs::home_dir() {
        dotenv::from_path(home.join(".env")).ok();
    }
}
