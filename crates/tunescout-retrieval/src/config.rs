use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tunescout_core::ModePolicy;
use tunescout_search::DEFAULT_TOP_K;

/// Configuration for tunescout.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (TUNESCOUT_* prefix)
/// 3. Config file (~/.config/tunescout/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenAI API key used to translate requests into filters.
    ///
    /// Can be set via:
    /// - ENV: TUNESCOUT_OPENAI_API_KEY, or OPENAI_API_KEY as a fallback
    /// - Config: openai_api_key = "..."
    pub openai_api_key: Option<String>,

    /// Path to the tune corpus (a TheSession `tunes.json` dump).
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/tunes.json
    /// - ENV: TUNESCOUT_DATABASE_PATH
    /// - Config: database_path = "/path/to/tunes.json"
    /// - Default: ~/.local/share/tunescout/tunes.json
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Tunes returned per filter.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Chat model used for query translation.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the chat-completions API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retries for transient translation failures. 0 disables retrying.
    #[serde(default)]
    pub max_retries: usize,

    /// Handling of corpus rows with an empty mode field: "fail" or "skip".
    #[serde(default)]
    pub malformed_mode: ModePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            database_path: default_db_path(),
            top_k: default_top_k(),
            model: default_model(),
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: 0,
            malformed_mode: ModePolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/tunescout/config.toml
    /// Reads environment variables with TUNESCOUT_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("tunescout");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let mut config: Self = builder.build()
            .context("Failed to build configuration")?;

        if config.openai_api_key.is_none() {
            config.openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        Ok(config)
    }

    /// Load configuration, then apply CLI overrides.
    pub fn load_with_overrides(db_path: Option<PathBuf>, top_k: Option<usize>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(db_path) = db_path {
            config.database_path = db_path;
        }
        if let Some(top_k) = top_k {
            config.top_k = top_k;
        }
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be served.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.top_k > 0, "top_k must be at least 1");
        anyhow::ensure!(
            self.request_timeout_secs > 0,
            "request_timeout_secs must be at least 1"
        );
        Ok(())
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tunescout")
        .join("tunes.json")
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_model() -> String {
    String::from("gpt-3.5-turbo")
}

fn default_api_base() -> String {
    String::from("https://api.openai.com/v1")
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/tunescout/config.toml
/// - macOS: ~/Library/Application Support/tunescout/config.toml
/// - Windows: %APPDATA%\tunescout\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tunescout")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Tunescout Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (TUNESCOUT_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# OpenAI API key used to turn requests into tune filters
#
# Can also be set via:
# - Environment: TUNESCOUT_OPENAI_API_KEY=your-key-here
# - Environment: OPENAI_API_KEY=your-key-here
openai_api_key = "your-openai-api-key-here"

# Path to the tune corpus
#
# A JSON dump in the format of https://github.com/adactio/TheSession-data
# (json/tunes.json)
#
# Can also be set via:
# - CLI: tunescout --db /custom/tunes.json query "a slow hornpipe"
# - Environment: TUNESCOUT_DATABASE_PATH=/custom/tunes.json
#
# Default: Platform-specific data directory
#database_path = "/path/to/tunes.json"

# Tunes returned per filter
#top_k = 3

# Chat model and endpoint used for query translation
#model = "gpt-3.5-turbo"
#api_base = "https://api.openai.com/v1"
#request_timeout_secs = 30

# Retries for transient translation failures (rate limits, 5xx, timeouts)
#max_retries = 0

# Corpus rows with an empty mode field: "fail" aborts loading, "skip" drops
# the row with a warning
#malformed_mode = "fail"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.database_path.as_os_str().is_empty());
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.top_k, 3);
        assert_eq!(config.malformed_mode, ModePolicy::Fail);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_overrides() {
        let custom_path = PathBuf::from("/tmp/tunes.json");
        let config = Config::load_with_overrides(Some(custom_path.clone()), Some(5)).unwrap();
        assert_eq!(config.database_path, custom_path);
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let config = Config {
            top_k: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "openai_api_key": "sk-test",
            "malformed_mode": "skip"
        }))
        .unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.malformed_mode, ModePolicy::Skip);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_retries, 0);
    }
}
