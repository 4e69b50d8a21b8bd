//! TOML Configuration File Support
//!
//! Configuration lives at `$XDG_CONFIG_HOME/terminalx/terminalx.toml`.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5001"
//! chat_path = "/api/chat"
//! fallback_path = "/api/chat/fallback"
//! timeout_ms = 5000
//! send_session_id = true
//!
//! [session]
//! thinking_min_ms = 500
//! thinking_max_ms = 2000
//! typing_interval_ms = 30
//! status_delay_ms = 1000
//! seed = 42
//!
//! [movies]
//! base_url = "https://api.themoviedb.org/3"
//! api_key = "..."
//! language = "en-US"
//! ```

use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the configuration came from (the highest layer that applied)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[api]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiToml {
    /// Base URL of the chat/blog service
    pub base_url: Option<String>,
    /// Path of the primary chat endpoint
    pub chat_path: Option<String>,
    /// Path of the fallback chat endpoint
    pub fallback_path: Option<String>,
    /// Request timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Whether the primary request carries `sessionId`
    pub send_session_id: Option<bool>,
}

/// `[session]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionToml {
    /// Lower bound of the thinking delay
    pub thinking_min_ms: Option<u64>,
    /// Upper bound of the thinking delay
    pub thinking_max_ms: Option<u64>,
    /// Typewriter interval per character
    pub typing_interval_ms: Option<u64>,
    /// Delay before the STATUS reshuffle
    pub status_delay_ms: Option<u64>,
    /// Seed for the delay/status random source
    pub seed: Option<u64>,
}

/// `[movies]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoviesToml {
    /// TMDB API base URL
    pub base_url: Option<String>,
    /// TMDB API key
    pub api_key: Option<String>,
    /// Response language
    pub language: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalToml {
    /// Chat service section
    pub api: ApiToml,
    /// Session pacing section
    pub session: SessionToml,
    /// Movie metadata section
    pub movies: MoviesToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Chat and blog service settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, no trailing slash
    pub base_url: String,
    /// Primary chat path
    pub chat_path: String,
    /// Fallback chat path
    pub fallback_path: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Whether the primary request carries `sessionId`
    pub send_session_id: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            chat_path: "/api/chat".to_string(),
            fallback_path: "/api/chat/fallback".to_string(),
            timeout_ms: 5000,
            send_session_id: true,
        }
    }
}

impl ApiConfig {
    /// Config pointing at another base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Join a path onto the base URL
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Primary chat endpoint URL
    #[must_use]
    pub fn chat_url(&self) -> String {
        self.url(&self.chat_path)
    }

    /// Fallback chat endpoint URL
    #[must_use]
    pub fn fallback_url(&self) -> String {
        self.url(&self.fallback_path)
    }

    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Session pacing settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Lower bound of the thinking delay (ms)
    pub thinking_min_ms: u64,
    /// Upper bound of the thinking delay (ms)
    pub thinking_max_ms: u64,
    /// Typewriter interval (ms)
    pub typing_interval_ms: u64,
    /// Delay before the STATUS reshuffle (ms)
    pub status_delay_ms: u64,
    /// Random seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            thinking_min_ms: 500,
            thinking_max_ms: 2000,
            typing_interval_ms: 30,
            status_delay_ms: 1000,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Thinking delay range
    #[must_use]
    pub fn thinking_range(&self) -> RangeInclusive<Duration> {
        Duration::from_millis(self.thinking_min_ms)..=Duration::from_millis(self.thinking_max_ms)
    }

    /// Typewriter interval
    #[must_use]
    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }

    /// STATUS reshuffle delay
    #[must_use]
    pub fn status_delay(&self) -> Duration {
        Duration::from_millis(self.status_delay_ms)
    }
}

/// Movie metadata settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieConfig {
    /// TMDB base URL
    pub base_url: String,
    /// TMDB API key; without one every request falls back locally
    pub api_key: Option<String>,
    /// Response language
    pub language: String,
}

impl Default for MovieConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key: None,
            language: "en-US".to_string(),
        }
    }
}

/// Centralized configuration for the terminal
///
/// Use [`load_config`] to load configuration with proper priority handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Chat and blog service
    pub api: ApiConfig,
    /// Session pacing
    pub session: SessionConfig,
    /// Movie metadata
    pub movies: MovieConfig,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    /// Highest layer that contributed a value
    source: ConfigSource,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            movies: MovieConfig::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl TerminalConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check value constraints
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.thinking_min_ms > self.session.thinking_max_ms {
            return Err(ConfigError::ValidationError(format!(
                "thinking_min_ms ({}) is greater than thinking_max_ms ({})",
                self.session.thinking_min_ms, self.session.thinking_max_ms
            )));
        }
        if self.session.typing_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "typing_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_ms must be greater than 0".to_string(),
            ));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.api.base_url
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/terminalx/terminalx.toml` or
/// `~/.config/terminalx/terminalx.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("terminalx").join("terminalx.toml"))
}

/// Load configuration from the default path and the process environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// merged values fail validation. A missing config file is not an error.
pub fn load_config() -> Result<TerminalConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<TerminalConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the merged values fail validation.
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<TerminalConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = TerminalConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: TerminalToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut TerminalConfig, toml: &TerminalToml) {
    if let Some(ref url) = toml.api.base_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(ref path) = toml.api.chat_path {
        config.api.chat_path.clone_from(path);
    }
    if let Some(ref path) = toml.api.fallback_path {
        config.api.fallback_path.clone_from(path);
    }
    if let Some(timeout) = toml.api.timeout_ms {
        config.api.timeout_ms = timeout;
    }
    if let Some(send) = toml.api.send_session_id {
        config.api.send_session_id = send;
    }

    if let Some(ms) = toml.session.thinking_min_ms {
        config.session.thinking_min_ms = ms;
    }
    if let Some(ms) = toml.session.thinking_max_ms {
        config.session.thinking_max_ms = ms;
    }
    if let Some(ms) = toml.session.typing_interval_ms {
        config.session.typing_interval_ms = ms;
    }
    if let Some(ms) = toml.session.status_delay_ms {
        config.session.status_delay_ms = ms;
    }
    if toml.session.seed.is_some() {
        config.session.seed = toml.session.seed;
    }

    if let Some(ref url) = toml.movies.base_url {
        config.movies.base_url.clone_from(url);
    }
    if toml.movies.api_key.is_some() {
        config.movies.api_key.clone_from(&toml.movies.api_key);
    }
    if let Some(ref language) = toml.movies.language {
        config.movies.language.clone_from(language);
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut TerminalConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let parse_ms = |key: &str| env(key).and_then(|v| v.trim().parse::<u64>().ok());

    if let Some(url) = env("TERMINALX_API_URL") {
        config.api.base_url = url;
        config.source = ConfigSource::Env;
    }
    if let Some(path) = env("TERMINALX_CHAT_PATH") {
        config.api.chat_path = path;
        config.source = ConfigSource::Env;
    }
    if let Some(path) = env("TERMINALX_FALLBACK_PATH") {
        config.api.fallback_path = path;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_ms("TERMINALX_TIMEOUT_MS") {
        config.api.timeout_ms = ms;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_ms("TERMINALX_THINK_MIN_MS") {
        config.session.thinking_min_ms = ms;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_ms("TERMINALX_THINK_MAX_MS") {
        config.session.thinking_max_ms = ms;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_ms("TERMINALX_TYPING_MS") {
        config.session.typing_interval_ms = ms;
        config.source = ConfigSource::Env;
    }
    if let Some(seed) = parse_ms("TERMINALX_SEED") {
        config.session.seed = Some(seed);
        config.source = ConfigSource::Env;
    }
    if let Some(key) = env("TMDB_API_KEY") {
        if !key.trim().is_empty() {
            config.movies.api_key = Some(key);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(url) = env("TMDB_BASE_URL") {
        config.movies.base_url = url;
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// API base URL override
    pub api_url: Option<String>,

    /// Random seed override
    pub seed: Option<u64>,

    /// Request timeout override (milliseconds)
    pub timeout_ms: Option<u64>,

    /// Typewriter interval override (milliseconds)
    pub typing_interval_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set API base URL override
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set seed override
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set timeout override
    #[must_use]
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    /// Set typewriter interval override
    #[must_use]
    pub fn with_typing_interval_ms(mut self, ms: u64) -> Self {
        self.typing_interval_ms = Some(ms);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.api_url.is_none()
            && self.seed.is_none()
            && self.timeout_ms.is_none()
            && self.typing_interval_ms.is_none()
    }

    /// Apply overrides to a configuration and re-validate it
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if an override breaks a constraint.
    pub fn apply(&self, config: &mut TerminalConfig) -> Result<(), ConfigError> {
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }
        if let Some(ref url) = self.api_url {
            config.api.base_url.clone_from(url);
        }
        if self.seed.is_some() {
            config.session.seed = self.seed;
        }
        if let Some(ms) = self.timeout_ms {
            config.api.timeout_ms = ms;
        }
        if let Some(ms) = self.typing_interval_ms {
            config.session.typing_interval_ms = ms;
        }
        config.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // =========================================================================
    // Default Configuration Tests
    // =========================================================================

    #[test]
    fn test_default_config() {
        let config = TerminalConfig::default();

        assert_eq!(config.api.chat_url(), "http://localhost:5001/api/chat");
        assert_eq!(
            config.api.fallback_url(),
            "http://localhost:5001/api/chat/fallback"
        );
        assert_eq!(config.api.timeout(), Duration::from_millis(5000));
        assert_eq!(
            config.session.thinking_range(),
            Duration::from_millis(500)..=Duration::from_millis(2000)
        );
        assert_eq!(config.session.typing_interval(), Duration::from_millis(30));
        assert_eq!(config.session.status_delay(), Duration::from_secs(1));
        assert_eq!(config.movies.language, "en-US");
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(p) = default_config_path() {
            assert!(p.to_string_lossy().contains("terminalx"));
            assert!(p.to_string_lossy().ends_with("terminalx.toml"));
        }
    }

    #[test]
    fn test_url_join_tolerates_slashes() {
        let api = ApiConfig::with_base_url("http://example.test/");
        assert_eq!(api.url("/api/blog/posts"), "http://example.test/api/blog/posts");
        assert_eq!(api.url("api/blog/tags"), "http://example.test/api/blog/tags");
    }

    // =========================================================================
    // TOML Parsing Tests
    // =========================================================================

    #[test]
    fn test_parse_valid_toml() {
        let file = write_toml(
            r#"
[api]
base_url = "http://chat.test:8080"
timeout_ms = 2500
send_session_id = false

[session]
thinking_min_ms = 0
thinking_max_ms = 10
typing_interval_ms = 5
seed = 7

[movies]
api_key = "secret"
"#,
        );

        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.api.base_url, "http://chat.test:8080");
        assert_eq!(config.api.chat_path, "/api/chat");
        assert_eq!(config.api.timeout_ms, 2500);
        assert!(!config.api.send_session_id);
        assert_eq!(config.session.thinking_max_ms, 10);
        assert_eq!(config.session.typing_interval_ms, 5);
        assert_eq!(config.session.status_delay_ms, 1000);
        assert_eq!(config.session.seed, Some(7));
        assert_eq!(config.movies.api_key.as_deref(), Some("secret"));
        assert_eq!(config.source(), ConfigSource::File);
        assert_eq!(config.config_file_path, Some(file.path().to_path_buf()));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let file = write_toml("");
        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let file = write_toml("[api\nbase_url = ");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = load_config_with_env(Some(path), no_env).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.config_file_path.is_none());
    }

    // =========================================================================
    // Priority Tests
    // =========================================================================

    #[test]
    fn test_env_overrides_file() {
        let file = write_toml(
            r#"
[api]
base_url = "http://file.test"
"#,
        );
        let env = env_from(&[
            ("TERMINALX_API_URL", "http://env.test"),
            ("TERMINALX_TYPING_MS", "12"),
            ("TERMINALX_SEED", "99"),
            ("TMDB_API_KEY", "k"),
        ]);

        let config = load_config_with_env(Some(file.path().to_path_buf()), env).unwrap();
        assert_eq!(config.api.base_url, "http://env.test");
        assert_eq!(config.session.typing_interval_ms, 12);
        assert_eq!(config.session.seed, Some(99));
        assert_eq!(config.movies.api_key.as_deref(), Some("k"));
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_unparseable_env_is_ignored() {
        let env = env_from(&[("TERMINALX_TIMEOUT_MS", "soon")]);
        let config = load_config_with_env(None, env).unwrap();
        assert_eq!(config.api.timeout_ms, 5000);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides_env() {
        let env = env_from(&[("TERMINALX_API_URL", "http://env.test")]);
        let mut config = load_config_with_env(None, env).unwrap();

        ConfigOverrides::new()
            .with_api_url("http://cli.test")
            .with_seed(1)
            .apply(&mut config)
            .unwrap();

        assert_eq!(config.api.base_url, "http://cli.test");
        assert_eq!(config.session.seed, Some(1));
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    #[test]
    fn test_empty_overrides_keep_source() {
        let mut config = TerminalConfig::default();
        ConfigOverrides::new().apply(&mut config).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
    }

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn test_inverted_thinking_range_rejected() {
        let env = env_from(&[
            ("TERMINALX_THINK_MIN_MS", "900"),
            ("TERMINALX_THINK_MAX_MS", "100"),
        ]);
        let result = load_config_with_env(None, env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_typing_interval_rejected() {
        let mut config = TerminalConfig::default();
        let result = ConfigOverrides::new()
            .with_typing_interval_ms(0)
            .apply(&mut config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = TerminalConfig::default();
        config.api.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = TerminalConfig::default();
        config.api.base_url = "localhost:5001".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }
}
