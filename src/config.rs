//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::catalog::CategoryFilter;
use crate::client::Endpoint;
use crate::flashcards::StudyMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub flashcards: FlashcardsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Completion endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_completion_url")]
    pub url: String,

    /// Unset means no timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_completion_url() -> String {
    "http://localhost:3000/api/chat".to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            url: default_completion_url(),
            request_timeout_secs: None,
        }
    }
}

impl CompletionConfig {
    pub fn endpoint(&self) -> Endpoint {
        endpoint(&self.url, self.request_timeout_secs)
    }
}

/// Extraction endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_extraction_url")]
    pub url: String,

    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_extraction_url() -> String {
    "http://localhost:3000/api/upload-docx".to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            url: default_extraction_url(),
            request_timeout_secs: None,
        }
    }
}

impl ExtractionConfig {
    pub fn endpoint(&self) -> Endpoint {
        endpoint(&self.url, self.request_timeout_secs)
    }
}

fn endpoint(url: &str, timeout_secs: Option<u64>) -> Endpoint {
    let endpoint = Endpoint::new(url);
    match timeout_secs {
        Some(secs) => endpoint.with_timeout(Duration::from_secs(secs)),
        None => endpoint,
    }
}

/// Flashcard view configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FlashcardsConfig {
    /// Delay between a grade and the move to the next card
    #[serde(default = "default_advance_delay")]
    pub advance_delay_ms: u64,

    #[serde(default)]
    pub default_category: CategoryFilter,

    #[serde(default)]
    pub default_mode: StudyMode,
}

fn default_advance_delay() -> u64 {
    1000
}

impl Default for FlashcardsConfig {
    fn default() -> Self {
        Self {
            advance_delay_ms: default_advance_delay(),
            default_category: CategoryFilter::default(),
            default_mode: StudyMode::default(),
        }
    }
}

impl FlashcardsConfig {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PHYSIO_COMPLETION_URL") {
            self.completion.url = url;
        }
        if let Some(url) = lookup("PHYSIO_EXTRACTION_URL") {
            self.extraction.url = url;
        }

        if let Some(delay) = lookup("PHYSIO_ADVANCE_DELAY_MS") {
            match delay.parse() {
                Ok(ms) => self.flashcards.advance_delay_ms = ms,
                Err(_) => tracing::warn!("Ignoring invalid PHYSIO_ADVANCE_DELAY_MS: {}", delay),
            }
        }

        if let Some(level) = lookup("PHYSIO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PHYSIO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Config files tried by [`Config::load_default`], in order
pub fn default_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("physio-study").join("config.toml")),
        Some(PathBuf::from("./config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Physio Study Configuration
#
# Environment variables override these settings:
# - PHYSIO_COMPLETION_URL
# - PHYSIO_EXTRACTION_URL
# - PHYSIO_ADVANCE_DELAY_MS
# - PHYSIO_LOG_LEVEL
# - PHYSIO_LOG_FORMAT

[completion]
# Chat completion endpoint: POST { message, images? } -> { response }
url = "http://localhost:3000/api/chat"

# Request timeout in seconds (unset waits indefinitely)
# request_timeout_secs = 60

[extraction]
# Document extraction endpoint: multipart field "file" -> { content }
url = "http://localhost:3000/api/upload-docx"

# request_timeout_secs = 60

[flashcards]
# Delay between grading a card and moving to the next one (ms)
advance_delay_ms = 1000

# Starting category: all, arm, leg, core, back
default_category = "all"

# Starting mode: flashcard or quiz
default_mode = "flashcard"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.completion.url, "http://localhost:3000/api/chat");
        assert_eq!(config.extraction.url, "http://localhost:3000/api/upload-docx");
        assert_eq!(config.completion.endpoint().timeout, None);
        assert_eq!(config.flashcards.advance_delay(), Duration::from_millis(1000));
        assert_eq!(config.flashcards.default_category, CategoryFilter::All);
        assert_eq!(config.flashcards.default_mode, StudyMode::Flashcard);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_template_parses_to_defaults() {
        let file = write_config(&generate_default_config());
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.completion.url, Config::default().completion.url);
        assert_eq!(config.flashcards.advance_delay_ms, 1000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file() {
        let file = write_config(
            r#"
[completion]
url = "https://tutor.example/api/chat"
request_timeout_secs = 45

[flashcards]
default_category = "leg"
default_mode = "quiz"
"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(
            config.completion.endpoint(),
            Endpoint::new("https://tutor.example/api/chat").with_timeout(Duration::from_secs(45))
        );
        assert_eq!(config.flashcards.default_category, CategoryFilter::Leg);
        assert_eq!(config.flashcards.default_mode, StudyMode::Quiz);
        assert_eq!(config.flashcards.advance_delay_ms, 1000);
        assert_eq!(config.extraction.url, "http://localhost:3000/api/upload-docx");
    }

    #[test]
    fn test_stale_chat_section_ignored() {
        let file = write_config("[chat]\nspeech_language = \"en-GB\"\n\n[logging]\nformat = \"json\"\n");
        let config = Config::load(file.path()).unwrap();
        assert!(config.logging.is_json());
        assert!(!generate_default_config().contains("[chat]"));
    }

    #[test]
    fn test_parse_error_has_path() {
        let file = write_config("[flashcards]\ndefault_category = \"neck\"\n");
        match Config::load(file.path()) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PHYSIO_COMPLETION_URL", "http://10.0.0.2/api/chat"),
            ("PHYSIO_ADVANCE_DELAY_MS", "250"),
            ("PHYSIO_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.completion.url, "http://10.0.0.2/api/chat");
        assert_eq!(config.flashcards.advance_delay_ms, 250);
        assert!(config.logging.is_json());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_delay_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "PHYSIO_ADVANCE_DELAY_MS").then(|| "soon".to_string()));
        assert_eq!(config.flashcards.advance_delay_ms, 1000);
    }
}
