//! Application configuration for CodeTutor.
//!
//! User config lives at `~/.codetutor/codetutor.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "codetutor.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".codetutor";

// ---------------------------------------------------------------------------
// Config structs (matching codetutor.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Response engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Tokenizer settings.
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// Topic table settings.
    #[serde(default)]
    pub topics: TopicsConfig,
}

/// `[engine]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of conversation turns retained in the bounded history.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
        }
    }
}

fn default_max_history() -> usize {
    5
}

/// `[tokenizer]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Local model directory containing `vocab.json`. When unset or the
    /// vocabulary fails to load, the engine falls back to a whitespace
    /// word count.
    #[serde(default)]
    pub model_dir: Option<String>,
}

/// `[topics]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicsConfig {
    /// Optional TOML file with extra `[[topics]]` records, appended after
    /// the built-in table.
    #[serde(default)]
    pub file: Option<String>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.codetutor/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TutorError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.codetutor/codetutor.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TutorError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TutorError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TutorError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TutorError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TutorError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("max_history"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.engine.max_history, 5);
        assert!(parsed.tokenizer.model_dir.is_none());
    }

    #[test]
    fn config_with_model_dir_and_topics_file() {
        let toml_str = r#"
[engine]
max_history = 10

[tokenizer]
model_dir = "/opt/models/gpt-oss-20b"

[topics]
file = "/home/user/extra-topics.toml"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.engine.max_history, 10);
        assert_eq!(
            config.tokenizer.model_dir.as_deref(),
            Some("/opt/models/gpt-oss-20b")
        );
        assert_eq!(
            config.topics.file.as_deref(),
            Some("/home/user/extra-topics.toml")
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").expect("parse empty");
        assert_eq!(config.engine.max_history, 5);
        assert!(config.topics.file.is_none());
    }
}
