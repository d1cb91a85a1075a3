//! TOML configuration file loading
//!
//! Supports `~/.config/safeefah/config.toml` as a persistent config source.
//! All fields are optional. The file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct GuideConfigFile {
    /// Answer table settings
    #[serde(default)]
    pub table: TableFileConfig,

    /// Conversation settings
    #[serde(default)]
    pub session: SessionFileConfig,
}

/// Answer table configuration
#[derive(Debug, Default, Deserialize)]
pub struct TableFileConfig {
    /// Path to a `.json` or `.toml` answer table replacing the built-in one
    pub path: Option<String>,
}

/// Conversation configuration
#[derive(Debug, Default, Deserialize)]
pub struct SessionFileConfig {
    /// Opening line spoken before asking for the visitor's age
    pub greeting: Option<String>,

    /// Words that end the conversation
    pub exit_words: Option<Vec<String>>,
}

/// Load the TOML config file from the standard path
///
/// Returns `GuideConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file() -> GuideConfigFile {
    config_file_path().map_or_else(GuideConfigFile::default, |path| load_config_file_from(&path))
}

/// Load a TOML config file from an explicit path
///
/// Missing or unparseable files yield defaults.
#[must_use]
pub fn load_config_file_from(path: &Path) -> GuideConfigFile {
    if !path.exists() {
        return GuideConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                GuideConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            GuideConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/safeefah/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("safeefah").join("config.toml"))
}
