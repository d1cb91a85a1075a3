//! Configuration management for the safeefah guide

pub mod file;

use std::path::PathBuf;

use crate::session::{DEFAULT_EXIT_WORDS, DEFAULT_GREETING};
use crate::{AnswerTable, Result};

use file::GuideConfigFile;

/// Guide configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Answer table file; `None` uses the built-in table
    pub table_path: Option<PathBuf>,

    /// Conversation configuration
    pub session: SessionConfig,
}

/// Conversation configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Opening line of every conversation
    pub greeting: String,

    /// Lowercased words that end the conversation
    pub exit_words: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            exit_words: DEFAULT_EXIT_WORDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    /// Load configuration (env > toml > default)
    #[must_use]
    pub fn load() -> Self {
        Self::from_file_config(file::load_config_file())
    }

    /// Merge environment variables over a parsed config file
    #[must_use]
    pub fn from_file_config(fc: GuideConfigFile) -> Self {
        Self::from_sources(fc, |key| std::env::var(key).ok())
    }

    /// Merge `env` lookups over a parsed config file (env > toml > default)
    #[must_use]
    pub fn from_sources(fc: GuideConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SessionConfig::default();

        let table_path = env("SAFEEFAH_TABLE")
            .or(fc.table.path)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let greeting = env("SAFEEFAH_GREETING")
            .or(fc.session.greeting)
            .unwrap_or(defaults.greeting);

        let exit_words = fc
            .session
            .exit_words
            .map(|words| {
                words
                    .into_iter()
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.exit_words);

        let config = Self {
            table_path,
            session: SessionConfig {
                greeting,
                exit_words,
            },
        };

        tracing::debug!(?config, "resolved configuration");
        config
    }

    /// Replace the table path when one was given on the command line
    #[must_use]
    pub fn with_table_override(mut self, table: Option<PathBuf>) -> Self {
        if let Some(path) = table {
            self.table_path = Some(path);
        }
        self
    }

    /// Load the configured answer table
    ///
    /// # Errors
    ///
    /// Returns error if a table file is configured but cannot be loaded
    pub fn answer_table(&self) -> Result<AnswerTable> {
        match &self.table_path {
            Some(path) => AnswerTable::load(path),
            None => {
                tracing::debug!("using built-in answer table");
                Ok(AnswerTable::builtin())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::{SessionFileConfig, TableFileConfig};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.table_path.is_none());
        assert_eq!(config.session.exit_words, ["quit", "exit", "bye"]);
        assert_eq!(config.answer_table().unwrap(), AnswerTable::builtin());
    }

    #[test]
    fn test_exit_words_normalized() {
        let fc = GuideConfigFile {
            table: TableFileConfig::default(),
            session: SessionFileConfig {
                greeting: None,
                exit_words: Some(vec![" Stop ".to_string(), String::new()]),
            },
        };

        let config = Config::from_sources(fc, no_env);
        assert_eq!(config.session.exit_words, ["stop"]);
    }

    #[test]
    fn test_missing_table_file_is_error() {
        let config = Config {
            table_path: Some(PathBuf::from("/nonexistent/table.json")),
            session: SessionConfig::default(),
        };
        assert!(config.answer_table().is_err());
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn file_config(table_path: Option<&str>, greeting: Option<&str>) -> GuideConfigFile {
        GuideConfigFile {
            table: TableFileConfig {
                path: table_path.map(ToString::to_string),
            },
            session: SessionFileConfig {
                greeting: greeting.map(ToString::to_string),
                exit_words: None,
            },
        }
    }

    #[test]
    fn test_file_values_reach_config() {
        let fc = file_config(Some("/srv/tour/table.json"), Some("Marhaba!"));

        let config = Config::from_sources(fc, no_env);
        assert_eq!(config.table_path, Some(PathBuf::from("/srv/tour/table.json")));
        assert_eq!(config.session.greeting, "Marhaba!");
        assert_eq!(config.session.exit_words, ["quit", "exit", "bye"]);
    }

    #[test]
    fn test_empty_table_path_is_ignored() {
        let config = Config::from_sources(file_config(Some("   "), None), no_env);
        assert!(config.table_path.is_none());
        assert_eq!(config.session.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn test_env_beats_file() {
        let fc = file_config(Some("/from/file.json"), Some("From file"));
        let env = |key: &str| match key {
            "SAFEEFAH_TABLE" => Some("/from/env.toml".to_string()),
            "SAFEEFAH_GREETING" => Some("From env".to_string()),
            _ => None,
        };

        let config = Config::from_sources(fc, env);
        assert_eq!(config.table_path, Some(PathBuf::from("/from/env.toml")));
        assert_eq!(config.session.greeting, "From env");
    }

    #[test]
    fn test_empty_env_table_falls_back_to_nothing() {
        // An empty env value still shadows the file, then gets filtered
        let env = |key: &str| (key == "SAFEEFAH_TABLE").then(String::new);
        let config = Config::from_sources(file_config(Some("/from/file.json"), None), env);
        assert!(config.table_path.is_none());
    }

    #[test]
    fn test_cli_table_beats_config() {
        let config = Config::from_sources(file_config(Some("/from/file.json"), None), no_env)
            .with_table_override(Some(PathBuf::from("/from/cli.json")));
        assert_eq!(config.table_path, Some(PathBuf::from("/from/cli.json")));

        let config = Config::from_sources(file_config(Some("/from/file.json"), None), no_env)
            .with_table_override(None);
        assert_eq!(config.table_path, Some(PathBuf::from("/from/file.json")));
    }

    #[test]
    fn test_toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("table.json");
        std::fs::write(&table, r#"{"Curious Seeker": {"loom": "No loom needed."}}"#).unwrap();

        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            format!(
                "[table]\npath = {:?}\n\n[session]\ngreeting = \"Ahlan!\"\nexit_words = [\"Shukran\"]\n",
                table.display().to_string()
            ),
        )
        .unwrap();

        let config = Config::from_sources(file::load_config_file_from(&path), no_env);
        assert_eq!(config.table_path.as_deref(), Some(table.as_path()));
        assert_eq!(config.session.greeting, "Ahlan!");
        assert_eq!(config.session.exit_words, ["shukran"]);

        let loaded = config.answer_table().unwrap();
        assert_eq!(loaded.len(), 1);
    }
}
