//! Configuration file handling for cmdchain

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found in current directory or its parents: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON config file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
}

/// Which configuration file variant the host environment selects.
///
/// `CMDCHAIN_ENV=test` makes [`Config::find_config`] search for the test
/// variant file names instead of the default ones; everything else about
/// loading is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    #[default]
    Default,
    Test,
}

impl AppEnv {
    #[must_use]
    pub fn detect() -> Self {
        match std::env::var("CMDCHAIN_ENV") {
            Ok(value) if value.eq_ignore_ascii_case("test") => AppEnv::Test,
            _ => AppEnv::Default,
        }
    }

    #[must_use]
    pub fn filenames(self) -> &'static [&'static str] {
        match self {
            AppEnv::Default => &[".cmdchain.json", ".cmdchain.yaml", ".cmdchain.yml"],
            AppEnv::Test => &[
                ".cmdchain.test.json",
                ".cmdchain.test.yaml",
                ".cmdchain.test.yml",
            ],
        }
    }
}

/// Root configuration structure for cmdchain
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub cmdchain_version: String,
    /// Master command name to its ordered member command names. Entry order
    /// is meaningful: members run in listed order, and a member claimed by
    /// two masters resolves to the first one.
    #[serde(default)]
    pub chain_command: IndexMap<String, Vec<String>>,
}

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file)
            .map_err(|_| ConfigError::ConfigNotFound(file.to_path_buf()))?;
        let config: Config = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        Ok(config)
    }

    /// Searches for a configuration file in the current directory and its
    /// parents, using the file names selected by `env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownWorkingDirectory` if the cwd cannot be
    /// determined, or `ConfigError::ConfigNotFound` if no config file is
    /// found.
    pub fn find_config(env: AppEnv) -> Result<PathBuf, ConfigError> {
        let config_path = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        let mut path = config_path.clone();
        debug!("Searching for config file in {}", config_path.display());
        loop {
            for file in env.filenames() {
                let config_path = path.join(file);
                if config_path.exists() {
                    info!("Found config file: {}", config_path.display());
                    return Ok(config_path);
                }
            }
            if !path.pop() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cmdchain.yaml");
        std::fs::write(
            &path,
            "cmdchain_version: '0.1.0'\nchain_command:\n  'foo:hello':\n    - 'bar:hi'\n",
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.chain_command["foo:hello"], vec!["bar:hi"]);
    }

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cmdchain.json");
        std::fs::write(
            &path,
            r#"{
                "cmdchain_version": "0.1.0",
                "chain_command": {"foo:hello": ["bar:hi"]}
            }"#,
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.chain_command["foo:hello"], vec!["bar:hi"]);
    }

    #[test]
    fn test_missing_chain_command_defaults_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cmdchain.yaml");
        std::fs::write(&path, "cmdchain_version: '0.1.0'\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(config.chain_command.is_empty());
    }

    #[test]
    fn test_chain_command_preserves_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cmdchain.yaml");
        std::fs::write(
            &path,
            "cmdchain_version: '0.1.0'\nchain_command:\n  'z:last':\n    - 'a:member'\n  'a:first':\n    - 'b:member'\n",
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        let masters: Vec<&str> = config.chain_command.keys().map(String::as_str).collect();
        assert_eq!(masters, vec!["z:last", "a:first"]);
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cmdchain.yaml");
        std::fs::write(&path, "chain_command: [unclosed\n").unwrap();
        match Config::from_file(&path) {
            Err(ConfigError::Yaml { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected Yaml error, got: {other:?}"),
        }
    }

    #[test]
    fn test_env_selects_filename_variant() {
        assert!(AppEnv::Default.filenames().contains(&".cmdchain.yaml"));
        assert!(AppEnv::Test.filenames().contains(&".cmdchain.test.yaml"));
        assert!(!AppEnv::Test.filenames().contains(&".cmdchain.yaml"));
    }
}
