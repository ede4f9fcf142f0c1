//! Core implementation of the cmdchain console runner
//!
//! cmdchain is a console command runner whose commands can be combined into
//! chains via a configuration file. A chain's master command runs its own
//! body first and then every configured member command in declaration order,
//! aggregating all output into a single stream; member commands cannot be
//! invoked on their own.

use std::path::PathBuf;

use log::{debug, warn};

use crate::chain::registry::ChainRegistry;
use crate::config_file::{AppEnv, Config, ConfigError};

pub mod chain;
pub mod config_file;
pub mod console;
pub mod logger;

/// Load chain configuration from a file (or auto-detect), returning the
/// built `ChainRegistry` and the config file path.
///
/// # Errors
///
/// Returns `ConfigError` if the config file is not found or cannot be
/// parsed. Questionable chain contents (empty chains, members claimed by
/// two masters) are logged as warnings, never errors.
pub fn load_config(config_file: Option<&str>) -> Result<(ChainRegistry, PathBuf), ConfigError> {
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            config_path
        }
        None => Config::find_config(AppEnv::detect())?,
    };
    debug!(
        "Loading chain configuration from {}",
        config_path.display()
    );
    let parsed = Config::from_file(&config_path)?;
    validate_version(&parsed.cmdchain_version);
    let registry = ChainRegistry::new(&parsed.chain_command);
    check_empty_chains(&registry);
    Ok((registry, config_path))
}

/// Warn if the config's `cmdchain_version` doesn't match the binary version
fn validate_version(config_version: &str) {
    let binary_version = env!("CARGO_PKG_VERSION");
    if config_version != binary_version {
        warn!(
            "Config cmdchain_version '{config_version}' differs from binary version '{binary_version}'"
        );
    }
}

/// Warn for chains whose member list came out empty after filtering
fn check_empty_chains(registry: &ChainRegistry) {
    for (master, members) in registry.chains() {
        if members.is_empty() {
            warn!("Chain master '{master}' has no members");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_minimal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cmdchain.yaml");
        std::fs::write(
            &path,
            "cmdchain_version: '0.1.0'\nchain_command:\n  'foo:hello':\n    - 'bar:hi'\n",
        )
        .unwrap();
        let (registry, config_path) =
            load_config(Some(&path.to_string_lossy())).unwrap();
        assert!(registry.is_master("foo:hello"));
        assert_eq!(registry.members("foo:hello"), ["bar:hi"]);
        assert_eq!(config_path, path);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cmdchain.yaml");
        let result = load_config(Some(&path.to_string_lossy()));
        match result.unwrap_err() {
            ConfigError::ConfigNotFound(p) => assert_eq!(p, path),
            other => panic!("Expected ConfigNotFound, got: {other:?}"),
        }
    }
}
