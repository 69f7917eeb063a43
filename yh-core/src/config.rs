//! Configuration schema.
//!
//! Every section and field has a default, so an empty YAML document is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::policy::PolicyKind;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Per-engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Monte-Carlo simulation settings.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Engine construction settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Seed for the dice stream (and for the default policy).
    #[serde(default)]
    pub seed: u64,
    /// If true, dice are derived from (seed, round, roll) instead of an evolving RNG.
    #[serde(default)]
    pub deterministic_chance: bool,
}

/// Simulation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Number of games to simulate.
    #[serde(default = "default_simulation_games")]
    pub games: u32,
    /// Policy name (`baseline`, `greedy-high`, `keep-high-random`).
    #[serde(default = "default_simulation_policy")]
    pub policy: String,
    /// Flush NDJSON logs every N lines (0 disables periodic flushing).
    #[serde(default = "default_log_flush_every")]
    pub log_flush_every: u64,
    /// Optional worker thread count; None uses the rayon default.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_simulation_games() -> u32 {
    10_000
}

fn default_simulation_policy() -> String {
    "baseline".to_string()
}

fn default_log_flush_every() -> u64 {
    100
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: default_simulation_games(),
            policy: default_simulation_policy(),
            log_flush_every: default_log_flush_every(),
            threads: None,
        }
    }
}

impl SimulationConfig {
    pub fn policy_kind(&self) -> Result<PolicyKind, ConfigError> {
        self.policy
            .parse()
            .map_err(|e: crate::policy::ParsePolicyError| ConfigError::Invalid(e.to_string()))
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.games == 0 {
            return Err(ConfigError::Invalid(
                "simulation.games must be > 0".to_string(),
            ));
        }
        if self.simulation.threads == Some(0) {
            return Err(ConfigError::Invalid(
                "simulation.threads must be > 0 when set".to_string(),
            ));
        }
        self.simulation.policy_kind()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_yaml() {
        // Load the checked-in config from the repo
        let config = Config::load("../configs/default.yaml")
            .expect("Failed to load configs/default.yaml");

        assert_eq!(config.engine.seed, 0);
        assert!(!config.engine.deterministic_chance);
        assert_eq!(config.simulation.games, 10_000);
        assert_eq!(config.simulation.policy, "greedy-high");
        assert_eq!(config.simulation.log_flush_every, 100);
        assert_eq!(config.simulation.threads, None);
    }

    #[test]
    fn test_parse_yaml_string() {
        let yaml = r#"
engine:
  seed: 42
  deterministic_chance: true

simulation:
  games: 500
  policy: "keep-high-random"
"#;

        let config = Config::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.engine.seed, 42);
        assert!(config.engine.deterministic_chance);
        assert_eq!(config.simulation.games, 500);
        assert_eq!(
            config.simulation.policy_kind().unwrap(),
            PolicyKind::KeepHighRandom
        );
        // Check defaults are applied
        assert_eq!(config.simulation.log_flush_every, 100);
        assert_eq!(config.simulation.threads, None);
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("").expect("empty config");
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.simulation.policy, "baseline");
    }

    #[test]
    fn test_load_from_tempfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.yaml");
        std::fs::write(&path, "simulation:\n  games: 3\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.simulation.games, 3);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = Config::from_yaml("simulation:\n  policy: oracle\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_games_rejected() {
        let err = Config::from_yaml("simulation:\n  games: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let invalid_yaml = "this is not: valid: yaml: {{{}}}";
        let result = Config::from_yaml(invalid_yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/yh.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
