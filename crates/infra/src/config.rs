//! Environment-driven configuration.

use std::path::PathBuf;

use thiserror::Error;
use vulcplan_planning::engine::DEFAULT_MIN_CYCLES_REQUIRED;

pub const ENV_DATA_DIR: &str = "VULCPLAN_DATA_DIR";
pub const ENV_MIN_CYCLES: &str = "VULCPLAN_MIN_CYCLES";
pub const ENV_LOG_JSON: &str = "VULCPLAN_LOG_JSON";
pub const ENV_SEED: &str = "VULCPLAN_SEED";

const DEFAULT_DATA_DIR: &str = "./vulcplan-data";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub data_dir: PathBuf,
    /// Used when no minimum is persisted (or the stored one is 0).
    pub min_cycles_required: u32,
    pub log_json: bool,
    /// Seed the demo dataset when the store holds no vulcanizers.
    pub seed_demo_data: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            min_cycles_required: DEFAULT_MIN_CYCLES_REQUIRED,
            log_json: false,
            seed_demo_data: true,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup(ENV_DATA_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let min_cycles_required = match lookup(ENV_MIN_CYCLES) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
                key: ENV_MIN_CYCLES,
                value: raw.clone(),
            })?,
            None => defaults.min_cycles_required,
        };

        let log_json = match lookup(ENV_LOG_JSON) {
            Some(raw) => parse_flag(ENV_LOG_JSON, &raw)?,
            None => defaults.log_json,
        };

        let seed_demo_data = match lookup(ENV_SEED) {
            Some(raw) => parse_flag(ENV_SEED, &raw)?,
            None => defaults.seed_demo_data,
        };

        Ok(Self {
            data_dir,
            min_cycles_required,
            log_json,
            seed_demo_data,
        })
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
        }),
    }
}
