//! Runtime settings read from the environment.
//!
//! | Variable             | Default | Meaning                               |
//! |----------------------|---------|---------------------------------------|
//! | `CAR_COUNTER_TOP_N`  | `3`     | number of largest observations listed |
//! | `CAR_COUNTER_WINDOW` | `3`     | length of the quietest period         |
//! | `CAR_COUNTER_FORMAT` | `text`  | `text`, `json` or `csv`               |

use std::num::NonZeroUsize;
use std::str::FromStr;
use thiserror::Error;

use crate::aggregators::{DEFAULT_TOP_N, DEFAULT_WINDOW};

pub const TOP_N_VAR: &str = "CAR_COUNTER_TOP_N";
pub const WINDOW_VAR: &str = "CAR_COUNTER_WINDOW";
pub const FORMAT_VAR: &str = "CAR_COUNTER_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    NotPositive { var: &'static str, value: String },

    #[error("CAR_COUNTER_FORMAT must be one of text, json, csv; got '{0}'")]
    UnknownFormat(String),
}

/// How the final report is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub top_n: usize,
    pub window: NonZeroUsize,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            window: DEFAULT_WINDOW,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Unset or empty
    /// variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let top_n = match get(TOP_N_VAR) {
            Some(value) => positive(TOP_N_VAR, &value)?.get(),
            None => defaults.top_n,
        };
        let window = match get(WINDOW_VAR) {
            Some(value) => positive(WINDOW_VAR, &value)?,
            None => defaults.window,
        };
        let format = match get(FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => defaults.format,
        };

        Ok(Self {
            top_n,
            window,
            format,
        })
    }
}

fn positive(var: &'static str, value: &str) -> Result<NonZeroUsize, ConfigError> {
    value
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| ConfigError::NotPositive {
            var,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.top_n, 3);
        assert_eq!(config.window.get(), 3);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_reads_all_variables() {
        let env = vars(&[(TOP_N_VAR, "5"), (WINDOW_VAR, " 4 "), (FORMAT_VAR, "JSON")]);
        let config = Config::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.top_n, 5);
        assert_eq!(config.window.get(), 4);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_value_uses_default() {
        let env = vars(&[(WINDOW_VAR, "")]);
        let config = Config::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.window.get(), 3);
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        let env = vars(&[(WINDOW_VAR, "0")]);
        assert_eq!(
            Config::from_lookup(|k| env.get(k).cloned()),
            Err(ConfigError::NotPositive {
                var: WINDOW_VAR,
                value: "0".to_string()
            })
        );

        let env = vars(&[(TOP_N_VAR, "three")]);
        assert!(Config::from_lookup(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn test_rejects_unknown_format() {
        let env = vars(&[(FORMAT_VAR, "yaml")]);
        assert_eq!(
            Config::from_lookup(|k| env.get(k).cloned()),
            Err(ConfigError::UnknownFormat("yaml".to_string()))
        );
    }

    // Helper functions for tests
    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
