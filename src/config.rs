//! Environment-driven settings.

use std::env;

use crate::session::PriorPolicy;

/// Settings read from the process environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Path or URL of the grade table. `None` means the built-in SMU table.
    pub table_source: Option<String>,
    pub policy: PriorPolicy,
}

impl AppConfig {
    /// Loads `.env` and reads:
    ///
    /// - `GPA_TABLE_SOURCE`
    /// - `GPA_MAX_PRIOR_AVERAGE` (default 4.3)
    /// - `GPA_MAX_PRIOR_MODULES` (default 100)
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PriorPolicy::default();

        let table_source = lookup("GPA_TABLE_SOURCE").filter(|s| !s.trim().is_empty());
        let max_average = parse_limit(&lookup, "GPA_MAX_PRIOR_AVERAGE", defaults.max_average)?;
        let max_modules = parse_limit(&lookup, "GPA_MAX_PRIOR_MODULES", defaults.max_modules)?;

        Ok(Self {
            table_source,
            policy: PriorPolicy {
                max_average,
                max_modules,
            },
        })
    }
}

fn parse_limit<F>(lookup: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
            _ => Err(ConfigError::InvalidLimit { key, value: raw }),
        },
    }
}

/// Errors raised while loading configuration.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative number, got `{value}`")]
    InvalidLimit { key: &'static str, value: String },
}
