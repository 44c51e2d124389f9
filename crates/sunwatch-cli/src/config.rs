use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("batch size must be at least 1")]
    EmptyBatch,
}

/// Runtime settings resolved from command-line flags and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub batch_size: usize,
}

/// Values given on the command line. Each one, when present, replaces the
/// matching environment variable, which is then never read.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub count: Option<usize>,
    pub base_url: Option<&'a str>,
}

/// Load configuration from flags and environment variables, after loading
/// `.env`.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric variable does not parse or the batch
/// size resolves to zero.
pub fn load_cli_config(overrides: CliOverrides<'_>) -> Result<CliConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_cli_config(|key| std::env::var(key), overrides)
}

/// Build configuration using the provided env-var lookup function, so tests
/// can feed a plain `HashMap` instead of touching the process environment.
fn build_cli_config<F>(lookup: F, overrides: CliOverrides<'_>) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let batch_size = match overrides.count {
        Some(count) => count,
        None => parse_var(&lookup, "SUNWATCH_BATCH_SIZE", "10")?,
    };
    if batch_size == 0 {
        return Err(ConfigError::EmptyBatch);
    }

    let base_url = overrides.base_url.map_or_else(
        || or_default("SUNWATCH_BASE_URL", sunwatch_client::DEFAULT_BASE_URL),
        str::to_owned,
    );

    Ok(CliConfig {
        base_url,
        request_timeout_secs: parse_var(&lookup, "SUNWATCH_REQUEST_TIMEOUT_SECS", "30")?,
        log_level: or_default("SUNWATCH_LOG_LEVEL", "info"),
        batch_size,
    })
}

/// Reads `var` (or `default` when unset) and parses it as `T`.
fn parse_var<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let env = HashMap::new();
        let config = build_cli_config(lookup_from_map(&env), CliOverrides::default()).unwrap();
        assert_eq!(
            config,
            CliConfig {
                base_url: "https://api.sunrise-sunset.org/json".to_owned(),
                request_timeout_secs: 30,
                log_level: "info".to_owned(),
                batch_size: 10,
            }
        );
    }

    #[test]
    fn env_overrides_are_read() {
        let mut env = HashMap::new();
        env.insert("SUNWATCH_BASE_URL", "http://localhost:8080/json");
        env.insert("SUNWATCH_REQUEST_TIMEOUT_SECS", "5");
        env.insert("SUNWATCH_LOG_LEVEL", "debug");
        env.insert("SUNWATCH_BATCH_SIZE", "25");
        let config = build_cli_config(lookup_from_map(&env), CliOverrides::default()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/json");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.batch_size, 25);
    }

    #[test]
    fn flags_win_over_env() {
        let mut env = HashMap::new();
        env.insert("SUNWATCH_BASE_URL", "http://localhost:8080/json");
        env.insert("SUNWATCH_BATCH_SIZE", "25");
        let overrides = CliOverrides {
            count: Some(3),
            base_url: Some("http://localhost:9000/json"),
        };
        let config = build_cli_config(lookup_from_map(&env), overrides).unwrap();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.base_url, "http://localhost:9000/json");
    }

    #[test]
    fn count_flag_skips_unparsable_env_batch_size() {
        let mut env = HashMap::new();
        env.insert("SUNWATCH_BATCH_SIZE", "many");
        let overrides = CliOverrides {
            count: Some(4),
            base_url: None,
        };
        let config = build_cli_config(lookup_from_map(&env), overrides).unwrap();
        assert_eq!(config.batch_size, 4);
    }

    #[test]
    fn invalid_number_names_the_variable() {
        let mut env = HashMap::new();
        env.insert("SUNWATCH_BATCH_SIZE", "many");
        let err = build_cli_config(lookup_from_map(&env), CliOverrides::default()).unwrap_err();
        assert!(
            err.to_string().contains("SUNWATCH_BATCH_SIZE"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn zero_count_flag_is_rejected() {
        let env = HashMap::new();
        let overrides = CliOverrides {
            count: Some(0),
            base_url: None,
        };
        let err = build_cli_config(lookup_from_map(&env), overrides).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBatch));
    }

    #[test]
    fn zero_env_batch_size_is_rejected() {
        let mut env = HashMap::new();
        env.insert("SUNWATCH_BATCH_SIZE", "0");
        let err = build_cli_config(lookup_from_map(&env), CliOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBatch));
    }
}
