//! Runtime configuration read from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `LINALG_ORACLE_NUM_THREADS` | reduction worker threads | available CPUs |
//! | `LINALG_ORACLE_MIN_PARALLEL_LEN` | shortest range reduced in parallel | 4096 |
//! | `LINALG_ORACLE_COMPLEX_ALIGN` | array substrate over-aligns complex values | off |
//!
//! Tolerances are deliberately absent: they are passed at every call.

use crate::{OracleError, Result};
use std::env;
use std::sync::OnceLock;

pub const ENV_NUM_THREADS: &str = "LINALG_ORACLE_NUM_THREADS";
pub const ENV_MIN_PARALLEL_LEN: &str = "LINALG_ORACLE_MIN_PARALLEL_LEN";
pub const ENV_COMPLEX_ALIGN: &str = "LINALG_ORACLE_COMPLEX_ALIGN";

pub const DEFAULT_MIN_PARALLEL_LEN: usize = 4096;

/// Process-wide configuration, resolved once on first use.
static GLOBAL_CONFIG: OnceLock<OracleConfig> = OnceLock::new();

/// Configuration for the reduction pool and the capability gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Number of reduction worker threads.
    pub num_threads: usize,
    /// Index ranges shorter than this are folded on the calling thread.
    pub min_parallel_len: usize,
    /// Whether the interoperating array substrate aligns complex values to
    /// twice their component size.
    pub complex_align: bool,
    /// Prefix for worker thread names.
    pub thread_name_prefix: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get().max(1),
            min_parallel_len: DEFAULT_MIN_PARALLEL_LEN,
            complex_align: false,
            thread_name_prefix: "linalg-oracle".to_string(),
        }
    }
}

impl OracleConfig {
    /// Read configuration from environment variables, rejecting malformed values.
    pub fn try_from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(threads) = parse_usize(ENV_NUM_THREADS)? {
            if threads == 0 {
                return Err(OracleError::Config {
                    key: ENV_NUM_THREADS,
                    value: threads.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            config.num_threads = threads;
        }
        if let Some(len) = parse_usize(ENV_MIN_PARALLEL_LEN)? {
            config.min_parallel_len = len;
        }
        if let Some(flag) = parse_flag(ENV_COMPLEX_ALIGN)? {
            config.complex_align = flag;
        }

        Ok(config)
    }

    /// Like [`OracleConfig::try_from_env`], falling back to defaults on error.
    pub fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed oracle configuration, using defaults");
                Self::default()
            }
        }
    }

    /// The process-wide configuration, read from the environment on first call.
    pub fn global() -> &'static OracleConfig {
        GLOBAL_CONFIG.get_or_init(|| {
            let config = Self::from_env();
            tracing::debug!(?config, "resolved oracle configuration");
            config
        })
    }
}

fn parse_usize(key: &'static str) -> Result<Option<usize>> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<usize>().map(Some).map_err(|e| OracleError::Config {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn parse_flag(key: &'static str) -> Result<Option<bool>> {
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "" => Ok(None),
        "1" | "true" | "on" | "yes" => Ok(Some(true)),
        "0" | "false" | "off" | "no" => Ok(Some(false)),
        _ => Err(OracleError::Config {
            key,
            value: raw,
            reason: "expected a boolean (1/0, true/false, on/off, yes/no)".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use temp_env::with_vars;

    const ALL_VARS: [&str; 3] = [ENV_NUM_THREADS, ENV_MIN_PARALLEL_LEN, ENV_COMPLEX_ALIGN];

    #[test]
    #[serial(oracle_env)]
    fn defaults_when_unset() {
        with_vars(ALL_VARS.map(|k| (k, None::<&str>)), || {
            let config = OracleConfig::try_from_env().expect("defaults should parse");
            assert!(config.num_threads >= 1);
            assert_eq!(config.min_parallel_len, DEFAULT_MIN_PARALLEL_LEN);
            assert!(!config.complex_align);
        });
    }

    #[test]
    #[serial(oracle_env)]
    fn reads_all_variables() {
        with_vars(
            [
                (ENV_NUM_THREADS, Some("3")),
                (ENV_MIN_PARALLEL_LEN, Some("16")),
                (ENV_COMPLEX_ALIGN, Some("true")),
            ],
            || {
                let config = OracleConfig::try_from_env().unwrap();
                assert_eq!(config.num_threads, 3);
                assert_eq!(config.min_parallel_len, 16);
                assert!(config.complex_align);
            },
        );
    }

    #[test]
    #[serial(oracle_env)]
    fn rejects_zero_threads() {
        with_vars([(ENV_NUM_THREADS, Some("0"))], || {
            let err = OracleConfig::try_from_env().expect_err("zero threads must be rejected");
            assert!(err.to_string().contains(ENV_NUM_THREADS));
        });
    }

    #[test]
    #[serial(oracle_env)]
    fn rejects_malformed_flag_but_from_env_falls_back() {
        with_vars([(ENV_COMPLEX_ALIGN, Some("maybe")), (ENV_NUM_THREADS, None)], || {
            assert!(matches!(
                OracleConfig::try_from_env(),
                Err(OracleError::Config { key: ENV_COMPLEX_ALIGN, .. })
            ));
            let config = OracleConfig::from_env();
            assert!(!config.complex_align);
        });
    }

    #[test]
    #[serial(oracle_env)]
    fn blank_values_are_treated_as_unset() {
        with_vars([(ENV_MIN_PARALLEL_LEN, Some("  ")), (ENV_COMPLEX_ALIGN, Some(""))], || {
            let config = OracleConfig::try_from_env().unwrap();
            assert_eq!(config.min_parallel_len, DEFAULT_MIN_PARALLEL_LEN);
            assert!(!config.complex_align);
        });
    }
}
