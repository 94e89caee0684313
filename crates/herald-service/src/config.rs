//! Service configuration.

use std::time::Duration;

/// Environment variable holding the lock wait in milliseconds.
pub const LOCK_TIMEOUT_VAR: &str = "HERALD_LOCK_TIMEOUT_MS";
/// Environment variable holding the number of conflict retries.
pub const MAX_RETRIES_VAR: &str = "HERALD_MAX_RETRIES";

const MIN_LOCK_TIMEOUT: Duration = Duration::from_millis(10);
const MAX_LOCK_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_RETRIES: u32 = 10;

/// A configuration value could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid value for {var}: '{value}' is not a non-negative integer")]
pub struct ConfigError {
    /// The variable that was malformed.
    pub var: &'static str,
    /// Its raw value.
    pub value: String,
}

/// How long to wait for a busy character and how often to retry a
/// conflicting save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Longest wait for another command on the same character (10 ms to 60 s).
    pub lock_timeout: Duration,
    /// Reload-and-reapply attempts after a version conflict (0-10).
    pub max_conflict_retries: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(3),
            max_conflict_retries: 3,
        }
    }
}

impl ServiceConfig {
    /// Set the lock wait (clamped to 10 ms - 60 s).
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout.clamp(MIN_LOCK_TIMEOUT, MAX_LOCK_TIMEOUT);
        self
    }

    /// Set the number of conflict retries (clamped to 0-10).
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_conflict_retries = retries.min(MAX_RETRIES);
        self
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read overrides through `lookup`; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(ms) = parse_var(&lookup, LOCK_TIMEOUT_VAR)? {
            config = config.with_lock_timeout(Duration::from_millis(ms));
        }
        if let Some(retries) = parse_var(&lookup, MAX_RETRIES_VAR)? {
            config = config.with_max_retries(u32::try_from(retries).unwrap_or(u32::MAX));
        }
        Ok(config)
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value: raw }),
    }
}
