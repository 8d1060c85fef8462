//! Process configuration
//!
//! Read from the environment after `dotenvy` has loaded `.env`. The CLI may
//! override the database path.

use std::path::PathBuf;
use std::time::Duration;

use helpdesk_core::errors::{HdError, HelpdeskError};
use helpdesk_core_types::Sensitive;
use helpdesk_store::DEFAULT_DB_PATH;

pub const ENV_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_DB_PATH: &str = "HELPDESK_DB_PATH";
pub const ENV_POLL_TIMEOUT: &str = "HELPDESK_POLL_TIMEOUT_SECS";
pub const ENV_API_BASE: &str = "TELEGRAM_API_BASE";

pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: Sensitive<String>,
    pub db_path: PathBuf,
    pub poll_timeout_secs: u64,
    pub api_base: String,
}

impl BotConfig {
    /// Load from the process environment
    ///
    /// # Errors
    ///
    /// `Configuration` when the token is missing or blank, or the poll
    /// timeout is not a number.
    pub fn from_env() -> Result<Self, HdError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup
    ///
    /// # Errors
    ///
    /// Same as [`BotConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HdError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_TOKEN)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(HelpdeskError::MissingConfig { key: ENV_TOKEN })?;

        let db_path = lookup(ENV_DB_PATH)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let poll_timeout_secs = match lookup(ENV_POLL_TIMEOUT) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| HelpdeskError::InvalidConfig {
                    key: ENV_POLL_TIMEOUT,
                    reason: format!("'{}' is not a number of seconds", raw),
                })?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        let api_base = lookup(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            token: Sensitive::new(token),
            db_path,
            poll_timeout_secs,
            api_base,
        })
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_core::errors::HdErrorKind;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BotConfig::from_lookup(lookup(&[(ENV_TOKEN, "123:abc")])).unwrap();

        assert_eq!(config.token.expose(), "123:abc");
        assert_eq!(config.db_path, PathBuf::from("telegram.db"));
        assert_eq!(config.poll_timeout_secs, 30);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_missing_token_fails() {
        let err = BotConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err.kind(), HdErrorKind::Configuration);
        assert_eq!(err.field(), Some(ENV_TOKEN));

        let err = BotConfig::from_lookup(lookup(&[(ENV_TOKEN, "  ")])).unwrap_err();
        assert_eq!(err.kind(), HdErrorKind::Configuration);
    }

    #[test]
    fn test_overrides() {
        let config = BotConfig::from_lookup(lookup(&[
            (ENV_TOKEN, "t"),
            (ENV_DB_PATH, "/var/lib/helpdesk/bot.db"),
            (ENV_POLL_TIMEOUT, "5"),
            (ENV_API_BASE, "http://localhost:8081"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/helpdesk/bot.db"));
        assert_eq!(config.poll_timeout(), Duration::from_secs(5));
        assert_eq!(config.api_base, "http://localhost:8081");
    }

    #[test]
    fn test_bad_timeout() {
        let err = BotConfig::from_lookup(lookup(&[(ENV_TOKEN, "t"), (ENV_POLL_TIMEOUT, "soon")]))
            .unwrap_err();
        assert_eq!(err.field(), Some(ENV_POLL_TIMEOUT));
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let config = BotConfig::from_lookup(lookup(&[(ENV_TOKEN, "123:secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
