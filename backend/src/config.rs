//! Environment-driven configuration.
//!
//! Everything the service needs from the outside world arrives as
//! `KIDSROOM_*` environment variables (a local `.env` file is honored
//! via dotenvy). Secrets stay opaque here: the shared room password
//! and the gateway API key are read, never logged.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::domain::GatewayConfig;

const DEFAULT_DATABASE_URL: &str = "sqlite:kids_room.db";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_GATEWAY_INSTANCE: &str = "kids_room";
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 40;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// Full service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    /// Shared room password for the session gate
    pub app_password: String,
    pub gateway: GatewayConfig,
    /// How often the presence view is re-derived and republished
    pub refresh_interval: Duration,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            lookup("KIDSROOM_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let listen_addr = lookup("KIDSROOM_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("KIDSROOM_LISTEN_ADDR is not a valid socket address")?;

        let app_password =
            lookup("KIDSROOM_APP_PASSWORD").context("KIDSROOM_APP_PASSWORD is required")?;

        let gateway = GatewayConfig {
            base_url: lookup("KIDSROOM_GATEWAY_URL").context("KIDSROOM_GATEWAY_URL is required")?,
            instance: lookup("KIDSROOM_GATEWAY_INSTANCE")
                .unwrap_or_else(|| DEFAULT_GATEWAY_INSTANCE.to_string()),
            api_key: lookup("KIDSROOM_GATEWAY_API_KEY")
                .context("KIDSROOM_GATEWAY_API_KEY is required")?,
            timeout: Duration::from_secs(parse_secs(
                lookup("KIDSROOM_GATEWAY_TIMEOUT_SECS"),
                "KIDSROOM_GATEWAY_TIMEOUT_SECS",
                DEFAULT_GATEWAY_TIMEOUT_SECS,
            )?),
        };

        let refresh_interval = Duration::from_secs(parse_secs(
            lookup("KIDSROOM_REFRESH_INTERVAL_SECS"),
            "KIDSROOM_REFRESH_INTERVAL_SECS",
            DEFAULT_REFRESH_INTERVAL_SECS,
        )?);

        Ok(Self {
            database_url,
            listen_addr,
            app_password,
            gateway,
            refresh_interval,
        })
    }
}

fn parse_secs(value: Option<String>, key: &str, default: u64) -> Result<u64> {
    match value {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{} is not a valid number of seconds", key)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required() -> HashMap<String, String> {
        env(&[
            ("KIDSROOM_APP_PASSWORD", "segredo"),
            ("KIDSROOM_GATEWAY_URL", "https://gateway.example.com"),
            ("KIDSROOM_GATEWAY_API_KEY", "422442"),
        ])
    }

    #[test]
    fn test_defaults_fill_in() {
        let vars = required();
        let config = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.database_url, "sqlite:kids_room.db");
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.gateway.instance, "kids_room");
        assert_eq!(config.gateway.timeout, Duration::from_secs(40));
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_missing_password_is_an_error() {
        let mut vars = required();
        vars.remove("KIDSROOM_APP_PASSWORD");

        let result = AppConfig::from_lookup(|k| vars.get(k).cloned());
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let mut vars = required();
        vars.insert("KIDSROOM_LISTEN_ADDR".to_string(), "0.0.0.0:8081".to_string());
        vars.insert("KIDSROOM_REFRESH_INTERVAL_SECS".to_string(), "15".to_string());

        let config = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.listen_addr.port(), 8081);
        assert_eq!(config.refresh_interval, Duration::from_secs(15));
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        let mut vars = required();
        vars.insert(
            "KIDSROOM_GATEWAY_TIMEOUT_SECS".to_string(),
            "quarenta".to_string(),
        );

        assert!(AppConfig::from_lookup(|k| vars.get(k).cloned()).is_err());
    }
}
