use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::api::thingspeak::FeedClient;

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Feed URL, without the `results` query parameter
    pub endpoint: String,
    /// Number of most recent entries requested per tick
    pub results: u32,
    pub interval_seconds: u64,
    pub host: String,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: FeedClient::DEFAULT_ENDPOINT.to_string(),
            results: 10,
            interval_seconds: 10,
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

fn read_string(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: String) -> String {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default,
    }
}

fn read_parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return default;
    };

    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            warn!("Invalid value '{}' for {}, using default {}", raw, key, default);
            default
        }
    }
}

impl DashboardConfig {
    /// Build a config from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mut interval_seconds =
            read_parsed(&lookup, "DASHBOARD_INTERVAL_SECONDS", defaults.interval_seconds);
        if interval_seconds == 0 {
            warn!("DASHBOARD_INTERVAL_SECONDS must be positive, using default {}", defaults.interval_seconds);
            interval_seconds = defaults.interval_seconds;
        }

        Self {
            endpoint: read_string(&lookup, "DASHBOARD_ENDPOINT", defaults.endpoint),
            results: read_parsed(&lookup, "DASHBOARD_RESULTS", defaults.results),
            interval_seconds,
            host: read_string(&lookup, "DASHBOARD_HOST", defaults.host),
            port: read_parsed(&lookup, "DASHBOARD_PORT", defaults.port),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
        let config = DashboardConfig::from_lookup(|_| None);
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.interval(), Duration::from_secs(10));
        assert_eq!(config.bind_addr().unwrap(), "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("DASHBOARD_ENDPOINT", " http://localhost:9000/feeds.json "),
            ("DASHBOARD_RESULTS", "25"),
            ("DASHBOARD_INTERVAL_SECONDS", "3"),
            ("DASHBOARD_HOST", "127.0.0.1"),
            ("DASHBOARD_PORT", "8080"),
        ]));

        assert_eq!(config.endpoint, "http://localhost:9000/feeds.json");
        assert_eq!(config.results, 25);
        assert_eq!(config.interval_seconds, 3);
        assert_eq!(config.bind_addr().unwrap(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("DASHBOARD_RESULTS", "ten"),
            ("DASHBOARD_INTERVAL_SECONDS", "0"),
            ("DASHBOARD_PORT", "70000"),
            ("DASHBOARD_ENDPOINT", "   "),
        ]));

        assert_eq!(config, DashboardConfig::default());
    }
}
