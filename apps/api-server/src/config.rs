//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use tutorial_infra::database::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Default JSON body limit (256 KiB).
const DEFAULT_JSON_LIMIT: usize = 256 * 1024;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub json_limit: usize,
    pub database: Option<DatabaseConfig>,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                database_name: lookup("DATABASE_NAME")
                    .unwrap_or_else(|| "tutorials_db".to_string()),
                max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(100),
                min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(10),
            });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var(&lookup, "PORT").unwrap_or(8080),
            json_limit: parse_var(&lookup, "JSON_LIMIT_BYTES").unwrap_or(DEFAULT_JSON_LIMIT),
            database,
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }
}

/// Parse a variable, treating unparsable values as unset.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.json_limit, DEFAULT_JSON_LIMIT);
        assert!(config.database.is_none());
        assert!(!config.telemetry.json_logs);
    }

    #[test]
    fn test_database_settings() {
        let config = config(&[
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("DATABASE_NAME", "tutorials_test"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("PORT", "not-a-port"),
        ]);

        let db = config.database.unwrap();
        assert_eq!(db.url, "mongodb://localhost:27017");
        assert_eq!(db.database_name, "tutorials_test");
        assert_eq!(db.max_connections, 20);
        assert_eq!(db.min_connections, 10);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_blank_database_url_means_in_memory() {
        assert!(config(&[("DATABASE_URL", " ")]).database.is_none());
    }
}
