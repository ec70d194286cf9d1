//! Server configuration

use uuid::Uuid;

use crate::error::BoxError;

/// Payment-method id seeded for the MyPay wallet
pub const DEFAULT_MYPAY_METHOD_ID: &str = "e2ae7f92-eefb-47a7-aa1b-c7d157ab94d7";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Payment-method id that designates the MyPay wallet
    pub mypay_method_id: Uuid,
    /// Single origin allowed by CORS (the web frontend)
    pub cors_allowed_origin: String,
    /// PostgreSQL pool size
    pub db_max_connections: u32,
    /// Apply embedded migrations on startup
    pub run_migrations: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let database_url = lookup("DATABASE_URL").ok_or("DATABASE_URL must be set")?;
        if database_url.is_empty() && environment != "development" {
            return Err(format!("DATABASE_URL must not be empty in {environment} environment").into());
        }

        let mypay_raw = lookup("MYPAY_METHOD_ID")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_MYPAY_METHOD_ID.into());
        let mypay_method_id = Uuid::parse_str(&mypay_raw)
            .map_err(|e| format!("MYPAY_METHOD_ID is not a UUID ({mypay_raw}): {e}"))?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(format!("LOG_FORMAT must be pretty or json, got {other}").into()),
        };

        Ok(Self {
            database_url,
            http_port: parse_or("HTTP_PORT", &lookup, 8080)?,
            environment,
            mypay_method_id,
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".into()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", &lookup, 10)?,
            run_migrations: parse_or("RUN_MIGRATIONS", &lookup, true)?,
            log_format,
        })
    }
}

fn parse_or<T>(name: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T, BoxError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("{name} has invalid value {raw:?}: {e}").into()),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/jasa")]))
            .unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.mypay_method_id.to_string(), DEFAULT_MYPAY_METHOD_ID);
        assert_eq!(config.cors_allowed_origin, "http://localhost:3000");
        assert_eq!(config.db_max_connections, 10);
        assert!(config.run_migrations);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_missing_database_url() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
    }

    #[test]
    fn test_empty_database_url_rejected_outside_development() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", ""),
            ("ENVIRONMENT", "production"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/jasa"),
            ("HTTP_PORT", "9090"),
            ("MYPAY_METHOD_ID", "00000000-0000-0000-0000-000000000001"),
            ("RUN_MIGRATIONS", "false"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.http_port, 9090);
        assert_eq!(
            config.mypay_method_id.to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
        assert!(!config.run_migrations);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/jasa"),
            ("MYPAY_METHOD_ID", "mypay"),
        ]))
        .is_err());
        assert!(Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/jasa"),
            ("HTTP_PORT", "eighty"),
        ]))
        .is_err());
    }
}
