use anyhow::{Context, Result, anyhow};
use std::{str::FromStr, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ContentfulConfig {
    pub space_id: String,
    pub access_token: String,
    pub environment: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub interval: Duration,
    pub page_size: i64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub port: u16,
    pub contentful: ContentfulConfig,
    pub sync: SyncConfig,
    pub otel_endpoint: Option<String>,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store_backend = match var("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(anyhow!(
                    "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                    other
                ));
            }
        };

        let database_url = var("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("Missing environment variable: DATABASE_URL"));
        }

        let run_migrations = parse_bool("RUN_MIGRATIONS", var("RUN_MIGRATIONS"), true)?;
        let db_min_conn = parse_or("DB_MIN_CONN", var("DB_MIN_CONN"), 1u32)?;
        let db_max_conn = parse_or("DB_MAX_CONN", var("DB_MAX_CONN"), 5u32)?;
        let port = parse_or("PORT", var("PORT"), 3000u16)?;

        let space_id = var("CONTENTFUL_SPACE_ID")
            .context("Missing environment variable: CONTENTFUL_SPACE_ID")?;
        let access_token = var("CONTENTFUL_ACCESS_TOKEN")
            .context("Missing environment variable: CONTENTFUL_ACCESS_TOKEN")?;
        let environment = var("CONTENTFUL_ENVIRONMENT").unwrap_or_else(|| "master".to_string());
        let base_url = var("CONTENTFUL_BASE_URL")
            .unwrap_or_else(|| "https://cdn.contentful.com".to_string());

        let interval_secs = parse_or("SYNC_INTERVAL_SECS", var("SYNC_INTERVAL_SECS"), 3600u64)?;
        if interval_secs == 0 {
            return Err(anyhow!("SYNC_INTERVAL_SECS must be greater than zero"));
        }

        let page_size = parse_or("SYNC_PAGE_SIZE", var("SYNC_PAGE_SIZE"), 1000i64)?;
        if !(1..=1000).contains(&page_size) {
            return Err(anyhow!(
                "SYNC_PAGE_SIZE must be between 1 and 1000, got {}",
                page_size
            ));
        }

        let is_dev = var("DEV_MODE").is_some_and(|v| v == "true" || v == "1");
        let enable_file_log = var("ENABLE_FILE_LOG").is_some_and(|v| v == "true");

        Ok(Self {
            store_backend,
            database_url,
            run_migrations,
            db_min_conn,
            db_max_conn,
            port,
            contentful: ContentfulConfig {
                space_id,
                access_token,
                environment,
                base_url,
            },
            sync: SyncConfig {
                interval: Duration::from_secs(interval_secs),
                page_size,
            },
            otel_endpoint: var("OTEL_ENDPOINT"),
            is_dev,
            enable_file_log,
        })
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> Result<bool> {
    match value.as_deref() {
        None => Ok(default),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(anyhow!("{key} must be 'true' or 'false', got '{}'", other)),
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    const CONTENTFUL: [(&str, &str); 2] = [
        ("CONTENTFUL_SPACE_ID", "space"),
        ("CONTENTFUL_ACCESS_TOKEN", "token"),
    ];

    #[test]
    fn defaults_apply_for_memory_backend() {
        let mut pairs = CONTENTFUL.to_vec();
        pairs.push(("STORE_BACKEND", "memory"));

        let config = config_from(&pairs).unwrap();

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.port, 3000);
        assert_eq!(config.sync.page_size, 1000);
        assert_eq!(config.sync.interval, Duration::from_secs(3600));
        assert_eq!(config.contentful.environment, "master");
        assert_eq!(config.contentful.base_url, "https://cdn.contentful.com");
        assert!(config.run_migrations);
        assert!(config.otel_endpoint.is_none());
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = config_from(&CONTENTFUL).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        let mut pairs = CONTENTFUL.to_vec();
        pairs.push(("STORE_BACKEND", "memory"));
        pairs.push(("SYNC_PAGE_SIZE", "5000"));

        assert!(config_from(&pairs).is_err());
    }

    #[test]
    fn rejects_malformed_booleans() {
        let mut pairs = CONTENTFUL.to_vec();
        pairs.push(("STORE_BACKEND", "memory"));
        pairs.push(("RUN_MIGRATIONS", "yes"));

        assert!(config_from(&pairs).is_err());
    }
}
