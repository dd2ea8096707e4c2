//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Poll behaviour configuration.
    #[serde(default)]
    pub polls: PollsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Poll listing and administration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PollsConfig {
    /// How many questions the index and private listings show.
    #[serde(default = "default_latest_limit")]
    pub latest_limit: u64,
    /// Bearer token for the admin endpoints. Admin is disabled when unset.
    #[serde(default)]
    pub admin_token: Option<String>,
}

impl Default for PollsConfig {
    fn default() -> Self {
        Self {
            latest_limit: default_latest_limit(),
            admin_token: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_min_connections() -> u32 {
    1
}

const fn default_latest_limit() -> u64 {
    5
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `MYPOLL_ENV`)
    /// 3. Environment variables with `MYPOLL_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("MYPOLL_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MYPOLL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file, still honouring `MYPOLL__*`
    /// environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("MYPOLL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = parse(
            r#"
            [database]
            url = "postgres://localhost/mypoll"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.polls.latest_limit, 5);
        assert!(config.polls.admin_token.is_none());
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = parse(
            r#"
            [server]
            port = 9000

            [database]
            url = "postgres://db/mypoll"
            max_connections = 20

            [polls]
            latest_limit = 10
            admin_token = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.polls.latest_limit, 10);
        assert_eq!(config.polls.admin_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_shipped_default_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = Config::from_file(path).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.polls.latest_limit, 5);
        assert!(config.database.url.starts_with("postgres://"));
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        assert!(parse("[server]\nport = 8000\n").is_err());
    }
}
