use std::env;

use auth::TokenLifetimes;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Flat variable names read on top of every other source, mapped to their
/// configuration keys.
const FLAT_ENV_OVERRIDES: [(&str, &str); 10] = [
    ("DATABASE_URL", "database.url"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_NAME", "database.name"),
    ("DB_SSLMODE", "database.sslmode"),
    ("JWT_SECRET", "jwt.secret"),
    ("ACCESS_TOKEN_EXP_HOURS", "jwt.access_token_expiration_hours"),
    ("REFRESH_TOKEN_EXP_DAYS", "jwt.refresh_token_expiration_days"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

/// Connection settings. Either `url` or the individual parts must be set.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
    pub sslmode: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiration_hours: i64,
    pub refresh_token_expiration_days: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Flat variables (JWT_SECRET, DATABASE_URL, DB_HOST, ACCESS_TOKEN_EXP_HOURS, etc.)
    /// 2. Sectioned variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    ///
    /// A `.env` file in the working directory is read into the process
    /// environment first, if present.
    pub fn load() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_err() {
            tracing::debug!("No .env file found, using process environment");
        }

        Self::load_with(|name| env::var(name).ok())
    }

    fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let run_mode = lookup("RUN_MODE").unwrap_or_else(|| "development".to_string());

        let mut builder = ConfigBuilder::builder()
            .set_default("database.sslmode", "disable")?
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 8080)?
            .set_default("jwt.access_token_expiration_hours", 1)?
            .set_default("jwt.refresh_token_expiration_days", 7)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"));

        for (variable, key) in FLAT_ENV_OVERRIDES {
            builder = builder.set_override_option(key, lookup(variable))?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        self.database.connection_url()?;
        self.jwt.token_lifetimes()?;
        Ok(())
    }
}

impl DatabaseConfig {
    /// Resolve the PostgreSQL connection URL.
    ///
    /// `url` wins when set; otherwise it is assembled from user, password,
    /// host, port and name, all of which are then required.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }

        match (&self.user, &self.password, &self.host, self.port, &self.name) {
            (Some(user), Some(password), Some(host), Some(port), Some(name)) => Ok(format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                user, password, host, port, name, self.sslmode
            )),
            _ => Err(ConfigError::Message(
                "database.url or all of database.user, database.password, database.host, \
                 database.port and database.name must be set"
                    .to_string(),
            )),
        }
    }
}

impl JwtConfig {
    pub fn token_lifetimes(&self) -> Result<TokenLifetimes, ConfigError> {
        let access = chrono::Duration::try_hours(self.access_token_expiration_hours)
            .ok_or_else(|| {
                ConfigError::Message("jwt.access_token_expiration_hours is out of range".to_string())
            })?;
        let refresh = chrono::Duration::try_days(self.refresh_token_expiration_days)
            .ok_or_else(|| {
                ConfigError::Message("jwt.refresh_token_expiration_days is out of range".to_string())
            })?;

        TokenLifetimes::new(access, refresh).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
