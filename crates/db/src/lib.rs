//! PostgreSQL storage for cards: pool setup, migrations, row models and the
//! card repository.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod seed;

pub type DbPool = sqlx::PgPool;

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} must be a non-negative integer, got '{value}'")]
    Invalid { var: &'static str, value: String },
}

impl DbConfig {
    /// Pool settings with defaults for everything but the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }

    /// Load pool settings from the environment.
    ///
    /// | Env Var                   | Default  |
    /// |---------------------------|----------|
    /// | `DATABASE_URL`            | required |
    /// | `DB_MAX_CONNECTIONS`      | `20`     |
    /// | `DB_MIN_CONNECTIONS`      | `5`      |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `30`     |
    /// | `DB_IDLE_TIMEOUT_SECS`    | `600`    |
    /// | `DB_MAX_LIFETIME_SECS`    | `1800`   |
    pub fn from_env() -> Result<Self, DbConfigError> {
        let url =
            std::env::var("DATABASE_URL").map_err(|_| DbConfigError::Missing("DATABASE_URL"))?;
        let defaults = Self::new(url);

        Ok(Self {
            max_connections: env_number("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: env_number("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            acquire_timeout: env_secs("DB_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout)?,
            idle_timeout: env_secs("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout)?,
            max_lifetime: env_secs("DB_MAX_LIFETIME_SECS", defaults.max_lifetime)?,
            ..defaults
        })
    }
}

fn env_number<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, DbConfigError> {
    parse_number(var, std::env::var(var).ok(), default)
}

fn parse_number<T: std::str::FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, DbConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| DbConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

fn env_secs(var: &'static str, default: Duration) -> Result<Duration, DbConfigError> {
    env_number(var, default.as_secs()).map(Duration::from_secs)
}

/// Create a connection pool from the given settings.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(&config.url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
