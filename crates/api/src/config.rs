/// Wildcard accepted in `CORS_ORIGINS` to mirror whatever origin calls.
pub const ANY_ORIGIN: &str = "*";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Database pool
/// settings live in [`mindcard_db::DbConfig`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Name reported by the health endpoints.
    pub app_name: String,
    /// Insert sample cards when the table is empty.
    pub seed_sample_data: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: '{value}'")]
    Invalid { var: &'static str, value: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            cors_origins: vec![ANY_ORIGIN.to_string()],
            request_timeout_secs: 30,
            app_name: "mind-card-server".into(),
            seed_sample_data: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default            |
    /// |------------------------|--------------------|
    /// | `HOST`                 | `0.0.0.0`          |
    /// | `PORT`                 | `8080`             |
    /// | `CORS_ORIGINS`         | `*`                |
    /// | `REQUEST_TIMEOUT_SECS` | `30`               |
    /// | `APP_NAME`             | `mind-card-server` |
    /// | `SEED_SAMPLE_DATA`     | `true`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => defaults.cors_origins.clone(),
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT", defaults.port)?,
            cors_origins,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            app_name: std::env::var("APP_NAME").unwrap_or(defaults.app_name),
            seed_sample_data: env_parse("SEED_SAMPLE_DATA", defaults.seed_sample_data)?,
        })
    }

    /// Whether CORS should reflect the caller's origin instead of a list.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_parse<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    parse_var(var, std::env::var(var).ok(), default)
}

/// Parse a raw variable value, keeping `default` when the variable is unset.
fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}
