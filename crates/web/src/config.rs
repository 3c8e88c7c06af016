use crate::auth::session::SessionConfig;

/// Server configuration loaded from environment variables.
///
/// Resolved once at startup and shared through [`AppState`](crate::state::AppState).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the REST backend (default: `http://localhost:8000`).
    pub backend_url: String,
    /// Public URL the console is served under. When unset, redirects are
    /// built from each request's own origin.
    pub public_url: Option<String>,
    /// Session signing and cookie settings.
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `BACKEND_URL`          | `http://localhost:8000`    |
    /// | `PUBLIC_URL`           | unset                      |
    ///
    /// Session variables are documented on [`SessionConfig::from_env`].
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let public_url = std::env::var("PUBLIC_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 3000),
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            backend_url: env_or("BACKEND_URL", "http://localhost:8000"),
            public_url,
            session: SessionConfig::from_env(),
        }
    }
}

/// Value of `name`, or `default` when unset.
pub(crate) fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse `name` as `T`, or `default` when unset.
///
/// Panics on a value that does not parse.
pub(crate) fn parse_env<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}
