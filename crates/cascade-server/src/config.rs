//! Server configuration loaded from environment variables.
//!
//! All settings have defaults. Override any variable at container / process
//! startup — no config file required.
//!
//! | Variable                   | Default                 | Description                          |
//! |----------------------------|-------------------------|--------------------------------------|
//! | `CASCADE_PORT`             | `5001`                  | HTTP listen port                     |
//! | `CASCADE_LOG_LEVEL`        | `info`                  | tracing filter string                |
//! | `CASCADE_ENGINE_URL`       | `http://127.0.0.1:5002` | influence engine base URL            |
//! | `CASCADE_SESSION_CAPACITY` | `1024`                  | max live result sessions (LRU bound) |
//! | `CASCADE_CORS_ORIGINS`     | *(empty)*               | comma-separated allowed origins; empty = permissive |

/// Runtime configuration for the Cascade server process.
#[derive(Debug)]
pub struct Config {
    /// HTTP listen port.
    pub port: u16,

    /// Tracing filter string, e.g. `"cascade_api=debug,info"`.
    pub log_level: String,

    /// Base URL of the influence engine sidecar.
    pub engine_url: String,

    /// Bound on live result sessions before LRU eviction.
    pub session_capacity: usize,

    /// Comma-separated allowed CORS origins. Empty means permissive.
    pub cors_origins: String,
}

impl Config {
    /// Load configuration from environment variables, applying defaults
    /// where a variable is absent or unparseable.
    pub fn from_env() -> Self {
        Self {
            port:             env_parse("CASCADE_PORT", 5001),
            log_level:        env_str("CASCADE_LOG_LEVEL", "info"),
            engine_url:       env_str("CASCADE_ENGINE_URL", "http://127.0.0.1:5002"),
            session_capacity: env_parse("CASCADE_SESSION_CAPACITY", 1024),
            cors_origins:     env_str("CASCADE_CORS_ORIGINS", ""),
        }
    }

    /// Allowed origins as a list; empty when permissive CORS applies.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
