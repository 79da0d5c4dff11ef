use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::mediator::ConfigurationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub mediator: MediatorConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediatorConfig {
    pub dispatch_timeout_ms: u64,
    /// Identity stamped on every request until real authentication exists
    pub placeholder_user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_cors: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    pub default_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Mediator overrides
        if let Ok(v) = env::var("MEDIATOR_DISPATCH_TIMEOUT_MS") {
            self.mediator.dispatch_timeout_ms = v.parse().unwrap_or(self.mediator.dispatch_timeout_ms);
        }
        if let Ok(v) = env::var("MEDIATOR_PLACEHOLDER_USER_ID") {
            self.mediator.placeholder_user_id = v.parse().unwrap_or(self.mediator.placeholder_user_id);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Logging overrides
        if let Ok(v) = env::var("LOG_DEFAULT_FILTER") {
            self.logging.default_filter = v;
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            mediator: MediatorConfig {
                dispatch_timeout_ms: 30_000,
                placeholder_user_id: 100,
            },
            api: ApiConfig {
                enable_cors: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            logging: LoggingConfig {
                default_filter: "todos_api=debug,tower_http=debug".to_string(),
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            mediator: MediatorConfig {
                dispatch_timeout_ms: 10_000,
                placeholder_user_id: 100,
            },
            api: ApiConfig {
                enable_cors: true,
                max_request_size_bytes: 256 * 1024,
            },
            logging: LoggingConfig {
                default_filter: "todos_api=info,tower_http=info".to_string(),
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            mediator: MediatorConfig {
                dispatch_timeout_ms: 5_000,
                placeholder_user_id: 100,
            },
            api: ApiConfig {
                enable_cors: false,
                max_request_size_bytes: 64 * 1024,
            },
            logging: LoggingConfig {
                default_filter: "todos_api=info,tower_http=warn".to_string(),
            },
        }
    }

    /// Dispatch timeout, rejecting a zero budget
    pub fn dispatch_timeout(&self) -> Result<Duration, ConfigurationError> {
        match self.mediator.dispatch_timeout_ms {
            0 => Err(ConfigurationError::InvalidSetting {
                name: "mediator.dispatch_timeout_ms",
                reason: "must be greater than zero".to_string(),
            }),
            ms => Ok(Duration::from_millis(ms)),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
