use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origin: String,
    pub strict_status_transitions: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "mediremind.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_allowed_origin: "http://localhost:5173".to_string(),
            strict_status_transitions: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using {}", defaults.database_url);
                    defaults.database_url.clone()
                }),
            host: env::var("HOST")
                .unwrap_or_else(|_| defaults.host.clone()),
            port: match env::var("PORT") {
                Ok(raw) => raw.parse().unwrap_or_else(|_| {
                    warn!("PORT '{}' is not a valid port, using {}", raw, defaults.port);
                    defaults.port
                }),
                Err(_) => defaults.port,
            },
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| {
                    warn!("CORS_ALLOWED_ORIGIN not set, using {}", defaults.cors_allowed_origin);
                    defaults.cors_allowed_origin.clone()
                }),
            strict_status_transitions: env::var("STRICT_STATUS_TRANSITIONS")
                .map(|raw| parse_flag(&raw))
                .unwrap_or(defaults.strict_status_transitions),
        };

        if config.is_in_memory() {
            warn!("Using an in-memory database - data will not survive a restart");
        }

        config
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url == ":memory:"
    }

    /// Host and port to bind. Host names are resolved by the listener, so an
    /// unresolvable `HOST` fails at startup.
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
