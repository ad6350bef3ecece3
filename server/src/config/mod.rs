use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layers;

const DEFAULT_DATABASE_URL: &str = "sqlite://eventos.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_JWT_SECRET: &str = "jwt-secret-string";
const DEFAULT_JWT_TTL_MINUTES: i64 = 15;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub jwt_ttl: chrono::Duration,
    pub request_timeout: Duration,
    /// Comma separated CORS allow-list.
    pub cors_allowed_origins: String,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET is not set, falling back to the development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            bind_addr: parse_var("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))),
            jwt_secret,
            jwt_ttl: chrono::Duration::minutes(parse_var(
                "JWT_TTL_MINUTES",
                DEFAULT_JWT_TTL_MINUTES,
            )),
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            production: env::var("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
        }
    }

    /// Settings for tests: throwaway secret, in-memory database.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: "test-secret".to_string(),
            jwt_ttl: chrono::Duration::minutes(DEFAULT_JWT_TTL_MINUTES),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cors_allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
            production: false,
        }
    }
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Config: invalid value for {}='{}': {}", key, raw, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        env::set_var("EVENTOS_TEST_TIMEOUT", "not-a-number");
        assert_eq!(parse_var("EVENTOS_TEST_TIMEOUT", 7u64), 7);

        env::set_var("EVENTOS_TEST_TIMEOUT", " 12 ");
        assert_eq!(parse_var("EVENTOS_TEST_TIMEOUT", 7u64), 12);
        env::remove_var("EVENTOS_TEST_TIMEOUT");
    }

    #[test]
    fn test_default_origins_are_valid() {
        let origins = cors::parse_origins(DEFAULT_ALLOWED_ORIGINS);
        assert_eq!(origins.len(), 2);
    }

    #[test]
    fn test_parse_var_missing_uses_default() {
        env::remove_var("EVENTOS_TEST_MISSING");
        assert_eq!(parse_var("EVENTOS_TEST_MISSING", 5u32), 5);
    }
}
