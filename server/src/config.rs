use std::net::SocketAddr;

use application::retry::RetryPolicy;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use error_stack::{Report, ResultExt};
use kernel::KernelError;
use tower_http::cors::CorsLayer;

const PORT: &str = "PORT";
const CORS_ORIGIN: &str = "CORS_ORIGIN";
const ORDER_RETRY_ATTEMPTS: &str = "ORDER_RETRY_ATTEMPTS";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CORS_ORIGIN: &str = "https://abacuscdilla.github.io";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    port: u16,
    cors_origin: HeaderValue,
    retry_attempts: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
            retry_attempts: RetryPolicy::default().max_attempts(),
        }
    }
}

impl ServerConfig {
    /// Reads `PORT`, `CORS_ORIGIN` and `ORDER_RETRY_ATTEMPTS`, falling back to defaults when unset.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let default = Self::default();
        let port = match driver::env_opt(PORT)? {
            Some(port) => parse_number(PORT, &port)?,
            None => default.port,
        };
        let cors_origin = match driver::env_opt(CORS_ORIGIN)? {
            Some(origin) => HeaderValue::from_str(origin.trim())
                .change_context(KernelError::Internal)
                .attach_printable_lazy(|| format!("Env {} is not a valid origin", CORS_ORIGIN))?,
            None => default.cors_origin,
        };
        let retry_attempts = match driver::env_opt(ORDER_RETRY_ATTEMPTS)? {
            Some(attempts) => parse_number(ORDER_RETRY_ATTEMPTS, &attempts)?,
            None => default.retry_attempts,
        };
        Ok(Self {
            port,
            cors_origin,
            retry_attempts,
        })
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn cors(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.cors_origin.clone())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default().with_max_attempts(self.retry_attempts)
    }
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> error_stack::Result<N, KernelError> {
    value.trim().parse::<N>().map_err(|_| {
        Report::new(KernelError::Internal)
            .attach_printable(format!("Env {} must be a non-negative integer, got `{}`", key, value))
    })
}
