//! Process-wide service configuration.
//!
//! [`ServerConfig`] is built once at startup from [`ServeArgs`] and shared
//! read-only by the router. It owns everything the HTTP layer needs: the
//! bind address, the CORS allow-list, and the request body limit.
use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::cli::ServeArgs;
use crate::error::ServerError;

/// Default request body limit: 2 MiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Origin of the pipeline editor in local development.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Validated configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub addr: SocketAddr,
    /// Origins allowed to make credentialed cross-origin requests.
    pub allowed_origins: Vec<HeaderValue>,
    /// Maximum accepted request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            allowed_origins: vec![HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN)],
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl ServerConfig {
    /// Validates CLI/environment arguments into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// - [`ServerError::InvalidBindAddress`] if `host` is not an IP address.
    /// - [`ServerError::InvalidOrigin`] if an origin is empty, is the `*`
    ///   wildcard (not allowed together with credentials), or is not a valid
    ///   header value.
    pub fn from_args(args: &ServeArgs) -> Result<Self, ServerError> {
        let ip: IpAddr = args
            .host
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ServerError::InvalidBindAddress {
                host: args.host.clone(),
                detail: e.to_string(),
            })?;

        let allowed_origins = args
            .allowed_origins
            .iter()
            .map(|origin| parse_origin(origin))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            addr: SocketAddr::new(ip, args.port),
            allowed_origins,
            max_body_size: args.max_body_size,
        })
    }

    /// Builds the CORS layer for the allow-listed origins.
    ///
    /// Credentials are allowed, so methods and headers are mirrored from the
    /// preflight request rather than answered with `*`.
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed_origins.iter().cloned()))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue, ServerError> {
    let trimmed = origin.trim();
    let reject = |detail: &str| ServerError::InvalidOrigin {
        origin: origin.to_owned(),
        detail: detail.to_owned(),
    };
    if trimmed.is_empty() {
        return Err(reject("origin is empty"));
    }
    if trimmed == "*" {
        return Err(reject("wildcard origin cannot be combined with credentials"));
    }
    HeaderValue::from_str(trimmed).map_err(|e| reject(&e.to_string()))
}
