//! API server setup and configuration.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{Result, SammelbandError, ServiceConfig};

use super::handlers::{health_handler, upload_images_pdfs_handler, upload_rtf_handler};
use super::types::{ApiSizeLimits, ApiState};

/// Parse size limits from the environment.
///
/// Reads `SAMMELBAND_MAX_UPLOAD_SIZE_MB` and applies it to both the total
/// request body and individual multipart fields. Falls back to the default
/// (100 MB) if unset or invalid.
fn parse_size_limits_from_env() -> ApiSizeLimits {
    const DEFAULT_MB: usize = 100;

    if let Ok(value) = std::env::var("SAMMELBAND_MAX_UPLOAD_SIZE_MB") {
        match value.parse::<usize>() {
            Ok(mb) if mb > 0 => {
                tracing::info!("Upload size limit configured from environment: {} MB", mb);
                return ApiSizeLimits::from_mb(mb, mb);
            }
            _ => {
                tracing::warn!(
                    "Failed to parse SAMMELBAND_MAX_UPLOAD_SIZE_MB='{}', must be a positive integer",
                    value
                );
            }
        }
    }

    let limits = ApiSizeLimits::from_mb(DEFAULT_MB, DEFAULT_MB);
    tracing::info!(
        "Upload size limit: 100 MB (default, {} bytes) - configure with SAMMELBAND_MAX_UPLOAD_SIZE_MB",
        limits.max_request_body_bytes
    );
    limits
}

/// Create the API router with all routes configured.
///
/// Public so the router can be embedded in a larger application. The
/// configured directories must exist; call `ServiceConfig::ensure_dirs`
/// once at startup.
pub fn create_router(config: ServiceConfig) -> Router {
    create_router_with_limits(config, ApiSizeLimits::default())
}

/// Create the API router with custom size limits.
pub fn create_router_with_limits(config: ServiceConfig, limits: ApiSizeLimits) -> Router {
    let state = ApiState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/upload_images_pdfs", post(upload_images_pdfs_handler))
        .route("/upload_rtf", post(upload_rtf_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server.
///
/// Creates the configured directories, binds `host:port`, and serves until
/// the process exits.
///
/// # Examples
///
/// ```no_run
/// use sammelband::{ServiceConfig, api::serve};
///
/// #[tokio::main]
/// async fn main() -> sammelband::Result<()> {
///     serve("0.0.0.0", 9000, ServiceConfig::from_env()).await?;
///     Ok(())
/// }
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16, config: ServiceConfig) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|err| SammelbandError::validation(format!("Invalid host address: {err}")))?;

    config.ensure_dirs()?;
    let limits = parse_size_limits_from_env();

    let addr = SocketAddr::new(ip, port);
    let app = create_router_with_limits(config, limits);

    tracing::info!("Starting sammelband API server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(SammelbandError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|err| SammelbandError::Other(err.to_string()))?;

    Ok(())
}
