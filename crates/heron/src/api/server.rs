//! API server setup and configuration.

use std::net::{IpAddr, SocketAddr};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::core::config::ClassifierConfig;
use crate::{HeronError, Result};

use super::{
    handlers::{classify_file_handler, classify_files_handler, get_classification_handler, health_handler},
    types::{ApiSizeLimits, ApiState},
};

/// Parse the request body limit from `HERON_MAX_REQUEST_BODY_BYTES`.
///
/// Falls back to the default (100 MB) if unset, zero, or not a number.
fn parse_size_limits_from_env() -> ApiSizeLimits {
    if let Ok(value) = std::env::var("HERON_MAX_REQUEST_BODY_BYTES") {
        match value.parse::<usize>() {
            Ok(bytes) if bytes > 0 => {
                tracing::info!("Request body limit configured from environment: {} bytes", bytes);
                return ApiSizeLimits::new(bytes);
            }
            _ => tracing::warn!(
                "Failed to parse HERON_MAX_REQUEST_BODY_BYTES='{}', must be a positive integer",
                value
            ),
        }
    }

    ApiSizeLimits::default()
}

fn cors_layer() -> CorsLayer {
    if let Ok(origins_str) = std::env::var("HERON_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            return CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any);
        }

        tracing::warn!("HERON_CORS_ORIGINS set but empty/invalid - falling back to permissive CORS");
    }

    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Create the API router for `config` with default body limits.
///
/// # Errors
///
/// `Validation` if a regex pattern in `config` does not compile.
pub fn create_router(config: ClassifierConfig) -> Result<Router> {
    Ok(create_router_with_state(ApiState::new(config)?, ApiSizeLimits::default()))
}

/// Create the API router around existing state.
pub fn create_router_with_state(state: ApiState, limits: ApiSizeLimits) -> Router {
    Router::new()
        .route("/classify_file", post(classify_file_handler))
        .route("/classify_files", post(classify_files_handler))
        .route("/classifications/{id}", get(get_classification_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with config file discovery.
///
/// Searches for `heron.toml` in the current and parent directories. If none is found,
/// the reference configuration is used.
///
/// # Environment Variables
///
/// ```bash
/// export HERON_CORS_ORIGINS="https://app.example.com,https://api.example.com"
/// export HERON_MAX_REQUEST_BODY_BYTES=104857600
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = match ClassifierConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded classifier config from discovered file");
            config
        }
        None => {
            tracing::info!("No config file found, using default configuration");
            ClassifierConfig::default()
        }
    };

    serve_with_config(host, port, config).await
}

/// Start the API server with explicit config.
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: ClassifierConfig) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| HeronError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let state = ApiState::new(config)?;

    // train before the first request arrives
    let classifier = state.classifier.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || classifier.warm_up_all()).await {
        tracing::warn!("Model warm-up task failed: {}", e);
    }

    let app = create_router_with_state(state, parse_size_limits_from_env());

    tracing::info!("Starting Heron API server on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(HeronError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| HeronError::Other(e.to_string()))?;

    Ok(())
}

/// Start the API server on 127.0.0.1:8000.
pub async fn serve_default() -> Result<()> {
    serve("127.0.0.1", 8000).await
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    #[test]
    fn test_create_router() {
        assert!(create_router(ClassifierConfig::default()).is_ok());
    }

    #[test]
    fn test_create_router_rejects_bad_regex() {
        let mut config = ClassifierConfig::default();
        config.document_types[0].regex_patterns.push("(".to_string());
        assert!(create_router(config).is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_size_limits_default() {
        unsafe {
            std::env::remove_var("HERON_MAX_REQUEST_BODY_BYTES");
        }

        let limits = parse_size_limits_from_env();
        assert_eq!(limits.max_request_body_bytes, 100 * 1024 * 1024);
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_size_limits_from_env_var() {
        unsafe {
            std::env::set_var("HERON_MAX_REQUEST_BODY_BYTES", "1048576");
        }

        let limits = parse_size_limits_from_env();
        assert_eq!(limits.max_request_body_bytes, 1024 * 1024);

        unsafe {
            std::env::remove_var("HERON_MAX_REQUEST_BODY_BYTES");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_size_limits_zero_is_ignored() {
        unsafe {
            std::env::set_var("HERON_MAX_REQUEST_BODY_BYTES", "0");
        }

        let limits = parse_size_limits_from_env();
        assert_eq!(limits.max_request_body_bytes, 100 * 1024 * 1024);

        unsafe {
            std::env::remove_var("HERON_MAX_REQUEST_BODY_BYTES");
        }
    }
}
