//! HTTP endpoint for location runs.
//!
//! - `POST /api/simulate`: multipart form with `platform`, and one of
//!   `manual`, `batch` or a `gpx` file. Answers `{"total": n}` once the whole
//!   run has been played, or status 500 with `{"error": msg}`.
//! - `GET /api/devices?platform=p`: active device ids for a platform.
//! - `GET /health`: liveness probe.

use crate::error::{CliError, CliResult};
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use geofix::{CommandRunner, GpxSource, LocationSequencer, Platform, Submission};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// HTTP endpoint configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// Enable CORS
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors: false,
        }
    }
}

impl ServerConfig {
    /// Create a builder
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// `host:port` to bind
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL for log output
    #[must_use]
    pub fn http_url(&self) -> String {
        format!("http://{}", self.address())
    }
}

/// Builder for `ServerConfig`
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Set bind address
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set HTTP port
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable CORS
    #[must_use]
    pub const fn cors(mut self, enabled: bool) -> Self {
        self.config.cors = enabled;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> ServerConfig {
        self.config
    }
}

#[derive(Debug, Deserialize)]
struct DevicesQuery {
    platform: Option<String>,
}

/// Build the application router around a shared sequencer.
///
/// Request bodies are unbounded so long GPX tracks are accepted.
pub fn router<R>(sequencer: Arc<LocationSequencer<R>>, cors: bool) -> Router
where
    R: CommandRunner + 'static,
{
    let app = Router::new()
        .route("/api/simulate", post(simulate::<R>))
        .route("/api/devices", get(devices::<R>))
        .route("/health", get(|| async { "ok" }))
        .with_state(sequencer)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http());

    if cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

/// Bind and serve until Ctrl+C
pub async fn serve<R>(config: &ServerConfig, sequencer: Arc<LocationSequencer<R>>) -> CliResult<()>
where
    R: CommandRunner + 'static,
{
    let app = router(sequencer, config.cors);
    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| CliError::server(format!("cannot bind {address}: {e}")))?;

    tracing::info!(url = %config.http_url(), cors = config.cors, "geofix endpoint listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CliError::server(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn error_response(message: impl std::fmt::Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
        .into_response()
}

async fn simulate<R>(
    State(sequencer): State<Arc<LocationSequencer<R>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    R: CommandRunner + 'static,
{
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return error_response(rejection.body_text()),
    };
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => return error_response(e),
    };

    match sequencer.simulate(&submission).await {
        Ok(summary) => Json(serde_json::json!({ "total": summary.coordinates })).into_response(),
        Err(e) => {
            if e.is_input_error() {
                tracing::debug!(error = %e, "rejected simulation request");
            } else {
                tracing::warn!(error = %e, "simulation request failed");
            }
            error_response(e)
        }
    }
}

async fn devices<R>(
    State(sequencer): State<Arc<LocationSequencer<R>>>,
    Query(query): Query<DevicesQuery>,
) -> Response
where
    R: CommandRunner + 'static,
{
    let platform = Platform::from_optional(query.platform.as_deref());
    match sequencer.list_devices(platform).await {
        Ok(devices) => Json(serde_json::json!({
            "platform": platform,
            "devices": devices,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Decode the form; a field counts as supplied whenever it is present
async fn read_submission(mut multipart: Multipart) -> Result<Submission, String> {
    let mut submission = Submission::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "platform" => {
                let text = field.text().await.map_err(|e| e.body_text())?;
                submission = submission.with_platform(text);
            }
            "manual" => {
                let text = field.text().await.map_err(|e| e.body_text())?;
                submission = submission.with_manual(text);
            }
            "batch" => {
                let text = field.text().await.map_err(|e| e.body_text())?;
                submission = submission.with_batch(text);
            }
            "gpx" => {
                let bytes = field.bytes().await.map_err(|e| e.body_text())?;
                submission = submission.with_gpx(GpxSource::Bytes(bytes.to_vec()));
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }
    Ok(submission)
}
