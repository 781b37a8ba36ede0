//! HTTP boundary for the part search aggregator.
//!
//! ## Endpoints
//!
//! - `GET /api/search?q=<text>&sources=<comma-separated names>` — run one
//!   aggregated search
//! - `GET /api/img?url=<absolute URL>` — relay one external image
//! - `GET /health` — liveness probe
//!
//! The boundary validates query shape, maps user-correctable failures to
//! 4xx with a structured body, and never leaks internal error detail:
//! unexpected faults are logged server-side and answered with a generic
//! 500 body.

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use partscout_search::{SearchError, SearchQuery, SourceRegistry, aggregator};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::relay::{self, RELAY_CACHE_CONTROL};

/// Structured error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message. Never carries internal detail.
    pub error: String,
}

/// Query parameters accepted by `GET /api/search`.
#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    sources: Option<String>,
}

/// Query parameters accepted by `GET /api/img`.
#[derive(Debug, Deserialize)]
struct ImgParams {
    #[serde(default)]
    url: Option<String>,
}

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    registry: Arc<SourceRegistry>,
    search_config: partscout_search::SearchConfig,
    relay_client: reqwest::Client,
}

/// The PartScout HTTP service.
///
/// Binds on start, serves in a background tokio task, and aborts the task
/// on shutdown or drop.
pub struct PartServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl PartServer {
    /// Start the HTTP service over the given source registry.
    ///
    /// Binds to `{config.server.host}:{config.server.port}` (use port `0`
    /// for auto-assign) and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Server`] if the TCP listener cannot bind.
    pub async fn start(registry: Arc<SourceRegistry>, config: &AppConfig) -> crate::error::Result<Self> {
        let state = AppState {
            registry,
            search_config: config.search.clone(),
            relay_client: reqwest::Client::new(),
        };

        let app = Router::new()
            .route("/health", get(handle_health))
            .route("/api/search", get(handle_search))
            .route("/api/img", get(handle_img))
            .with_state(state);

        let bind_addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| AppError::Server(format!("failed to get local addr: {e}")))?;

        info!("partscout listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for PartServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Split a `sources` query parameter into a name filter.
///
/// Blank entries are dropped; an absent or all-blank parameter yields an
/// empty filter, which downstream means "all registered sources".
fn parse_sources_param(param: Option<&str>) -> Vec<String> {
    param
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// `GET /health` — liveness probe.
async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET /api/search` — run one aggregated search.
async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let text = params.q.as_deref().unwrap_or("").trim().to_string();
    if text.is_empty() {
        return bad_request("missing q parameter");
    }

    let source_names = parse_sources_param(params.sources.as_deref());
    let request_id = Uuid::new_v4();
    tracing::debug!(%request_id, query = %text, sources = ?source_names, "search request");

    let query = SearchQuery::with_sources(text, source_names);
    match aggregator::aggregate(&query, &state.registry, &state.search_config).await {
        Ok(response) => {
            tracing::debug!(%request_id, count = response.items.len(), "search complete");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err @ (SearchError::InvalidQuery(_) | SearchError::NoActiveSources(_))) => {
            bad_request(err.to_string())
        }
        Err(err) => {
            tracing::error!(%request_id, error = %err, "search failed unexpectedly");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "internal server error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `GET /api/img` — relay one external image with a day-long cache header.
async fn handle_img(State(state): State<AppState>, Query(params): Query<ImgParams>) -> Response {
    let Some(url) = params.url.filter(|u| !u.trim().is_empty()) else {
        return bad_request("missing url parameter");
    };

    match relay::relay_image(&state.relay_client, &url).await {
        Ok(image) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, image.content_type),
                (header::CACHE_CONTROL, RELAY_CACHE_CONTROL.to_string()),
            ],
            image.body,
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(%url, error = %err, "image relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "image relay failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_param_absent_means_all() {
        assert!(parse_sources_param(None).is_empty());
    }

    #[test]
    fn sources_param_blank_means_all() {
        assert!(parse_sources_param(Some("")).is_empty());
        assert!(parse_sources_param(Some(" , ,")).is_empty());
    }

    #[test]
    fn sources_param_splits_and_trims() {
        let names = parse_sources_param(Some("PartSelect, RepairClinic ,,ReliableParts"));
        assert_eq!(
            names,
            vec![
                "PartSelect".to_string(),
                "RepairClinic".to_string(),
                "ReliableParts".to_string()
            ]
        );
    }

    #[test]
    fn error_body_wire_shape() {
        let body = ErrorBody {
            error: "missing q parameter".into(),
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert_eq!(json, r#"{"error":"missing q parameter"}"#);
    }
}
