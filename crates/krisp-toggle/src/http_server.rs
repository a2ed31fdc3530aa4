//! Local HTTP control surface for Stream Deck integration.
//!
//! Serves three fixed routes on the loopback interface:
//!
//! - `POST /toggle` -- toggle the feature, answer with the resulting mode
//! - `GET /health` -- liveness probe
//! - `GET /plugin-check` -- whether the bridge is currently connected
//!
//! Everything else gets a JSON 404. All routes carry permissive CORS
//! headers so browser-based deck software can call them directly.

use crate::{AppError, AppResult};

use std::{net::SocketAddr, panic::Location, time::Duration};

use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode, header},
    routing::{get, post},
};
use error_location::ErrorLocation;
use krisp_toggle_core::{BridgeHandle, Mode};
use serde::Serialize;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, instrument};

/// Delay between triggering a toggle and reading the state back for the
/// response body. The store does not acknowledge writes, so the readback
/// needs a moment to observe the new flags.
const TOGGLE_READBACK_DELAY: Duration = Duration::from_millis(100);

/// Shared context for HTTP handlers.
#[derive(Clone)]
pub struct HttpContext {
    bridge: BridgeHandle,
    port: u16,
}

impl HttpContext {
    /// Create the handler context.
    pub fn new(bridge: BridgeHandle, port: u16) -> Self {
        Self { bridge, port }
    }
}

#[derive(Debug, Serialize)]
struct ToggleResponse {
    success: bool,
    state: Mode,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    port: u16,
}

#[derive(Debug, Serialize)]
struct PluginCheckResponse {
    installed: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// Build the control-surface router.
pub(crate) fn router(ctx: HttpContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Method fallbacks keep the contract strict: a wrong method on a known
    // path is a 404 with the JSON error body, not a bare 405.
    Router::new()
        .route("/toggle", post(toggle).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .route("/plugin-check", get(plugin_check).fallback(not_found))
        .fallback(not_found)
        .layer(cors)
        .with_state(ctx)
}

/// Serve the control surface on `127.0.0.1:<port>` until shutdown.
#[instrument(skip(ctx, shutdown_rx), fields(port = ctx.port))]
pub async fn serve(ctx: HttpContext, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], ctx.port));

    let listener =
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::HttpServerFailed {
                reason: format!("Failed to bind {}: {}", addr, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

    info!(%addr, "HTTP control surface listening");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await
        .map_err(|e| AppError::HttpServerFailed {
            reason: format!("Server error: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    info!("HTTP control surface stopped");

    Ok(())
}

/// `POST /toggle` -- always 200 with a `state` from the five-value enum,
/// even when the bridge is gone (then the state is Unknown).
async fn toggle(State(ctx): State<HttpContext>) -> Json<ToggleResponse> {
    if let Err(e) = ctx.bridge.toggle().await {
        error!(error = %e, "Toggle via HTTP failed");
    }

    tokio::time::sleep(TOGGLE_READBACK_DELAY).await;

    let state = ctx.bridge.state().await.unwrap_or(Mode::Unknown);

    Json(ToggleResponse {
        success: true,
        state,
    })
}

/// `GET /health` -- liveness.
async fn health(State(ctx): State<HttpContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        port: ctx.port,
    })
}

/// `GET /plugin-check` -- whether the bridge is currently present.
async fn plugin_check(State(ctx): State<HttpContext>) -> Json<PluginCheckResponse> {
    Json(PluginCheckResponse {
        installed: ctx.bridge.is_connected(),
    })
}

/// Any unmatched route/method combination.
async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse { error: "Not found" }),
    )
}
