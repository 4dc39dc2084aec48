use std::{net::SocketAddr, sync::Arc};

use {
    axum::{
        Router,
        extract::State,
        response::{IntoResponse, Json},
        routing::{get, post},
    },
    tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    },
    tracing::info,
};

use crate::{
    Error, Result, chat_routes, homepage, render_routes, search_routes, state::GatewayState,
};

// ── Shared app state ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayState>,
}

// ── Server startup ───────────────────────────────────────────────────────────

/// Build the gateway router (shared between production startup and tests).
pub fn build_gateway_app(state: Arc<GatewayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(homepage::index_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_routes::chat_handler))
        .route("/search/add", post(search_routes::add_handler))
        .route("/search/query", get(search_routes::query_handler))
        .route("/diagram", post(render_routes::diagram_handler))
        .route("/math", post(render_routes::math_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { gateway: state })
}

/// Start the gateway HTTP server and serve until Ctrl-C.
pub async fn start_gateway(bind: &str, port: u16, state: Arc<GatewayState>) -> Result<()> {
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .map_err(|source| Error::InvalidAddress {
            addr: format!("{bind}:{port}"),
            source,
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;
    let local = listener.local_addr()?;

    info!(
        addr = %local,
        diagram_engine = state.diagram.engine(),
        math_engine = state.math.engine(),
        "juliet gateway listening"
    );

    let app = build_gateway_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("juliet gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": state.gateway.version,
        "documents": state.gateway.documents.len().await,
    }))
}
