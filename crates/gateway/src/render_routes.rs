//! `POST /diagram` and `POST /math`: always answer with a PNG.
//!
//! The source is taken from the `dot_text` / `expr` query parameter, or from
//! the raw request body when the parameter is absent.

use {
    axum::{
        Json,
        body::Bytes,
        extract::{Query, State},
        http::{StatusCode, header},
        response::{IntoResponse, Response},
    },
    juliet_render::RenderPipeline,
    serde::Deserialize,
    tracing::{error, info},
};

use crate::server::AppState;

/// Response header naming the tier that produced the image (`rich` or `fallback`).
pub const RENDER_PATH_HEADER: &str = "x-juliet-render-path";

#[derive(Debug, Default, Deserialize)]
pub struct DiagramParams {
    pub dot_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MathParams {
    pub expr: Option<String>,
}

pub async fn diagram_handler(
    State(state): State<AppState>,
    Query(params): Query<DiagramParams>,
    body: Bytes,
) -> Response {
    let source = params.dot_text.unwrap_or_else(|| body_text(&body));
    render_png("diagram", state.gateway.diagram.clone(), source).await
}

pub async fn math_handler(
    State(state): State<AppState>,
    Query(params): Query<MathParams>,
    body: Bytes,
) -> Response {
    let source = params.expr.unwrap_or_else(|| body_text(&body));
    render_png("math", state.gateway.math.clone(), source).await
}

fn body_text(body: &Bytes) -> String {
    String::from_utf8_lossy(body).into_owned()
}

async fn render_png(kind: &'static str, pipeline: RenderPipeline, source: String) -> Response {
    let chars = source.chars().count();
    let result = tokio::task::spawn_blocking(move || pipeline.render(&source)).await;

    match result {
        Ok(Ok(out)) => {
            info!(
                kind,
                path = out.path.as_str(),
                chars,
                bytes = out.bytes.len(),
                "rendered image"
            );
            (
                [(header::CONTENT_TYPE, out.media_type)],
                [(RENDER_PATH_HEADER, out.path.as_str())],
                out.bytes,
            )
                .into_response()
        },
        Ok(Err(e)) => {
            error!(kind, error = %e, "fallback renderer failed");
            internal_error(e.to_string())
        },
        Err(e) => {
            error!(kind, error = %e, "render task panicked");
            internal_error("render task failed".to_string())
        },
    }
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "ok": false, "error": message })),
    )
        .into_response()
}
