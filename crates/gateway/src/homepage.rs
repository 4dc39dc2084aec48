//! `GET /`: a single mobile-friendly page that talks to `/chat`.

use {
    askama::Template,
    axum::{
        extract::State,
        http::StatusCode,
        response::{Html, IntoResponse, Response},
    },
    tracing::warn,
};

use crate::server::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    version: &'a str,
}

pub async fn index_handler(State(state): State<AppState>) -> Response {
    let page = IndexTemplate {
        version: &state.gateway.version,
    };
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!(error = %e, "failed to render homepage");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        },
    }
}
