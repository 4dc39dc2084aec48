//! `POST /chat`: rule-based reply plus emotion scores.

use {
    axum::{Json, response::IntoResponse},
    juliet_chat::{Emotion, reply_kind, respond},
    serde::Deserialize,
    tracing::info,
};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

pub async fn chat_handler(Json(req): Json<ChatRequest>) -> impl IntoResponse {
    let out = respond(&req.message);
    info!(
        kind = ?reply_kind(&req.message),
        emotion = out.emotion.dominant().map(Emotion::as_str).unwrap_or("none"),
        chars = req.message.chars().count(),
        "chat reply"
    );
    Json(out)
}
