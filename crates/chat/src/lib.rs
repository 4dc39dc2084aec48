//! Chat responder: rule-based reply composition plus keyword emotion scoring.
//!
//! Both halves are pure functions of the message text. [`respond`] runs them
//! side by side for the `/chat` endpoint and the `juliet chat` command.

pub mod emotion;
pub mod reply;

pub use {
    emotion::{Emotion, EmotionScores, classify},
    reply::{ReplyKind, compose, reply_kind},
};

/// Payload returned for a chat message.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub emotion: EmotionScores,
}

/// Compose the reply and score the emotion of `message`.
///
/// The message is trimmed before either step runs.
pub fn respond(message: &str) -> ChatResponse {
    let msg = message.trim();
    ChatResponse {
        response: compose(msg),
        emotion: classify(msg),
    }
}
