//! HTTP gateway: mounts the chat, search and rendering handlers on one axum
//! router.
//!
//! Handlers are independent; the only shared state is [`state::GatewayState`].

pub mod chat_routes;
pub mod error;
pub mod homepage;
pub mod render_routes;
pub mod search_routes;
pub mod server;
pub mod state;

pub use error::{Error, Result};
