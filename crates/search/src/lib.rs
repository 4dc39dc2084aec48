//! Toy text search: an append-only document list queried by substring.
//!
//! The gateway holds the store behind the [`DocumentStore`] trait so tests and
//! alternative backends can be swapped in.

pub mod memory;
pub mod store;

pub use {
    memory::InMemoryDocumentStore,
    store::{DEFAULT_QUERY_LIMIT, Document, DocumentStore},
};
