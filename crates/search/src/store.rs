use serde::{Deserialize, Serialize};

/// Number of matches returned when the caller does not ask for a limit.
pub const DEFAULT_QUERY_LIMIT: usize = 5;

/// A stored text and its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// Storage for searchable documents.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a document. A missing id is replaced with a fresh UUID v4.
    /// Returns the id the document was stored under.
    async fn add(&self, id: Option<String>, text: String) -> String;

    /// Return up to `limit` documents whose text contains `query`
    /// (case-insensitive), in insertion order.
    async fn query(&self, query: &str, limit: usize) -> Vec<Document>;

    /// Number of stored documents.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
