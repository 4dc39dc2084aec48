use {tokio::sync::RwLock, tracing::debug};

use crate::store::{Document, DocumentStore};

/// Process-local store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    docs: RwLock<Vec<Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn add(&self, id: Option<String>, text: String) -> String {
        let id = id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let mut docs = self.docs.write().await;
        docs.push(Document {
            id: id.clone(),
            text,
        });
        debug!(id = %id, total = docs.len(), "document added");
        id
    }

    async fn query(&self, query: &str, limit: usize) -> Vec<Document> {
        let needle = query.to_lowercase();
        let docs = self.docs.read().await;
        docs.iter()
            .filter(|doc| doc.text.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }

    async fn len(&self) -> usize {
        self.docs.read().await.len()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_keeps_given_id() {
        let store = InMemoryDocumentStore::new();
        let id = store.add(Some("doc-1".into()), "hola mundo".into()).await;
        assert_eq!(id, "doc-1");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn add_generates_uuid_for_missing_or_empty_id() {
        let store = InMemoryDocumentStore::new();
        let a = store.add(None, "uno".into()).await;
        let b = store.add(Some(String::new()), "dos".into()).await;
        assert!(uuid::Uuid::parse_str(&a).is_ok());
        assert!(uuid::Uuid::parse_str(&b).is_ok());
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn query_is_case_insensitive_substring() {
        let store = InMemoryDocumentStore::new();
        store.add(Some("1".into()), "El Gato negro".into()).await;
        store.add(Some("2".into()), "un perro".into()).await;
        store.add(Some("3".into()), "gatos y perros".into()).await;

        let hits = store.query("GATO", 5).await;
        let ids: Vec<&str> = hits.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[tokio::test]
    async fn query_stops_at_limit_in_insertion_order() {
        let store = InMemoryDocumentStore::new();
        for i in 0..10 {
            store.add(Some(i.to_string()), format!("nota {i}")).await;
        }
        let hits = store.query("nota", 3).await;
        let ids: Vec<&str> = hits.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2"]);
        assert!(store.query("nota", 0).await.is_empty());
    }

    #[tokio::test]
    async fn empty_query_matches_everything() {
        let store = InMemoryDocumentStore::new();
        store.add(None, "a".into()).await;
        store.add(None, "b".into()).await;
        assert_eq!(store.query("", 5).await.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_ids_are_appended() {
        let store = InMemoryDocumentStore::new();
        store.add(Some("x".into()), "first".into()).await;
        store.add(Some("x".into()), "second".into()).await;
        assert_eq!(store.len().await, 2);
        assert!(!store.is_empty().await);
    }
}
