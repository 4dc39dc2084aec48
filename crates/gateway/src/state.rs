use std::sync::Arc;

use {
    juliet_config::JulietConfig,
    juliet_render::RenderPipeline,
    juliet_search::{DocumentStore, InMemoryDocumentStore},
};

/// Everything the request handlers share. Only the document store is mutable.
pub struct GatewayState {
    pub version: String,
    pub diagram: RenderPipeline,
    pub math: RenderPipeline,
    pub documents: Arc<dyn DocumentStore>,
}

impl GatewayState {
    pub fn new(
        diagram: RenderPipeline,
        math: RenderPipeline,
        documents: Arc<dyn DocumentStore>,
    ) -> Arc<Self> {
        Arc::new(Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            diagram,
            math,
            documents,
        })
    }

    /// Build the render pipelines from config with an empty in-memory index.
    pub fn from_config(config: &JulietConfig) -> Arc<Self> {
        Self::new(
            RenderPipeline::diagram(&config.render.diagram),
            RenderPipeline::math(&config.render.math),
            Arc::new(InMemoryDocumentStore::new()),
        )
    }
}
