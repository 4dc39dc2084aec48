//! Two-tier rendering: try the rich renderer, fall back to bitmap text.

use std::sync::Arc;

use {
    juliet_config::{DiagramRenderConfig, MathRenderConfig},
    tracing::{debug, warn},
};

use crate::{
    diagram::GraphvizRenderer,
    error::{FallbackError, Result},
    fallback::FallbackRenderer,
    math::MathRenderer,
};

/// Media type of every [`RenderOutput`].
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// Notice drawn before the expression when math rendering falls back.
pub const MATH_FALLBACK_NOTICE: &str = "Math renderer not available. Expr: ";

/// Capability of a full-featured renderer: source text in, PNG bytes out.
pub trait RichRenderer: Send + Sync {
    /// Short engine name used in logs.
    fn name(&self) -> &'static str;

    fn render(&self, source: &str) -> Result<Vec<u8>>;
}

/// Which tier produced a [`RenderOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    Rich,
    Fallback,
}

impl RenderPath {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rich => "rich",
            Self::Fallback => "fallback",
        }
    }
}

/// Encoded image plus its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
    pub path: RenderPath,
}

/// A rich renderer paired with the fallback used when it fails.
#[derive(Clone)]
pub struct RenderPipeline {
    rich: Arc<dyn RichRenderer>,
    fallback: FallbackRenderer,
    max_chars: usize,
    notice: &'static str,
}

impl RenderPipeline {
    pub fn new(
        rich: Arc<dyn RichRenderer>,
        fallback: FallbackRenderer,
        max_chars: usize,
    ) -> Self {
        Self {
            rich,
            fallback,
            max_chars,
            notice: "",
        }
    }

    /// Text drawn ahead of the truncated source on the fallback canvas.
    #[must_use]
    pub fn with_notice(mut self, notice: &'static str) -> Self {
        self.notice = notice;
        self
    }

    /// Graphviz with a 900x300 (by default) text fallback.
    pub fn diagram(config: &DiagramRenderConfig) -> Self {
        Self::new(
            Arc::new(GraphvizRenderer::new(config.graphviz_command.clone())),
            FallbackRenderer::new(config.width, config.height),
            config.max_chars,
        )
    }

    /// Typeset-and-rasterize math with an 800x200 (by default) text fallback.
    pub fn math(config: &MathRenderConfig) -> Self {
        Self::new(
            Arc::new(MathRenderer::with_system_fonts(config.font_size)),
            FallbackRenderer::new(config.width, config.height),
            config.max_chars,
        )
        .with_notice(MATH_FALLBACK_NOTICE)
    }

    pub fn engine(&self) -> &'static str {
        self.rich.name()
    }

    /// The text the fallback draws for `source`.
    pub fn fallback_text(&self, source: &str) -> String {
        let mut text = String::from(self.notice);
        text.extend(source.chars().take(self.max_chars));
        text
    }

    /// Render `source`, falling back to plain text on any rich renderer error.
    ///
    /// Only a failure of the fallback itself is returned as an error.
    pub fn render(&self, source: &str) -> std::result::Result<RenderOutput, FallbackError> {
        match self.rich.render(source) {
            Ok(bytes) if !bytes.is_empty() => {
                debug!(engine = self.rich.name(), bytes = bytes.len(), "rich render succeeded");
                Ok(RenderOutput {
                    bytes,
                    media_type: PNG_MEDIA_TYPE,
                    path: RenderPath::Rich,
                })
            },
            Ok(_) => {
                warn!(engine = self.rich.name(), "rich renderer returned no bytes, falling back");
                self.render_fallback(source)
            },
            Err(e) => {
                warn!(engine = self.rich.name(), error = %e, "rich render failed, falling back");
                self.render_fallback(source)
            },
        }
    }

    fn render_fallback(&self, source: &str) -> std::result::Result<RenderOutput, FallbackError> {
        let bytes = self.fallback.render(&self.fallback_text(source))?;
        Ok(RenderOutput {
            bytes,
            media_type: PNG_MEDIA_TYPE,
            path: RenderPath::Fallback,
        })
    }
}
