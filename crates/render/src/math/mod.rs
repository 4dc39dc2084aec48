//! Math expression renderer.
//!
//! Two stages with their own degradation: the expression is parsed and
//! typeset (falling back to the raw text when it does not parse), then the
//! typeset text is rasterized. Only a rasterization failure is reported to
//! the dispatcher.

pub mod parse;
pub mod raster;
pub mod typeset;

use tracing::debug;

pub use {
    parse::{Expr, ParseError, parse},
    raster::MathRasterizer,
    typeset::{Typeset, typeset},
};

use crate::{dispatch::RichRenderer, error::Result};

pub struct MathRenderer {
    rasterizer: MathRasterizer,
}

impl MathRenderer {
    pub fn new(rasterizer: MathRasterizer) -> Self {
        Self { rasterizer }
    }

    /// Renderer over the system fonts at `font_size` pixels.
    pub fn with_system_fonts(font_size: f32) -> Self {
        Self::new(MathRasterizer::with_system_fonts(font_size))
    }
}

impl RichRenderer for MathRenderer {
    fn name(&self) -> &'static str {
        "math"
    }

    fn render(&self, source: &str) -> Result<Vec<u8>> {
        let ts = typeset(source);
        debug!(parsed = ts.parsed, latex = %ts.latex, "typeset math expression");
        self.rasterizer.rasterize(&ts.display)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{dispatch::RenderPipeline, error::RenderError, fallback::FallbackRenderer},
        resvg::usvg::fontdb,
        std::sync::Arc,
    };

    #[test]
    fn unparsable_input_still_renders_with_fonts() {
        let renderer = MathRenderer::with_system_fonts(24.0);
        if renderer.rasterizer.rasterize("x").is_err() {
            return;
        }
        let png = renderer.render("x = = 2").unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn hostile_input_is_an_error_not_a_crash() {
        let renderer =
            MathRenderer::new(MathRasterizer::with_fontdb(fontdb::Database::new(), 36.0));
        let nested = format!("{}x{}", "(".repeat(100_000), ")".repeat(100_000));
        let signs = format!("{}x", "-".repeat(100_000));
        let long = "1+".repeat(500_000) + "1";

        for input in [nested, signs, long] {
            let err = renderer.render(&input).unwrap_err();
            assert!(matches!(err, RenderError::Engine { engine: "resvg", .. }), "{err}");
        }
    }

    #[test]
    fn megabyte_expression_falls_back_to_bounded_png() {
        let pipeline = RenderPipeline::new(
            Arc::new(MathRenderer::with_system_fonts(36.0)),
            FallbackRenderer::new(800, 200),
            300,
        );
        let source = "x*".repeat(500_000) + "x";
        let out = pipeline.render(&source).unwrap();

        let expected = FallbackRenderer::new(800, 200)
            .render(&pipeline.fallback_text(&source))
            .unwrap();
        assert_eq!(out.bytes, expected);
    }
}
