//! Rasterizes typeset math text with resvg and the system font database.

use std::sync::Arc;

use {
    resvg::{
        tiny_skia::{Pixmap, Transform},
        usvg::{self, fontdb},
    },
    tracing::{debug, info},
};

use crate::error::{RenderError, Result};

const ENGINE: &str = "resvg";

/// Longest text drawn on one line; longer input is left to the fallback.
pub const MAX_GLYPHS: usize = 512;

/// Upper bound on the pixmap area, in pixels.
pub const MAX_PIXELS: u64 = 16_000_000;

/// Canvas geometry for one line of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Canvas {
    width: f32,
    height: f32,
    padding: f32,
}

impl Canvas {
    fn pixels(&self) -> u64 {
        (self.width as u64).saturating_mul(self.height as u64)
    }
}

/// Families tried first, in order, before falling back to any installed face.
const PREFERRED_FAMILIES: &[&str] = &[
    "DejaVu Serif",
    "Latin Modern Math",
    "STIX Two Math",
    "Liberation Serif",
    "Noto Serif",
    "Times New Roman",
];

/// Draws a single line of text into a tightly sized PNG.
pub struct MathRasterizer {
    fontdb: Arc<fontdb::Database>,
    family: Option<String>,
    font_size: f32,
}

impl MathRasterizer {
    /// Build a rasterizer over the fonts installed on this system.
    pub fn with_system_fonts(font_size: f32) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        info!(faces = db.len(), "loaded system fonts for math rendering");
        Self::with_fontdb(db, font_size)
    }

    /// Build a rasterizer over an explicit font database.
    pub fn with_fontdb(db: fontdb::Database, font_size: f32) -> Self {
        let family = pick_family(&db);
        debug!(family = family.as_deref().unwrap_or("-"), "math font family");
        Self {
            fontdb: Arc::new(db),
            family,
            font_size: if font_size.is_finite() && font_size > 0.0 {
                font_size
            } else {
                36.0
            },
        }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Render `text` to PNG bytes.
    ///
    /// Text longer than [`MAX_GLYPHS`] characters, or a canvas larger than
    /// [`MAX_PIXELS`], is refused before any pixmap is allocated.
    pub fn rasterize(&self, text: &str) -> Result<Vec<u8>> {
        let glyphs = text.chars().count();
        if glyphs > MAX_GLYPHS {
            return Err(RenderError::engine(
                ENGINE,
                format!("expression too long to rasterize ({glyphs} > {MAX_GLYPHS} characters)"),
            ));
        }
        let canvas = self.canvas(glyphs);
        if canvas.pixels() > MAX_PIXELS {
            return Err(RenderError::engine(
                ENGINE,
                format!(
                    "canvas {}x{} exceeds {MAX_PIXELS} pixels",
                    canvas.width, canvas.height
                ),
            ));
        }

        let Some(family) = self.family.as_deref() else {
            return Err(RenderError::unavailable(ENGINE, "no fonts installed"));
        };

        let svg = self.svg_document(text, family, canvas);
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);

        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| RenderError::external("failed to parse math svg", e))?;

        let size = tree.size().to_int_size();
        let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            RenderError::engine(
                ENGINE,
                format!("cannot allocate {}x{} pixmap", size.width(), size.height()),
            )
        })?;
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| RenderError::external("failed to encode math png", e))
    }

    fn canvas(&self, glyphs: usize) -> Canvas {
        let padding = (self.font_size / 2.0).ceil();
        let glyphs = glyphs.max(1) as f32;
        Canvas {
            width: (glyphs * self.font_size * 0.6 + padding * 2.0).ceil(),
            height: (self.font_size * 1.5 + padding * 2.0).ceil(),
            padding,
        }
    }

    fn svg_document(&self, text: &str, family: &str, canvas: Canvas) -> String {
        let Canvas {
            width,
            height,
            padding,
        } = canvas;
        let baseline = padding + self.font_size;

        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                r#"<rect width="{w}" height="{h}" fill="white"/>"#,
                r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" fill="black">{text}</text>"#,
                "</svg>"
            ),
            w = width,
            h = height,
            x = padding,
            y = baseline,
            family = escape_xml(family),
            size = self.font_size,
            text = escape_xml(text),
        )
    }
}

fn pick_family(db: &fontdb::Database) -> Option<String> {
    let installed = |name: &str| {
        db.faces()
            .any(|face| face.families.iter().any(|(f, _)| f == name))
    };

    PREFERRED_FAMILIES
        .iter()
        .find(|name| installed(name))
        .map(|name| (*name).to_string())
        .or_else(|| {
            db.faces()
                .find_map(|face| face.families.first().map(|(f, _)| f.clone()))
        })
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
