//! Diagram and math rendering with graceful degradation.
//!
//! Each endpoint owns a [`RenderPipeline`]: a [`RichRenderer`] backed by an
//! external engine (Graphviz for DOT, resvg with system fonts for math) and a
//! [`FallbackRenderer`] that draws the raw source as bitmap text. The pipeline
//! always yields a PNG unless the fallback itself cannot encode one.

pub mod diagram;
pub mod dispatch;
pub mod error;
pub mod fallback;
pub mod math;

pub use {
    diagram::GraphvizRenderer,
    dispatch::{
        MATH_FALLBACK_NOTICE, PNG_MEDIA_TYPE, RenderOutput, RenderPath, RenderPipeline,
        RichRenderer,
    },
    error::{FallbackError, RenderError, Result},
    fallback::FallbackRenderer,
    math::MathRenderer,
};
