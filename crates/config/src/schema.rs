//! Config schema types (server, rendering).

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JulietConfig {
    pub server: ServerConfig,
    pub render: RenderConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to. Defaults to "127.0.0.1".
    pub bind: String,
    /// Port to listen on. Defaults to 8000.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 8000,
        }
    }
}

/// Rendering endpoints configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub diagram: DiagramRenderConfig,
    pub math: MathRenderConfig,
}

/// Graph-description (DOT) rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramRenderConfig {
    /// Graphviz executable, resolved through `PATH` when not absolute.
    pub graphviz_command: String,
    /// Fallback canvas width in pixels.
    pub width: u32,
    /// Fallback canvas height in pixels.
    pub height: u32,
    /// Characters of the source drawn on the fallback canvas.
    pub max_chars: usize,
}

impl Default for DiagramRenderConfig {
    fn default() -> Self {
        Self {
            graphviz_command: "dot".into(),
            width: 900,
            height: 300,
            max_chars: 400,
        }
    }
}

/// Math expression rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathRenderConfig {
    /// Font size of the typeset expression, in pixels.
    pub font_size: f32,
    /// Fallback canvas width in pixels.
    pub width: u32,
    /// Fallback canvas height in pixels.
    pub height: u32,
    /// Characters of the expression drawn on the fallback canvas.
    pub max_chars: usize,
}

impl Default for MathRenderConfig {
    fn default() -> Self {
        Self {
            font_size: 36.0,
            width: 800,
            height: 200,
            max_chars: 300,
        }
    }
}
