use std::path::{Path, PathBuf};

use {
    anyhow::Context,
    clap::Subcommand,
    juliet_config::RenderConfig,
    juliet_render::{RenderOutput, RenderPipeline},
    tracing::info,
};

#[derive(Subcommand)]
pub enum RenderAction {
    /// Render Graphviz DOT source.
    Diagram {
        /// DOT source text.
        source: String,
        /// Where to write the PNG.
        #[arg(short, long, default_value = "diagram.png")]
        output: PathBuf,
    },
    /// Render a math expression.
    Math {
        /// Expression text, e.g. `x^2 + sqrt(y)`.
        source: String,
        /// Where to write the PNG.
        #[arg(short, long, default_value = "math.png")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderKind {
    Diagram,
    Math,
}

impl RenderAction {
    fn parts(&self) -> (RenderKind, &str, &Path) {
        match self {
            Self::Diagram { source, output } => (RenderKind::Diagram, source, output),
            Self::Math { source, output } => (RenderKind::Math, source, output),
        }
    }
}

pub fn handle_render(action: RenderAction, config: &RenderConfig) -> anyhow::Result<()> {
    let (kind, source, output) = action.parts();
    let rendered = render_to_file(kind, source, output, config)?;
    println!(
        "{} ({}, {} bytes, {} path)",
        output.display(),
        rendered.media_type,
        rendered.bytes.len(),
        rendered.path.as_str()
    );
    Ok(())
}

pub fn render_to_file(
    kind: RenderKind,
    source: &str,
    output: &Path,
    config: &RenderConfig,
) -> anyhow::Result<RenderOutput> {
    let pipeline = match kind {
        RenderKind::Diagram => RenderPipeline::diagram(&config.diagram),
        RenderKind::Math => RenderPipeline::math(&config.math),
    };

    let rendered = pipeline
        .render(source)
        .context("fallback renderer failed")?;
    std::fs::write(output, &rendered.bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        engine = pipeline.engine(),
        path = rendered.path.as_str(),
        output = %output.display(),
        "render written"
    );
    Ok(rendered)
}
