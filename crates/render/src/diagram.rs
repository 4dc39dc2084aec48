//! Graphviz-backed diagram renderer.
//!
//! The DOT source is piped to `dot -Tpng` and the PNG is read back from
//! stdout. A missing executable, a non-zero exit (usually a syntax error) or
//! empty output all surface as [`RenderError`]. The child is always waited
//! on, including when it exits before consuming its input.

use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use tracing::debug;

use crate::{
    dispatch::RichRenderer,
    error::{RenderError, Result},
};

const ENGINE: &str = "graphviz";

#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    command: String,
}

impl GraphvizRenderer {
    /// `command` is an executable name looked up on `PATH`, or a path.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn resolve(&self) -> Result<PathBuf> {
        which::which(&self.command)
            .map_err(|e| RenderError::unavailable(ENGINE, format!("{}: {e}", self.command)))
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl RichRenderer for GraphvizRenderer {
    fn name(&self) -> &'static str {
        ENGINE
    }

    fn render(&self, source: &str) -> Result<Vec<u8>> {
        let program = self.resolve()?;
        debug!(program = %program.display(), bytes = source.len(), "running graphviz");

        let mut child = Command::new(&program)
            .arg("-Tpng")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is fed from its own thread while `wait_with_output` drains
        // stdout and stderr. The child is reaped before a write error surfaces.
        let stdin = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            let writer = stdin.map(|mut stdin| {
                scope.spawn(move || {
                    // Dropping stdin closes the pipe so `dot` sees EOF.
                    stdin.write_all(source.as_bytes())
                })
            });
            let output = child.wait_with_output();
            let written = match writer {
                Some(handle) => handle
                    .join()
                    .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked"))),
                None => Ok(()),
            };
            (output, written)
        });
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::engine(
                ENGINE,
                format!("{} ({})", stderr.trim(), output.status),
            ));
        }
        written?;
        if output.stdout.is_empty() {
            return Err(RenderError::engine(ENGINE, "produced no output"));
        }
        Ok(output.stdout)
    }
}
