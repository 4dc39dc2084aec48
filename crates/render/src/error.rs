use std::error::Error as StdError;

/// Failure of a rich renderer. Always recovered by the fallback path.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{engine} is not available: {reason}")]
    EngineUnavailable { engine: &'static str, reason: String },

    #[error("{engine} failed: {message}")]
    Engine {
        engine: &'static str,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl RenderError {
    #[must_use]
    pub fn unavailable(engine: &'static str, reason: impl Into<String>) -> Self {
        Self::EngineUnavailable {
            engine,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn engine(engine: &'static str, message: impl Into<String>) -> Self {
        Self::Engine {
            engine,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn external<E>(context: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Failure of the fallback renderer. There is nothing left to fall back to.
#[derive(Debug, thiserror::Error)]
pub enum FallbackError {
    #[error("failed to encode fallback image: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
