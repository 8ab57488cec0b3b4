use std::path::PathBuf;

use bench_api::{CodecError, DataFormat};

/// Категория ошибки — пишется в лог структурным полем `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Codec,
    Io,
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Codec => write!(f, "codec"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("invalid batch: {0}")]
    Validation(String),

    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("artifact '{}': {source}", path.display())]
    Artifact {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("timing file '{}': {source}", path.display())]
    Timing {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{format} decoded batch differs from input: {detail}")]
    Mismatch { format: DataFormat, detail: String },

    #[error("config: {0}")]
    Config(String),
}

impl BenchError {
    pub fn artifact(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Artifact { path: path.into(), source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BenchError::Validation(_) => ErrorKind::Validation,
            BenchError::Codec(_) | BenchError::Mismatch { .. } => ErrorKind::Codec,
            BenchError::Artifact { .. } | BenchError::Timing { .. } => ErrorKind::Io,
            BenchError::Config(_) => ErrorKind::Config,
        }
    }
}
