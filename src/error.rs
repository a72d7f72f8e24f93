use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GilchristError {
    // Traversal
    #[error("{}: {source}", path.display())]
    RootUnreachable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source} (skipping)", path.display())]
    NodeUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Actions
    #[error("failed to delete {}: {source}", path.display())]
    DeletionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("missing operand")]
    MissingOperand,

    // Tools
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write error: {0}")]
    Output(#[from] std::io::Error),
}

impl GilchristError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "<tool>: <path>: ..." without matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::RootUnreachable { path, .. }
            | Self::NodeUnreadable { path, .. }
            | Self::DeletionFailed { path, .. }
            | Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether work can continue after this error.
    ///
    /// Recoverable errors (unreachable roots, unreadable nodes, failed
    /// deletions, per-file IO) are collected and degrade the exit status;
    /// the walk keeps going.
    ///
    /// Fatal errors (invalid pattern, missing operand) are raised before any
    /// output is produced. A failed write to the output stream is fatal too.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InvalidPattern { .. } | Self::MissingOperand | Self::Output(_)
        )
    }
}
