//! Error types for the Hex engine.

use thiserror::Error;

/// Errors reported by the board, graph and evaluation engines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    CellOutOfRange { row: usize, col: usize, size: usize },

    #[error("node {node} is outside a graph of {nodes} nodes")]
    NodeOutOfRange { node: usize, nodes: usize },

    #[error("board size must be at least 1 (got {size})")]
    InvalidSize { size: usize },

    #[error("cell ({row}, {col}) has already been claimed")]
    AlreadyClaimed { row: usize, col: usize },

    #[error("game already over")]
    GameFinished,

    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("playout finished without a winner")]
    UnfinishedPlayout,
}

impl Error {
    /// Whether the error is an index outside the board or graph.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            Error::CellOutOfRange { .. } | Error::NodeOutOfRange { .. }
        )
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
