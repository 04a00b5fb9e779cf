//! Error types

use crate::hand::StageError;

/// Errors surfaced by the layout and its configuration
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// No valid curve position exists for a card this frame
    #[error("layout has no room for card {card}: {source}")]
    NoRoom {
        card: String,
        #[source]
        source: StageError,
    },

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
