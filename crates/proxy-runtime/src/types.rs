use std::time::Duration;

use proxy_deck::DeckError;
use proxy_layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Load failed: {0}")]
    Load(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Updates sent from a running job to whoever is watching it
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyUpdate {
    /// Image resolution is about to start
    ResolveStarted { sources: usize },
    /// One more image source has been attempted
    Progress {
        completed: usize,
        total: usize,
        percent: u8,
    },
    /// An image could not be loaded; its placements stay blank
    ImageFailed { source: String, message: String },
    /// One more deck-list line has been looked up
    ImportProgress {
        completed: usize,
        total: usize,
        percent: u8,
    },
    /// A deck-list line matched no card, even without its set code
    CardNotFound { name: String },
    /// The laid out document was handed to the sink
    Emitted { pages: usize, placements: usize },
    Cancelled,
}
