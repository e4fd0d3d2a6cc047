//! Async orchestration for proxy printing
//!
//! Ties the deck store and the layout engine to the outside world: card data
//! providers, image loaders and document sinks. Requests are paced through a
//! [`RequestQueue`], progress is reported as [`ProxyUpdate`] messages and any
//! run can be cancelled through a [`CancelHandle`].

mod cancel;
mod collaborators;
mod coordinator;
mod import;
mod queue;
mod sinks;
mod types;

pub use cancel::{CancelHandle, CancelSignal, cancellation};
pub use collaborators::{CardProvider, DocumentSink, ImageLoader};
pub use coordinator::{PrintCoordinator, PrintOutcome, progress_percent};
pub use import::{ImportReport, import_deck_lines, import_deck_list};
pub use queue::RequestQueue;
pub use sinks::{PdfBytesSink, PdfFileSink};
pub use types::*;

// Re-export types from library crates
pub use proxy_deck::{Card, Deck, DeckEntry, EntryDetails};
pub use proxy_layout::{PageLayoutConfig, PrintDocument, SheetStatistics};
