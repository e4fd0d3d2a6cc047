//! Seams to the outside world
//!
//! Card data, image bytes and document output all come from collaborators
//! supplied by the caller, so the same coordinator runs against a network
//! client, a local directory or a test double.

use std::future::Future;

use proxy_deck::Card;
use proxy_layout::PrintDocument;

use crate::types::Result;

/// Fetches encoded image bytes for an image source
pub trait ImageLoader: Send + Sync {
    fn load(&self, source: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Card data lookups
pub trait CardProvider: Send + Sync {
    /// Cards whose name matches `term`
    fn search(&self, term: &str) -> impl Future<Output = Result<Vec<Card>>> + Send;

    /// Exact name lookup, optionally restricted to one set.
    ///
    /// `Ok(None)` means no such card; `Err` is a failed request.
    fn fetch_named(
        &self,
        name: &str,
        set: Option<&str>,
    ) -> impl Future<Output = Result<Option<Card>>> + Send;

    /// Every printing of the card called `name`
    fn printings(&self, name: &str) -> impl Future<Output = Result<Vec<Card>>> + Send;
}

/// Receives the finished print document
pub trait DocumentSink {
    type Output;

    fn emit(&mut self, document: PrintDocument)
    -> impl Future<Output = Result<Self::Output>> + Send;
}
