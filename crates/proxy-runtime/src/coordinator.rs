//! Print coordinator
//!
//! Turns a deck snapshot into a positioned print document: expand quantities,
//! resolve each distinct image once, lay the placements out and hand the
//! result to a sink.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use proxy_deck::Deck;
use proxy_layout::{PageLayoutConfig, ResolvedImage, SheetItem, layout_document};
use tokio::sync::mpsc;

use crate::cancel::CancelSignal;
use crate::collaborators::{DocumentSink, ImageLoader};
use crate::queue::RequestQueue;
use crate::types::*;

/// Result of a print run
#[derive(Debug, Clone, PartialEq)]
pub enum PrintOutcome<T> {
    /// The deck had no cards; nothing was fetched or emitted
    Empty,
    Emitted {
        /// Whatever the sink produced
        output: T,
        pages: usize,
        placements: usize,
        /// Image sources whose placements were left blank
        failed_images: Vec<String>,
    },
}

/// Percentage of `completed` out of `total`, rounded to the nearest integer
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let ratio = completed.min(total) as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

pub struct PrintCoordinator<L> {
    loader: L,
    config: PageLayoutConfig,
    queue: RequestQueue,
}

impl<L: ImageLoader> PrintCoordinator<L> {
    pub fn new(loader: L, config: PageLayoutConfig) -> Self {
        Self {
            loader,
            config,
            queue: RequestQueue::default(),
        }
    }

    pub fn with_queue(mut self, queue: RequestQueue) -> Self {
        self.queue = queue;
        self
    }

    /// Print `deck` into `sink`.
    ///
    /// Image sources are loaded one at a time through the request queue.
    /// A failed or timed out load is reported and its placements are
    /// rendered blank. Cancellation abandons the run before anything is
    /// emitted.
    pub async fn run<S: DocumentSink>(
        &self,
        deck: &Deck,
        sink: &mut S,
        updates: &mpsc::UnboundedSender<ProxyUpdate>,
        cancel: &mut CancelSignal,
    ) -> Result<PrintOutcome<S::Output>> {
        if deck.total() == 0 {
            log::info!("Deck is empty, nothing to print");
            return Ok(PrintOutcome::Empty);
        }

        self.config.validate()?;

        let sources = unique_sources(deck);
        let (images, failed_images) = match self.resolve_images(&sources, updates, cancel).await {
            Ok(resolved) => resolved,
            Err(RuntimeError::Cancelled) => {
                let _ = updates.send(ProxyUpdate::Cancelled);
                return Err(RuntimeError::Cancelled);
            }
            Err(e) => return Err(e),
        };

        let items: Vec<SheetItem> = deck
            .expanded()
            .map(|entry| {
                let image = entry
                    .image_url
                    .as_ref()
                    .and_then(|url| images.get(url).cloned());
                SheetItem::new(entry.id.clone(), image)
            })
            .collect();

        let document = layout_document(items, &self.config)?;
        let pages = document.page_count();
        let placements = document.item_count();

        if cancel.is_cancelled() {
            let _ = updates.send(ProxyUpdate::Cancelled);
            return Err(RuntimeError::Cancelled);
        }

        let output = sink.emit(document).await?;
        log::info!("Emitted {} placements on {} pages", placements, pages);
        let _ = updates.send(ProxyUpdate::Emitted { pages, placements });

        Ok(PrintOutcome::Emitted {
            output,
            pages,
            placements,
            failed_images,
        })
    }

    async fn resolve_images(
        &self,
        sources: &[String],
        updates: &mpsc::UnboundedSender<ProxyUpdate>,
        cancel: &mut CancelSignal,
    ) -> Result<(HashMap<String, Arc<ResolvedImage>>, Vec<String>)> {
        let total = sources.len();
        let mut images = HashMap::with_capacity(total);
        let mut failed = Vec::new();

        let _ = updates.send(ProxyUpdate::ResolveStarted { sources: total });

        for (i, source) in sources.iter().enumerate() {
            match self.queue.run(cancel, self.loader.load(source)).await {
                Ok(bytes) => {
                    images.insert(
                        source.clone(),
                        Arc::new(ResolvedImage::new(source.as_str(), bytes)),
                    );
                }
                Err(RuntimeError::Cancelled) => return Err(RuntimeError::Cancelled),
                Err(e) => {
                    log::warn!("Failed to load image {}: {}", source, e);
                    let _ = updates.send(ProxyUpdate::ImageFailed {
                        source: source.clone(),
                        message: e.to_string(),
                    });
                    failed.push(source.clone());
                }
            }

            let completed = i + 1;
            let _ = updates.send(ProxyUpdate::Progress {
                completed,
                total,
                percent: progress_percent(completed, total),
            });
        }

        Ok((images, failed))
    }
}

/// Image sources in first-use order, each listed once
fn unique_sources(deck: &Deck) -> Vec<String> {
    let mut seen = HashSet::new();
    deck.entries()
        .filter_map(|entry| entry.image_url.as_ref())
        .filter(|url| seen.insert(url.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxy_deck::EntryDetails;

    #[test]
    fn test_progress_percent_rounds() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(0, 0), 100);
    }

    #[test]
    fn test_unique_sources_deduplicated() {
        let deck = Deck::new()
            .apply_quantity_change(EntryDetails::new("a", "A").with_image_url("shared"), 2)
            .apply_quantity_change(EntryDetails::new("b", "B").with_image_url("shared"), 1)
            .apply_quantity_change(EntryDetails::new("c", "C").with_image_url("own"), 1)
            .apply_quantity_change(EntryDetails::new("d", "D"), 1);

        assert_eq!(unique_sources(&deck), vec!["shared", "own"]);
    }
}
