//! Bulk deck-list import

use proxy_deck::{Card, Deck, DeckListLine, EntryDetails, parse_deck_list};
use tokio::sync::mpsc;

use crate::cancel::CancelSignal;
use crate::collaborators::CardProvider;
use crate::coordinator::progress_percent;
use crate::queue::RequestQueue;
use crate::types::*;

/// Outcome of importing a deck list
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub deck: Deck,
    /// Lines that matched a card
    pub resolved: usize,
    /// Names of lines that matched nothing, in list order
    pub not_found: Vec<String>,
}

/// Parse `text` and look every line up through `provider`.
///
/// Lookups are paced by `queue`. A line with a set code that fails is retried
/// once without it. Parsing problems drop the line silently; lookup problems
/// end up in [`ImportReport::not_found`].
pub async fn import_deck_list<P: CardProvider>(
    text: &str,
    provider: &P,
    queue: &RequestQueue,
    updates: &mpsc::UnboundedSender<ProxyUpdate>,
    cancel: &mut CancelSignal,
) -> Result<ImportReport> {
    import_deck_lines(&parse_deck_list(text), provider, queue, updates, cancel).await
}

/// Look already parsed deck-list lines up through `provider`
pub async fn import_deck_lines<P: CardProvider>(
    lines: &[DeckListLine],
    provider: &P,
    queue: &RequestQueue,
    updates: &mpsc::UnboundedSender<ProxyUpdate>,
    cancel: &mut CancelSignal,
) -> Result<ImportReport> {
    let total = lines.len();
    let mut found = Vec::with_capacity(total);
    let mut not_found = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        match lookup_line(line, provider, queue, cancel).await {
            Ok(Some(card)) => found.push((EntryDetails::from(&card), line.quantity)),
            Ok(None) => {
                let _ = updates.send(ProxyUpdate::CardNotFound {
                    name: line.name.clone(),
                });
                not_found.push(line.name.clone());
            }
            Err(RuntimeError::Cancelled) => {
                let _ = updates.send(ProxyUpdate::Cancelled);
                return Err(RuntimeError::Cancelled);
            }
            Err(e) => return Err(e),
        }

        let completed = i + 1;
        let _ = updates.send(ProxyUpdate::ImportProgress {
            completed,
            total,
            percent: progress_percent(completed, total),
        });
    }

    let resolved = found.len();
    log::info!(
        "Imported {} of {} lines, {} not found",
        resolved,
        total,
        not_found.len()
    );

    Ok(ImportReport {
        deck: Deck::from_import_results(found),
        resolved,
        not_found,
    })
}

/// Look one line up, falling back to a set-less lookup.
///
/// Only cancellation is returned as an error; every other failure is
/// reported as `Ok(None)`.
async fn lookup_line<P: CardProvider>(
    line: &DeckListLine,
    provider: &P,
    queue: &RequestQueue,
    cancel: &mut CancelSignal,
) -> Result<Option<Card>> {
    let first = queue
        .run(cancel, provider.fetch_named(&line.name, line.set.as_deref()))
        .await;

    let first_failure = match first {
        Ok(Some(card)) => return Ok(Some(card)),
        Err(RuntimeError::Cancelled) => return Err(RuntimeError::Cancelled),
        Ok(None) => None,
        Err(e) => Some(e),
    };

    let Some(set) = &line.set else {
        if let Some(e) = first_failure {
            log::warn!("Lookup of {} failed: {}", line.name, e);
        }
        return Ok(None);
    };

    log::debug!("{} not found in set {}, retrying without set", line.name, set);
    match queue
        .run(cancel, provider.fetch_named(&line.name, None))
        .await
    {
        Ok(card) => Ok(card),
        Err(RuntimeError::Cancelled) => Err(RuntimeError::Cancelled),
        Err(e) => {
            log::warn!("Lookup of {} failed: {}", line.name, e);
            Ok(None)
        }
    }
}
