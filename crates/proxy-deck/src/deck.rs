//! Deck state
//!
//! A [`Deck`] is an immutable snapshot. Every operation returns a new deck and
//! leaves the receiver untouched, so callers may keep older snapshots around
//! (for example a print job that is still resolving images).
//!
//! The deck keeps `total` equal to the sum of all entry quantities after every
//! operation, and never stores an entry with a quantity below 1.

use crate::types::{DeckEntry, EntryDetails};
use std::collections::BTreeMap;

/// The user's working collection of cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    entries: BTreeMap<String, DeckEntry>,
    total: u64,
}

impl Deck {
    /// Create an empty deck
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of cards, counting every copy.
    ///
    /// Single entries cap at `u32::MAX` copies; the total is wide enough to
    /// hold the sum of any number of them.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DeckEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in storage order (ordered by id)
    pub fn entries(&self) -> impl Iterator<Item = &DeckEntry> {
        self.entries.values()
    }

    /// Every copy of every entry, in storage order.
    ///
    /// An entry with quantity 3 appears three times in a row.
    pub fn expanded(&self) -> impl Iterator<Item = &DeckEntry> {
        self.entries
            .values()
            .flat_map(|entry| std::iter::repeat_n(entry, entry.quantity as usize))
    }

    /// Sum of all entry quantities, recomputed from scratch
    pub fn recount(&self) -> u64 {
        self.entries
            .values()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    /// Add `delta` copies of a card (or remove them when `delta` is negative).
    ///
    /// When the resulting quantity drops to zero or below the entry is removed
    /// and the total shrinks by the quantity it had. Otherwise the entry is
    /// upserted with the display fields from `details`, so a call with fresher
    /// card metadata refreshes them even when `delta` is zero.
    pub fn apply_quantity_change(&self, details: EntryDetails, delta: i32) -> Deck {
        let previous = self.entries.get(&details.id).map_or(0, |entry| entry.quantity);
        let new_quantity = i64::from(previous) + i64::from(delta);

        let mut next = self.clone();

        if new_quantity <= 0 {
            if let Some(removed) = next.entries.remove(&details.id) {
                next.total -= u64::from(removed.quantity);
            }
            next.debug_check();
            return next;
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let id = details.id.clone();
        next.entries.insert(id, DeckEntry::new(details, quantity));
        next.total = next.total - u64::from(previous) + u64::from(quantity);

        next.debug_check();
        next
    }

    /// Swap the printing of an existing entry.
    ///
    /// Unknown ids leave the deck unchanged.
    pub fn set_preferred_image(&self, id: &str, image_url: impl Into<String>) -> Deck {
        let mut next = self.clone();
        if let Some(entry) = next.entries.get_mut(id) {
            entry.image_url = Some(image_url.into());
        }
        next
    }

    /// Build a fresh deck from absolute quantities.
    ///
    /// Duplicate ids are merged: quantities are summed and the last non-empty
    /// value of each display field wins. Zero quantities contribute nothing.
    pub fn from_import_results(results: impl IntoIterator<Item = (EntryDetails, u32)>) -> Deck {
        let mut deck = Deck::new();

        for (details, quantity) in results {
            if quantity == 0 {
                continue;
            }

            match deck.entries.get_mut(&details.id) {
                Some(entry) => {
                    let added = quantity.min(u32::MAX - entry.quantity);
                    entry.quantity += added;
                    deck.total += u64::from(added);
                    merge_display_fields(entry, details);
                }
                None => {
                    let id = details.id.clone();
                    deck.entries.insert(id, DeckEntry::new(details, quantity));
                    deck.total += u64::from(quantity);
                }
            }
        }

        deck.debug_check();
        deck
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.total,
            self.recount(),
            "deck total drifted from the sum of quantities"
        );
        debug_assert!(self.entries.values().all(|entry| entry.quantity >= 1));
    }
}

fn merge_display_fields(entry: &mut DeckEntry, details: EntryDetails) {
    if !details.name.is_empty() {
        entry.name = details.name;
    }
    if let Some(url) = details.image_url.filter(|s| !s.is_empty()) {
        entry.image_url = Some(url);
    }
    if let Some(type_line) = details.type_line.filter(|s| !s.is_empty()) {
        entry.type_line = Some(type_line);
    }
    if let Some(mana_cost) = details.mana_cost.filter(|s| !s.is_empty()) {
        entry.mana_cost = Some(mana_cost);
    }
}
