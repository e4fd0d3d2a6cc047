use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, DeckError>;

/// Image renditions offered by the card-data provider
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
    pub png: Option<String>,
    pub art_crop: Option<String>,
    pub border_crop: Option<String>,
}

/// One face of a multi-faced card
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardFace {
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub image_uris: Option<ImageUris>,
}

/// A card record as returned by the card-data provider
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Card {
    pub id: String,
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub image_uris: Option<ImageUris>,
    pub card_faces: Option<Vec<CardFace>>,
    pub rarity: Option<String>,
    /// Set code of this printing
    pub set: Option<String>,
    pub set_name: Option<String>,
}

impl Card {
    /// The image a deck entry should print for this card.
    ///
    /// Prefers the `normal` rendition, then `png`, then the first face's
    /// `normal` rendition for double-faced cards.
    pub fn preferred_image_url(&self) -> Option<&str> {
        let own = self
            .image_uris
            .as_ref()
            .and_then(|uris| uris.normal.as_deref().or(uris.png.as_deref()));

        own.or_else(|| {
            self.card_faces
                .as_ref()
                .and_then(|faces| faces.first())
                .and_then(|face| face.image_uris.as_ref())
                .and_then(|uris| uris.normal.as_deref())
        })
    }
}

/// One line of the deck
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeckEntry {
    pub id: String,
    pub name: String,
    /// Always at least 1 while the entry is part of a deck
    pub quantity: u32,
    /// Last selected printing
    pub image_url: Option<String>,
    pub type_line: Option<String>,
    pub mana_cost: Option<String>,
}

/// Display fields used when an entry is created or refreshed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDetails {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub type_line: Option<String>,
    pub mana_cost: Option<String>,
}

impl EntryDetails {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_type_line(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = Some(type_line.into());
        self
    }

    pub fn with_mana_cost(mut self, mana_cost: impl Into<String>) -> Self {
        self.mana_cost = Some(mana_cost.into());
        self
    }
}

impl From<&Card> for EntryDetails {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            image_url: card.preferred_image_url().map(str::to_owned),
            type_line: card.type_line.clone(),
            mana_cost: card.mana_cost.clone(),
        }
    }
}

impl From<&DeckEntry> for EntryDetails {
    fn from(entry: &DeckEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            image_url: entry.image_url.clone(),
            type_line: entry.type_line.clone(),
            mana_cost: entry.mana_cost.clone(),
        }
    }
}

impl DeckEntry {
    pub(crate) fn new(details: EntryDetails, quantity: u32) -> Self {
        Self {
            id: details.id,
            name: details.name,
            quantity,
            image_url: details.image_url,
            type_line: details.type_line,
            mana_cost: details.mana_cost,
        }
    }
}
