mod deck;
mod decklist;
mod group;
mod types;

pub use deck::Deck;
pub use decklist::{DeckListLine, load_deck_list, parse_deck_list};
pub use group::{CardCategory, CardGroup, distribute_into_columns, group_by_type};
pub use types::*;
