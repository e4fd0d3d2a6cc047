use crate::deck::Deck;
use crate::types::DeckEntry;

/// Card type buckets used by the list view, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardCategory {
    Planeswalkers,
    Creatures,
    Sorceries,
    Instants,
    Enchantments,
    Artifacts,
    Lands,
    Other,
}

impl CardCategory {
    pub const ALL: [CardCategory; 8] = [
        CardCategory::Planeswalkers,
        CardCategory::Creatures,
        CardCategory::Sorceries,
        CardCategory::Instants,
        CardCategory::Enchantments,
        CardCategory::Artifacts,
        CardCategory::Lands,
        CardCategory::Other,
    ];

    /// Classify a type line. The first matching keyword wins, so an
    /// "Artifact Creature" is a creature.
    pub fn from_type_line(type_line: Option<&str>) -> Self {
        let Some(type_line) = type_line else {
            return CardCategory::Other;
        };
        let lower = type_line.to_lowercase();

        const KEYWORDS: [(&str, CardCategory); 7] = [
            ("planeswalker", CardCategory::Planeswalkers),
            ("creature", CardCategory::Creatures),
            ("sorcery", CardCategory::Sorceries),
            ("instant", CardCategory::Instants),
            ("enchantment", CardCategory::Enchantments),
            ("artifact", CardCategory::Artifacts),
            ("land", CardCategory::Lands),
        ];

        KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map_or(CardCategory::Other, |(_, category)| *category)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardCategory::Planeswalkers => "Planeswalkers",
            CardCategory::Creatures => "Creatures",
            CardCategory::Sorceries => "Sorceries",
            CardCategory::Instants => "Instants",
            CardCategory::Enchantments => "Enchantments",
            CardCategory::Artifacts => "Artifacts",
            CardCategory::Lands => "Lands",
            CardCategory::Other => "Other",
        }
    }
}

/// Entries sharing a category
#[derive(Debug, Clone, PartialEq)]
pub struct CardGroup<'a> {
    pub category: CardCategory,
    pub entries: Vec<&'a DeckEntry>,
}

impl CardGroup<'_> {
    /// Cards in the group, counting copies
    pub fn card_count(&self) -> u32 {
        self.entries.iter().map(|entry| entry.quantity).sum()
    }
}

/// Group deck entries by category, in display order, skipping empty groups
pub fn group_by_type(deck: &Deck) -> Vec<CardGroup<'_>> {
    let mut groups: Vec<CardGroup<'_>> = CardCategory::ALL
        .iter()
        .map(|&category| CardGroup {
            category,
            entries: Vec::new(),
        })
        .collect();

    for entry in deck.entries() {
        let category = CardCategory::from_type_line(entry.type_line.as_deref());
        if let Some(group) = groups.iter_mut().find(|g| g.category == category) {
            group.entries.push(entry);
        }
    }

    groups.retain(|group| !group.entries.is_empty());
    groups
}

/// Spread groups over `columns` columns so their heights stay balanced.
///
/// Groups are placed largest first into the currently shortest column. A
/// group's height is one header row plus one row per entry.
pub fn distribute_into_columns<'a>(
    groups: &[CardGroup<'a>],
    columns: usize,
) -> Vec<Vec<CardGroup<'a>>> {
    let columns = columns.max(1);
    let mut result: Vec<Vec<CardGroup<'a>>> = vec![Vec::new(); columns];
    let mut heights = vec![0usize; columns];

    let mut sorted: Vec<&CardGroup<'a>> = groups.iter().collect();
    sorted.sort_by(|a, b| b.entries.len().cmp(&a.entries.len()));

    for group in sorted {
        let shortest = heights
            .iter()
            .enumerate()
            .min_by_key(|(_, height)| **height)
            .map_or(0, |(index, _)| index);
        heights[shortest] += 1 + group.entries.len();
        result[shortest].push(group.clone());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryDetails;

    fn deck() -> Deck {
        Deck::new()
            .apply_quantity_change(
                EntryDetails::new("1", "Llanowar Elves").with_type_line("Creature — Elf Druid"),
                4,
            )
            .apply_quantity_change(
                EntryDetails::new("2", "Solemn Simulacrum")
                    .with_type_line("Artifact Creature — Golem"),
                1,
            )
            .apply_quantity_change(
                EntryDetails::new("3", "Forest").with_type_line("Basic Land — Forest"),
                12,
            )
            .apply_quantity_change(EntryDetails::new("4", "Mystery"), 1)
            .apply_quantity_change(
                EntryDetails::new("5", "Sol Ring").with_type_line("Artifact"),
                1,
            )
    }

    #[test]
    fn test_category_from_type_line() {
        assert_eq!(
            CardCategory::from_type_line(Some("Legendary Planeswalker — Jace")),
            CardCategory::Planeswalkers
        );
        assert_eq!(
            CardCategory::from_type_line(Some("Artifact Creature — Golem")),
            CardCategory::Creatures
        );
        assert_eq!(
            CardCategory::from_type_line(Some("INSTANT")),
            CardCategory::Instants
        );
        assert_eq!(
            CardCategory::from_type_line(Some("Tribal Sorcery")),
            CardCategory::Sorceries
        );
        assert_eq!(CardCategory::from_type_line(None), CardCategory::Other);
        assert_eq!(
            CardCategory::from_type_line(Some("Conspiracy")),
            CardCategory::Other
        );
    }

    #[test]
    fn test_group_by_type_order_and_omission() {
        let deck = deck();
        let groups = group_by_type(&deck);

        let categories: Vec<CardCategory> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec![
                CardCategory::Creatures,
                CardCategory::Artifacts,
                CardCategory::Lands,
                CardCategory::Other,
            ]
        );
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(groups[0].card_count(), 5);
        assert_eq!(groups[2].card_count(), 12);
    }

    #[test]
    fn test_distribute_into_columns_balances_heights() {
        let deck = deck();
        let groups = group_by_type(&deck);
        let columns = distribute_into_columns(&groups, 2);

        assert_eq!(columns.len(), 2);
        // Creatures (2 entries) goes first into column 0, the rest fill the
        // shorter column
        assert_eq!(columns[0][0].category, CardCategory::Creatures);
        let placed: usize = columns.iter().map(|col| col.len()).sum();
        assert_eq!(placed, groups.len());
    }

    #[test]
    fn test_distribute_into_zero_columns_uses_one() {
        let deck = deck();
        let groups = group_by_type(&deck);
        let columns = distribute_into_columns(&groups, 0);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].len(), groups.len());
    }
}
