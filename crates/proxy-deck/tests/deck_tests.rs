use proxy_deck::*;

fn details(id: &str) -> EntryDetails {
    EntryDetails::new(id, id.to_uppercase())
}

#[test]
fn test_scenario_two_entries() {
    let deck = Deck::new()
        .apply_quantity_change(details("a"), 2)
        .apply_quantity_change(details("b"), 3);

    assert_eq!(deck.total(), 5);
    let names: Vec<&str> = deck.expanded().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "A", "B", "B", "B"]);
}

#[test]
fn test_entries_from_card_and_from_entry_agree() {
    let card = Card {
        id: "c1".into(),
        name: "Delver of Secrets".into(),
        mana_cost: Some("{U}".into()),
        type_line: Some("Creature — Human Wizard".into()),
        card_faces: Some(vec![CardFace {
            name: "Delver of Secrets".into(),
            image_uris: Some(ImageUris {
                normal: Some("https://img/front.jpg".into()),
                ..Default::default()
            }),
            ..Default::default()
        }]),
        ..Default::default()
    };

    let deck = Deck::new().apply_quantity_change(EntryDetails::from(&card), 1);
    let entry = deck.get("c1").unwrap().clone();
    assert_eq!(entry.image_url.as_deref(), Some("https://img/front.jpg"));

    // The list view adds copies through the stored entry
    let deck = deck.apply_quantity_change(EntryDetails::from(&entry), 1);
    let entry = deck.get("c1").unwrap();
    assert_eq!(entry.quantity, 2);
    assert_eq!(entry.image_url.as_deref(), Some("https://img/front.jpg"));
    assert_eq!(entry.mana_cost.as_deref(), Some("{U}"));
}

#[test]
fn test_preferred_image_fallbacks() {
    let mut card = Card {
        image_uris: Some(ImageUris {
            normal: Some("normal".into()),
            png: Some("png".into()),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(card.preferred_image_url(), Some("normal"));

    card.image_uris = Some(ImageUris {
        png: Some("png".into()),
        ..Default::default()
    });
    assert_eq!(card.preferred_image_url(), Some("png"));

    card.image_uris = None;
    assert_eq!(card.preferred_image_url(), None);
}

#[cfg(feature = "serde")]
#[test]
fn test_card_from_provider_json() {
    let json = r#"{
        "id": "e3285e6b",
        "name": "Lightning Bolt",
        "mana_cost": "{R}",
        "type_line": "Instant",
        "rarity": "common",
        "set": "m11",
        "image_uris": {
            "small": "https://img/s.jpg",
            "normal": "https://img/n.jpg"
        },
        "colors": ["R"]
    }"#;

    let card: Card = serde_json::from_str(json).unwrap();
    assert_eq!(card.id, "e3285e6b");
    assert_eq!(card.set.as_deref(), Some("m11"));
    assert_eq!(card.preferred_image_url(), Some("https://img/n.jpg"));
}

#[tokio::test]
async fn test_load_deck_list_from_file() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), "4 Lightning Bolt [M11]\n\n20 Mountain\n").unwrap();

    let lines = load_deck_list(temp.path()).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].quantity, 4);
    assert_eq!(lines[0].set.as_deref(), Some("M11"));
    assert_eq!(lines[1].name, "Mountain");
}

#[tokio::test]
async fn test_load_deck_list_missing_file() {
    let result = load_deck_list("/definitely/not/here.txt").await;
    assert!(matches!(result, Err(DeckError::Io(_))));
}
