use proxy_layout::*;

#[test]
fn test_partial_page_statistics() {
    let stats = calculate_statistics(5, &PageLayoutConfig::default()).unwrap();
    assert_eq!(stats.item_count, 5);
    assert_eq!(stats.items_per_row, 3);
    assert_eq!(stats.items_per_column, 3);
    assert_eq!(stats.items_per_page, 9);
    assert_eq!(stats.pages, 1);
    assert_eq!(stats.empty_slots, 4);
}

#[test]
fn test_full_pages_statistics() {
    let stats = calculate_statistics(18, &PageLayoutConfig::default()).unwrap();
    assert_eq!(stats.pages, 2);
    assert_eq!(stats.empty_slots, 0);

    let stats = calculate_statistics(19, &PageLayoutConfig::default()).unwrap();
    assert_eq!(stats.pages, 3);
    assert_eq!(stats.empty_slots, 8);
}

#[test]
fn test_no_items() {
    let result = calculate_statistics(0, &PageLayoutConfig::default());
    assert!(matches!(result, Err(LayoutError::NoPages)));
}

#[test]
fn test_invalid_config() {
    let config = PageLayoutConfig {
        item_width_pt: 10_000.0,
        ..Default::default()
    };
    let result = calculate_statistics(3, &config);
    assert!(matches!(result, Err(LayoutError::Config(_))));
}
