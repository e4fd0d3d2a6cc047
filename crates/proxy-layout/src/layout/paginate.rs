/// Split items into consecutive pages of `items_per_page`.
///
/// The last page may be partial. No items, or a zero page capacity, yields no
/// pages at all.
pub fn paginate<T>(items: &[T], items_per_page: usize) -> Vec<&[T]> {
    if items_per_page == 0 {
        return Vec::new();
    }
    items.chunks(items_per_page).collect()
}

/// Number of pages needed for `item_count` items
pub fn page_count(item_count: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        0
    } else {
        item_count.div_ceil(items_per_page)
    }
}
