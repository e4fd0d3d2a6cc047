use crate::layout::{compute_grid, page_count};
use crate::options::PageLayoutConfig;
use crate::types::*;

/// Calculate statistics for a print job of `item_count` placements
pub fn calculate_statistics(
    item_count: usize,
    config: &PageLayoutConfig,
) -> Result<SheetStatistics> {
    config.validate()?;

    if item_count == 0 {
        return Err(LayoutError::NoPages);
    }

    let grid = compute_grid(config);
    let items_per_page = grid.items_per_page();
    let pages = page_count(item_count, items_per_page);

    Ok(SheetStatistics {
        item_count,
        items_per_row: grid.items_per_row,
        items_per_column: grid.items_per_column,
        items_per_page,
        pages,
        empty_slots: pages * items_per_page - item_count,
    })
}
