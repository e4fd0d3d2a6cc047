//! Item placement within a page

use crate::options::PageLayoutConfig;

use super::{GridDimensions, GridSlot, Rect, compute_grid};

/// Position of the item at `index` within its page.
///
/// Items fill rows left to right, then top to bottom, anchored at the
/// top-left padding corner. Returns `None` when the index is past the page
/// capacity or nothing fits.
pub fn position_item(index: usize, config: &PageLayoutConfig) -> Option<GridSlot> {
    slot_in_grid(index, &compute_grid(config), config)
}

/// Same as [`position_item`] with a precomputed grid
pub fn slot_in_grid(
    index: usize,
    grid: &GridDimensions,
    config: &PageLayoutConfig,
) -> Option<GridSlot> {
    if grid.is_empty() || index >= grid.items_per_page() {
        return None;
    }

    let spacing = config.effective_spacing();
    let column = index % grid.items_per_row;
    let row = index / grid.items_per_row;

    Some(GridSlot {
        column,
        row,
        x: config.padding_pt + column as f32 * (config.item_width_pt + spacing),
        y: config.padding_pt + row as f32 * (config.item_height_pt + spacing),
    })
}

/// Rectangle covered by the item in `slot`
pub fn slot_rect(slot: &GridSlot, config: &PageLayoutConfig) -> Rect {
    Rect::new(slot.x, slot.y, config.item_width_pt, config.item_height_pt)
}

/// Largest rectangle with the image's aspect ratio that fits inside `bounds`,
/// centered on both axes.
pub fn fit_contain(bounds: Rect, image_width: u32, image_height: u32) -> Rect {
    if image_width == 0 || image_height == 0 {
        return bounds;
    }

    let scale_x = bounds.width / image_width as f32;
    let scale_y = bounds.height / image_height as f32;
    let scale = scale_x.min(scale_y);

    let width = image_width as f32 * scale;
    let height = image_height as f32 * scale;

    Rect::new(
        bounds.x + (bounds.width - width) / 2.0,
        bounds.y + (bounds.height - height) / 2.0,
        width,
        height,
    )
}
