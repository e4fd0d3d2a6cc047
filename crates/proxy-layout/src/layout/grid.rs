//! Grid capacity calculation
//!
//! Decides how many fixed-size items fit on a page. Partially fitting items
//! are excluded, never clipped.

use crate::constants::FIT_TOLERANCE_PT;
use crate::options::PageLayoutConfig;

use super::GridDimensions;

/// Compute how many items fit per row, per column and per page.
///
/// Padding is removed from both edges of each axis, then
/// `floor((usable + spacing) / (item + spacing))` items fit: `n` items need
/// `n` item widths but only `n - 1` gaps.
pub fn compute_grid(config: &PageLayoutConfig) -> GridDimensions {
    let spacing = config.effective_spacing();
    let usable_width = config.page_width_pt - 2.0 * config.padding_pt;
    let usable_height = config.page_height_pt - 2.0 * config.padding_pt;

    GridDimensions {
        items_per_row: fit_count(usable_width, config.item_width_pt, spacing),
        items_per_column: fit_count(usable_height, config.item_height_pt, spacing),
    }
}

fn fit_count(usable: f32, item: f32, spacing: f32) -> usize {
    let pitch = item + spacing;
    if !pitch.is_finite() || pitch <= 0.0 || !usable.is_finite() {
        return 0;
    }

    let count = ((usable + spacing + FIT_TOLERANCE_PT) / pitch).floor();
    if count >= 1.0 { count as usize } else { 0 }
}

// =============================================================================
// Tests
// =============================================================================
