//! Cut guide geometry
//!
//! Guides are computed once per page configuration: every page uses the same
//! grid, so the same lines are drawn on each of them.

use crate::constants::*;
use crate::options::PageLayoutConfig;
use crate::types::GuideStyle;

use super::{GridDimensions, GuideGeometry, GuideLine, GuideStroke, compute_grid};

/// Compute the guide lines for a page laid out with `config`.
///
/// Border lines run through the middle of the gaps between items (and half a
/// gap outside the outer items). Crosshair marks are centered on every grid
/// intersection. An empty grid produces no lines.
pub fn compute_guide_geometry(config: &PageLayoutConfig) -> GuideGeometry {
    let grid = compute_grid(config);

    match config.guide_style {
        GuideStyle::None => GuideGeometry {
            stroke: border_stroke(),
            lines: Vec::new(),
        },
        GuideStyle::BorderLines => GuideGeometry {
            stroke: border_stroke(),
            lines: border_lines(&grid, config),
        },
        GuideStyle::CrosshairMarks => GuideGeometry {
            stroke: crosshair_stroke(),
            lines: crosshair_lines(&grid, config),
        },
    }
}

fn border_stroke() -> GuideStroke {
    GuideStroke {
        width_pt: BORDER_LINE_WIDTH,
        color: BORDER_LINE_COLOR,
    }
}

fn crosshair_stroke() -> GuideStroke {
    GuideStroke {
        width_pt: CROSSHAIR_LINE_WIDTH,
        color: CROSSHAIR_COLOR,
    }
}

fn border_lines(grid: &GridDimensions, config: &PageLayoutConfig) -> Vec<GuideLine> {
    if grid.is_empty() {
        return Vec::new();
    }

    let spacing = config.effective_spacing();
    let column_pitch = config.item_width_pt + spacing;
    let row_pitch = config.item_height_pt + spacing;
    let column_x = |i: usize| config.padding_pt + i as f32 * column_pitch - spacing / 2.0;
    let row_y = |j: usize| config.padding_pt + j as f32 * row_pitch - spacing / 2.0;

    let top = row_y(0);
    let bottom = row_y(grid.items_per_column);
    let left = column_x(0);
    let right = column_x(grid.items_per_row);

    let mut lines = Vec::with_capacity(grid.items_per_row + grid.items_per_column + 2);
    for i in 0..=grid.items_per_row {
        let x = column_x(i);
        lines.push(GuideLine::new(x, top, x, bottom));
    }
    for j in 0..=grid.items_per_column {
        let y = row_y(j);
        lines.push(GuideLine::new(left, y, right, y));
    }
    lines
}

fn crosshair_lines(grid: &GridDimensions, config: &PageLayoutConfig) -> Vec<GuideLine> {
    if grid.is_empty() {
        return Vec::new();
    }

    let half = config.crosshair_length_pt / 2.0;
    let mut lines =
        Vec::with_capacity((grid.items_per_row + 1) * (grid.items_per_column + 1) * 2);

    for row in 0..=grid.items_per_column {
        let cy = config.padding_pt + row as f32 * config.item_height_pt;
        for col in 0..=grid.items_per_row {
            let cx = config.padding_pt + col as f32 * config.item_width_pt;
            lines.push(GuideLine::new(cx - half, cy, cx + half, cy));
            lines.push(GuideLine::new(cx, cy - half, cx, cy + half));
        }
    }
    lines
}
