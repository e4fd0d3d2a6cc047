//! Shared constants for print-sheet layout
//!
//! This module centralizes magic numbers and constants used throughout
//! layout and rendering.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Default Geometry
// =============================================================================

/// A4 page width in points
pub const A4_WIDTH_PT: f32 = 595.28;

/// A4 page height in points
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Standard trading card width (63mm) in points
pub const CARD_WIDTH_PT: f32 = 178.58;

/// Standard trading card height (88mm) in points
pub const CARD_HEIGHT_PT: f32 = 249.45;

/// Gap between cards when border lines are drawn
pub const DEFAULT_SPACING_PT: f32 = 0.5;

/// Printer-safe padding on every page edge
pub const DEFAULT_PADDING_PT: f32 = 26.0;

/// Full length of one crosshair arm (2mm)
pub const DEFAULT_CROSSHAIR_LENGTH_PT: f32 = 5.67;

// =============================================================================
// Guides
// =============================================================================

/// Line width for border lines (points)
pub const BORDER_LINE_WIDTH: f32 = 0.5;

/// Line width for crosshair marks (points)
pub const CROSSHAIR_LINE_WIDTH: f32 = 1.0;

/// Border line color (black)
pub const BORDER_LINE_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Crosshair color (#36C9E3)
pub const CROSSHAIR_COLOR: [f32; 3] = [54.0 / 255.0, 201.0 / 255.0, 227.0 / 255.0];

// =============================================================================
// Grid Math
// =============================================================================

/// Slack allowed when an item fits exactly, to absorb float rounding
pub const FIT_TOLERANCE_PT: f32 = 1e-3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-4);
        assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-4);
        assert!((pt_to_mm(mm_to_pt(63.0)) - 63.0).abs() < 1e-4);
    }
}
