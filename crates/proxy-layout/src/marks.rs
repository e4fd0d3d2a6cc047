//! Cut guide rendering
//!
//! Turns [`GuideGeometry`] into PDF content stream operations. Geometry uses
//! a top-left origin, so y values are flipped against the page height.

use crate::layout::GuideGeometry;

/// Generate the stroke operations for a page's guides.
///
/// Returns an empty string when there is nothing to draw.
pub fn generate_guides(guides: &GuideGeometry, page_height_pt: f32) -> String {
    if guides.is_empty() {
        return String::new();
    }

    let mut ops = String::new();

    // Save graphics state
    ops.push_str("q\n");

    let [r, g, b] = guides.stroke.color;
    ops.push_str(&format!("{} {} {} RG\n", r, g, b));
    ops.push_str(&format!("{} w\n", guides.stroke.width_pt));

    for line in &guides.lines {
        ops.push_str(&format!(
            "{} {} m {} {} l S\n",
            line.x1,
            page_height_pt - line.y1,
            line.x2,
            page_height_pt - line.y2
        ));
    }

    // Restore graphics state
    ops.push_str("Q\n");

    ops
}
