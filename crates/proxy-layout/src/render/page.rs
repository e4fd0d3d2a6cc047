//! Output page rendering

use crate::document::PrintPage;
use crate::layout::{Rect, fit_contain};
use crate::marks::generate_guides;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::images::ImageCache;

// =============================================================================
// Public API
// =============================================================================

/// Render one output page and add it to `output`.
///
/// Items without an image, or whose image fails to decode, leave their slot
/// blank. Guides are drawn on top of the images.
pub fn render_page(
    output: &mut Document,
    page: &PrintPage,
    page_width_pt: f32,
    page_height_pt: f32,
    parent_pages_id: ObjectId,
    images: &mut ImageCache,
) -> Result<ObjectId> {
    // Create page dictionary
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width_pt),
            Object::Real(page_height_pt),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for (idx, item) in page.items.iter().enumerate() {
        let Some(image) = &item.image else {
            continue;
        };
        let Some(xobject) = images.get_or_embed(output, image) else {
            continue;
        };

        let xobject_name = format!("Im{}", idx);
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject.id));

        let rect = fit_contain(item.placement.rect, xobject.width, xobject.height);
        content_ops.push(generate_placement_command(
            &xobject_name,
            &rect,
            page_height_pt,
        ));
    }

    content_ops.push(generate_guides(&page.guides, page_height_pt));

    // Set up resources
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    // Create content stream
    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

// =============================================================================
// Helpers
// =============================================================================

/// Generate the PDF operations that draw an image XObject into `rect`.
///
/// Image XObjects occupy the unit square, so the transform scales it to the
/// rectangle and moves its bottom-left corner into place.
fn generate_placement_command(xobject_name: &str, rect: &Rect, page_height_pt: f32) -> String {
    let bottom = page_height_pt - rect.y - rect.height;
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        rect.width, rect.height, rect.x, bottom, xobject_name
    )
}
