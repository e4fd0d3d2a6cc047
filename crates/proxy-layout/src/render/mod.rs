//! PDF rendering for print documents
//!
//! This module handles all PDF-specific operations:
//! - Decoding card images and embedding them as image XObjects
//! - Building output pages with image placements and guides
//! - Assembling the page tree and catalog

mod images;
mod page;

pub use images::{ImageCache, ImageXObject, embed_image};
pub use page::*;

use crate::document::PrintDocument;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Build a complete PDF from a positioned document
pub fn render_document(document: &PrintDocument) -> Result<Document> {
    if document.pages.is_empty() {
        return Err(LayoutError::NoPages);
    }

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::with_capacity(document.pages.len());
    let mut images = ImageCache::default();

    for page in &document.pages {
        let page_id = render_page(
            &mut output,
            page,
            document.page_width_pt,
            document.page_height_pt,
            pages_tree_id,
            &mut images,
        )?;
        page_refs.push(Object::Reference(page_id));
    }

    log::debug!(
        "Rendered {} pages with {} embedded images",
        page_refs.len(),
        images.embedded_count()
    );

    finalize_document(&mut output, pages_tree_id, page_refs);
    Ok(output)
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
    output.compress();
}
