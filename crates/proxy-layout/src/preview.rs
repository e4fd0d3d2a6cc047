use crate::document::PrintDocument;
use crate::io::render_pdf;
use crate::types::*;
use lopdf::Document;

/// Generate a preview of the print job
/// Returns a document with at most `max_pages` pages
pub async fn generate_preview(document: &PrintDocument, max_pages: usize) -> Result<Document> {
    if document.pages.is_empty() || max_pages == 0 {
        return Err(LayoutError::NoPages);
    }

    render_pdf(document.truncated(max_pages)).await
}
