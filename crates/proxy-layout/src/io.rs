//! Document I/O operations

use crate::document::PrintDocument;
use crate::render::render_document;
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Render the print document into a PDF
pub async fn render_pdf(document: PrintDocument) -> Result<Document> {
    let doc = tokio::task::spawn_blocking(move || render_document(&document)).await??;
    Ok(doc)
}

/// Render the print document and serialize it
pub async fn pdf_bytes(document: PrintDocument) -> Result<Vec<u8>> {
    let bytes = tokio::task::spawn_blocking(move || {
        let mut doc = render_document(&document)?;
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, LayoutError>(writer)
    })
    .await??;
    Ok(bytes)
}

/// Render the print document and write it to `path`
pub async fn save_pdf(document: PrintDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = pdf_bytes(document).await?;
    tokio::fs::write(&path, bytes).await?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Load a rendered PDF back, mostly for inspection
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}
