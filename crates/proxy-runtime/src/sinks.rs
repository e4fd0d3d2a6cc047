//! Document sinks that serialize to PDF

use std::path::{Path, PathBuf};

use proxy_layout::{PrintDocument, pdf_bytes, save_pdf};

use crate::collaborators::DocumentSink;
use crate::types::*;

/// Writes the rendered PDF to a file
#[derive(Debug, Clone)]
pub struct PdfFileSink {
    path: PathBuf,
}

impl PdfFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }
}

impl DocumentSink for PdfFileSink {
    type Output = PathBuf;

    async fn emit(&mut self, document: PrintDocument) -> Result<PathBuf> {
        save_pdf(document, &self.path).await?;
        Ok(self.path.clone())
    }
}

/// Renders the PDF into memory
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBytesSink;

impl DocumentSink for PdfBytesSink {
    type Output = Vec<u8>;

    async fn emit(&mut self, document: PrintDocument) -> Result<Vec<u8>> {
        Ok(pdf_bytes(document).await?)
    }
}
