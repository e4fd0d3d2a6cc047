//! Positioned print document
//!
//! A [`PrintDocument`] is the full result of laying out a card sheet: every
//! placement with its page, grid cell and rectangle, plus the guides drawn on
//! each page. It carries no PDF objects and can be rendered by any backend.

use std::sync::Arc;

use crate::layout::*;
use crate::options::PageLayoutConfig;
use crate::types::*;

/// Image bytes fetched for one image source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Where the bytes came from (URL or path)
    pub source: String,
    /// Encoded image data (PNG, JPEG, ...)
    pub bytes: Vec<u8>,
}

impl ResolvedImage {
    pub fn new(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            bytes,
        }
    }
}

/// One placement requested by the caller, before positioning.
///
/// `image` is `None` when the entry has no image or its image could not be
/// resolved; the slot is then left blank.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetItem {
    pub entry_id: String,
    pub image: Option<Arc<ResolvedImage>>,
}

impl SheetItem {
    pub fn new(entry_id: impl Into<String>, image: Option<Arc<ResolvedImage>>) -> Self {
        Self {
            entry_id: entry_id.into(),
            image,
        }
    }

    pub fn blank(entry_id: impl Into<String>) -> Self {
        Self::new(entry_id, None)
    }
}

/// A positioned item on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PageItem {
    pub placement: PlacedItem,
    pub image: Option<Arc<ResolvedImage>>,
}

/// One output page
#[derive(Debug, Clone, PartialEq)]
pub struct PrintPage {
    pub index: usize,
    pub items: Vec<PageItem>,
    pub guides: GuideGeometry,
}

/// All pages of a print job
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub grid: GridDimensions,
    pub pages: Vec<PrintPage>,
}

impl PrintDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|p| p.items.len()).sum()
    }

    /// All placements across pages in output order
    pub fn placements(&self) -> impl Iterator<Item = &PlacedItem> {
        self.pages
            .iter()
            .flat_map(|p| p.items.iter().map(|i| &i.placement))
    }

    /// Copy of the document keeping only the first `max_pages` pages
    pub fn truncated(&self, max_pages: usize) -> Self {
        Self {
            page_width_pt: self.page_width_pt,
            page_height_pt: self.page_height_pt,
            grid: self.grid,
            pages: self.pages.iter().take(max_pages).cloned().collect(),
        }
    }
}

/// Lay out `items` in order across as many pages as needed.
///
/// The configuration is validated first. An empty item list is reported as
/// [`LayoutError::NoPages`].
pub fn layout_document(items: Vec<SheetItem>, config: &PageLayoutConfig) -> Result<PrintDocument> {
    config.validate()?;

    if items.is_empty() {
        return Err(LayoutError::NoPages);
    }

    let grid = compute_grid(config);
    let guides = compute_guide_geometry(config);

    let mut pages = Vec::with_capacity(page_count(items.len(), grid.items_per_page()));
    for (page_index, chunk) in paginate(&items, grid.items_per_page())
        .into_iter()
        .enumerate()
    {
        let mut page_items = Vec::with_capacity(chunk.len());
        for (local_index, item) in chunk.iter().enumerate() {
            let slot = slot_in_grid(local_index, &grid, config).ok_or_else(|| {
                LayoutError::Config(format!(
                    "slot {} is outside the {}x{} grid",
                    local_index, grid.items_per_row, grid.items_per_column
                ))
            })?;

            page_items.push(PageItem {
                placement: PlacedItem {
                    entry_id: item.entry_id.clone(),
                    page_index,
                    column: slot.column,
                    row: slot.row,
                    rect: slot_rect(&slot, config),
                },
                image: item.image.clone(),
            });
        }

        pages.push(PrintPage {
            index: page_index,
            items: page_items,
            guides: guides.clone(),
        });
    }

    Ok(PrintDocument {
        page_width_pt: config.page_width_pt,
        page_height_pt: config.page_height_pt,
        grid,
        pages,
    })
}
