//! Print-sheet layout for card proxies
//!
//! Computes how fixed-size card images are arranged on fixed-size pages,
//! where cut guides go, and renders the result as a PDF.

pub mod constants;
mod document;
mod io;
pub mod layout;
pub mod marks;
mod options;
mod preview;
pub mod render;
mod stats;
mod types;

pub use document::*;
pub use io::{load_pdf, pdf_bytes, render_pdf, save_pdf};
pub use layout::{
    GridDimensions, GridSlot, GuideGeometry, GuideLine, GuideStroke, PlacedItem, Rect,
    compute_grid, compute_guide_geometry, fit_contain, paginate, position_item,
};
pub use options::*;
pub use preview::generate_preview;
pub use stats::calculate_statistics;
pub use types::*;
