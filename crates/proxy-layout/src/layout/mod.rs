//! Layout calculation modules for print sheets
//!
//! This module handles all the geometric calculations for a card sheet:
//! - Grid capacity (how many items fit on a page)
//! - Pagination of the expanded item list
//! - Item placement within a page
//! - Cut guide geometry

mod grid;
mod guides;
mod paginate;
mod placement;
mod types;

pub use grid::*;
pub use guides::*;
pub use paginate::*;
pub use placement::*;
pub use types::*;
