//! Layout data types
//!
//! Coordinates use a top-left origin with y growing downwards, matching how
//! the grid is described. The PDF renderer flips them when writing pages.

/// How many items fit on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridDimensions {
    pub items_per_row: usize,
    pub items_per_column: usize,
}

impl GridDimensions {
    pub fn items_per_page(&self) -> usize {
        self.items_per_row * self.items_per_column
    }

    pub fn is_empty(&self) -> bool {
        self.items_per_page() == 0
    }
}

/// Position of one item within its page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSlot {
    pub column: usize,
    pub row: usize,
    /// Left edge in points
    pub x: f32,
    /// Top edge in points
    pub y: f32,
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// One rectangle instance on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    /// Deck entry this placement was expanded from
    pub entry_id: String,
    pub page_index: usize,
    pub column: usize,
    pub row: usize,
    pub rect: Rect,
}

/// A straight guide segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl GuideLine {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }

    pub fn length(&self) -> f32 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// Stroke used for all guides on a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideStroke {
    pub width_pt: f32,
    /// RGB components in 0.0..=1.0
    pub color: [f32; 3],
}

/// Everything needed to draw the cut guides of one page
#[derive(Debug, Clone, PartialEq)]
pub struct GuideGeometry {
    pub stroke: GuideStroke,
    pub lines: Vec<GuideLine>,
}

impl GuideGeometry {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
