use crate::constants::*;
use crate::layout::compute_grid;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page and item geometry for a print job.
///
/// All measurements are in points. Items are anchored to the top-left
/// corner of the page, offset by `padding_pt` on both axes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageLayoutConfig {
    // Page
    pub page_width_pt: f32,
    pub page_height_pt: f32,

    // Item
    pub item_width_pt: f32,
    pub item_height_pt: f32,

    /// Gap between neighbouring items (ignored for crosshair marks)
    pub spacing_pt: f32,
    /// Distance from each page edge to the grid
    pub padding_pt: f32,

    // Guides
    pub guide_style: GuideStyle,
    pub crosshair_length_pt: f32,
}

impl Default for PageLayoutConfig {
    fn default() -> Self {
        Self {
            page_width_pt: A4_WIDTH_PT,
            page_height_pt: A4_HEIGHT_PT,
            item_width_pt: CARD_WIDTH_PT,
            item_height_pt: CARD_HEIGHT_PT,
            spacing_pt: DEFAULT_SPACING_PT,
            padding_pt: DEFAULT_PADDING_PT,
            guide_style: GuideStyle::BorderLines,
            crosshair_length_pt: DEFAULT_CROSSHAIR_LENGTH_PT,
        }
    }
}

impl PageLayoutConfig {
    /// Default card geometry on the given paper
    pub fn for_paper(paper: PaperSize, orientation: Orientation) -> Self {
        let (width_mm, height_mm) = paper.dimensions_with_orientation(orientation);
        Self {
            page_width_pt: mm_to_pt(width_mm),
            page_height_pt: mm_to_pt(height_mm),
            ..Default::default()
        }
    }

    pub fn with_guide_style(mut self, guide_style: GuideStyle) -> Self {
        self.guide_style = guide_style;
        self
    }

    /// Spacing actually used by the grid.
    ///
    /// Crosshair marks carry the cut lines on their own, so items are packed
    /// edge to edge.
    pub fn effective_spacing(&self) -> f32 {
        match self.guide_style {
            GuideStyle::CrosshairMarks => 0.0,
            GuideStyle::None | GuideStyle::BorderLines => self.spacing_pt,
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("page width", self.page_width_pt),
            ("page height", self.page_height_pt),
            ("item width", self.item_width_pt),
            ("item height", self.item_height_pt),
        ];
        for (label, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::Config(format!(
                    "{} must be a positive number, got {}",
                    label, value
                )));
            }
        }

        let non_negative = [
            ("spacing", self.spacing_pt),
            ("padding", self.padding_pt),
            ("crosshair length", self.crosshair_length_pt),
        ];
        for (label, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::Config(format!(
                    "{} must not be negative, got {}",
                    label, value
                )));
            }
        }

        if compute_grid(self).items_per_page() == 0 {
            return Err(LayoutError::Config(format!(
                "A {}x{}pt item does not fit on a {}x{}pt page with {}pt padding",
                self.item_width_pt,
                self.item_height_pt,
                self.page_width_pt,
                self.page_height_pt,
                self.padding_pt
            )));
        }

        Ok(())
    }
}
