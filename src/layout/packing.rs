//! Row packing of independently laid out components.

use super::config::LayoutThresholds;
use super::types::{Bounds, Point};

/// Places components left to right, wrapping to a new row once the row
/// would grow past `max_row_width`.
#[derive(Debug, Clone)]
pub struct ComponentPacker {
    max_row_width: f64,
    component_spacing: f64,
    row_spacing: f64,
    offset_x: f64,
    offset_y: f64,
    row_max_height: f64,
    row_width: f64,
    placed: usize,
}

impl ComponentPacker {
    pub fn new(thresholds: &LayoutThresholds) -> Self {
        Self {
            max_row_width: thresholds.max_row_width,
            component_spacing: thresholds.component_spacing,
            row_spacing: thresholds.row_spacing,
            offset_x: 0.0,
            offset_y: 0.0,
            row_max_height: 0.0,
            row_width: 0.0,
            placed: 0,
        }
    }

    /// Reserve space for a component with local `bounds` and return the
    /// translation that moves it into place.
    ///
    /// The first component never wraps, even if it is wider than a row.
    pub fn place(&mut self, bounds: &Bounds) -> Point {
        if self.placed > 0 && self.row_width + bounds.width > self.max_row_width {
            self.offset_x = 0.0;
            self.offset_y += self.row_max_height + self.row_spacing;
            self.row_max_height = 0.0;
            self.row_width = 0.0;
        }

        let translation = Point {
            x: self.offset_x - bounds.min_x,
            y: self.offset_y - bounds.min_y,
        };

        self.row_max_height = self.row_max_height.max(bounds.height);
        self.row_width += bounds.width + self.component_spacing;
        self.offset_x += bounds.width + self.component_spacing;
        self.placed += 1;

        translation
    }
}
