use super::model::{DataSet, Field, Record};

// ---------------------------------------------------------------------------
// Rectangular selection in data space
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle over two data fields, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataRect {
    /// Build from two corners in any order.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        DataRect {
            x_min: x0.min(x1),
            x_max: x0.max(x1),
            y_min: y0.min(y1),
            y_max: y0.max(y1),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }
}

/// Records whose `(x_field, y_field)` values fall inside `rect`, in date order.
pub fn filter_rect<'a>(
    dataset: &'a DataSet,
    rect: &DataRect,
    x_field: Field,
    y_field: Field,
) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|r| rect.contains(r.value(x_field), r.value(y_field)))
        .collect()
}
