use serde::{Deserialize, Serialize};
use std::fmt;

/// The label a detector attaches to a region of the receipt image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Store,
    Address,
    Date,
    Total,
    Unknown,
}

impl Category {
    /// Maps the integer class ids used by detector annotations
    /// (`0 = store, 1 = address, 2 = date, 3 = total`).
    pub fn from_class_id(id: i64) -> Self {
        match id {
            0 => Category::Store,
            1 => Category::Address,
            2 => Category::Date,
            3 => Category::Total,
            _ => Category::Unknown,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Store => write!(f, "store"),
            Category::Address => write!(f, "address"),
            Category::Date => write!(f, "date"),
            Category::Total => write!(f, "total"),
            Category::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "store" | "seller" => Ok(Category::Store),
            "address" => Ok(Category::Address),
            "date" | "timestamp" => Ok(Category::Date),
            "total" | "total_cost" => Ok(Category::Total),
            "unknown" => Ok(Category::Unknown),
            other => Err(format!("Unknown region category: '{other}'")),
        }
    }
}

/// Axis-aligned box in image pixels: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl BBox {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.w, self.h)
    }
}

/// A candidate region produced by an external detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub category: Category,
    pub bbox: BBox,
    pub confidence: f32,
}

impl Detection {
    pub fn new(category: Category, bbox: BBox, confidence: f32) -> Self {
        Self { category, bbox, confidence }
    }
}

/// A detection together with the text chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedRegion {
    pub detection: Detection,
    pub text: String,
}

impl RecognizedRegion {
    pub fn new(detection: Detection, text: impl Into<String>) -> Self {
        Self { detection, text: text.into() }
    }

    /// Shorthand for tests and annotation-driven callers that have no geometry.
    pub fn tagged(category: Category, text: impl Into<String>) -> Self {
        Self::new(Detection::new(category, BBox::new(0, 0, 0, 0), 1.0), text)
    }

    pub fn category(&self) -> Category {
        self.detection.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn class_ids_map_to_categories() {
        assert_eq!(Category::from_class_id(0), Category::Store);
        assert_eq!(Category::from_class_id(3), Category::Total);
        assert_eq!(Category::from_class_id(17), Category::Unknown);
        assert_eq!(Category::from_class_id(-1), Category::Unknown);
    }

    #[test]
    fn category_display_roundtrip() {
        for c in [
            Category::Store,
            Category::Address,
            Category::Date,
            Category::Total,
            Category::Unknown,
        ] {
            assert_eq!(Category::from_str(&c.to_string()).unwrap(), c);
        }
        assert!(Category::from_str("phone").is_err());
    }

    #[test]
    fn bbox_empty_when_zero_sized() {
        assert!(BBox::new(5, 5, 0, 10).is_empty());
        assert!(!BBox::new(5, 5, 1, 1).is_empty());
    }

    #[test]
    fn tagged_region_keeps_category() {
        let r = RecognizedRegion::tagged(Category::Date, "15/08/2020");
        assert_eq!(r.category(), Category::Date);
        assert_eq!(r.text, "15/08/2020");
    }
}
