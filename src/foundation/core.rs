pub use kurbo::{BezPath, Point, Rect, Size, Vec2};

/// Milliseconds on the host clock.
///
/// All timing in the engine is expressed in host milliseconds (the unit a browser-style
/// `requestAnimationFrame` timestamp uses), stored as `f64`.
pub type Millis = f64;

/// Stable identifier of a document element.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Wrap any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Center of an element bounding box given its top-left corner and size.
pub fn bounds_center(x: f64, y: f64, size: Size) -> Point {
    Point::new(x + size.width / 2.0, y + size.height / 2.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
