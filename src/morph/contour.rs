use std::f64::consts::TAU;

use crate::foundation::core::{Point, Size};
use crate::geometry::path::SampledPath;
use crate::geometry::shapes::{GeometryProvider, ShapeGeometry, ShapeParams};
use crate::morph::resample::{resample, resample_open};

/// Samples used for ellipses, curve paths and the fallback outline.
pub const CURVE_SAMPLES: usize = 60;

/// Ordered outline of a shape in element-local coordinates.
///
/// Implicitly closed (the last point connects back to the first) unless `closed` is false.
/// Contours produced by [`extract_contour`] always hold at least one point.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Contour {
    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    /// `samples` points at uniform angles around an axis-aligned ellipse, starting at angle 0.
    pub fn ellipse(center: Point, rx: f64, ry: f64, samples: usize) -> Self {
        let points = (0..samples)
            .map(|i| {
                let a = (i as f64 / samples as f64) * TAU;
                Point::new(center.x + rx * a.cos(), center.y + ry * a.sin())
            })
            .collect();
        Self::closed(points)
    }

    /// Ellipse inscribed in a `size` bounding box centered on the origin.
    pub fn inscribed(size: Size) -> Self {
        Self::ellipse(
            Point::ZERO,
            size.width / 2.0,
            size.height / 2.0,
            CURVE_SAMPLES,
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Exactly `n` points evenly spaced along the outline.
    ///
    /// Closed contours include the closing edge; open contours are walked end to end with both
    /// endpoints kept.
    pub fn resampled(&self, n: usize) -> Self {
        let points = if self.closed {
            resample(&self.points, n)
        } else {
            resample_open(&self.points, n)
        };
        Self {
            points,
            closed: self.closed,
        }
    }

    /// Convert a geometry description into points. `None` when the geometry has no usable
    /// outline (unparsable path, empty point list, empty composite).
    pub fn from_geometry(geometry: &ShapeGeometry) -> Option<Self> {
        match geometry {
            ShapeGeometry::Rect { x, y, w, h, .. } => Some(Self::closed(vec![
                Point::new(*x, *y),
                Point::new(x + w, *y),
                Point::new(x + w, y + h),
                Point::new(*x, y + h),
            ])),
            ShapeGeometry::Ellipse { center, rx, ry } => {
                Some(Self::ellipse(*center, *rx, *ry, CURVE_SAMPLES))
            }
            ShapeGeometry::Points { points, closed } => {
                if points.is_empty() {
                    return None;
                }
                Some(Self {
                    points: points.clone(),
                    closed: *closed,
                })
            }
            ShapeGeometry::Path { data } => match SampledPath::parse(data) {
                Ok(path) => Some(Self::closed(path.sample_uniform(CURVE_SAMPLES))),
                Err(e) => {
                    tracing::debug!(error = %e, "path geometry has no usable outline");
                    None
                }
            },
            // Composite silhouettes are represented by their first part.
            ShapeGeometry::Multi { shapes } => shapes.first().and_then(Self::from_geometry),
        }
    }
}

/// Outline of a shape of `shape_type` with the given bounding box size.
///
/// Unknown types and geometry without a usable outline fall back to [`Contour::inscribed`], so
/// the result is never empty.
pub fn extract_contour(
    provider: &dyn GeometryProvider,
    shape_type: &str,
    size: Size,
    params: &ShapeParams,
) -> Contour {
    provider
        .geometry(shape_type, size, params)
        .and_then(|g| Contour::from_geometry(&g))
        .unwrap_or_else(|| {
            tracing::debug!(shape_type, "no contour for shape type, using inscribed ellipse");
            Contour::inscribed(size)
        })
}

#[cfg(test)]
#[path = "../../tests/unit/morph/contour.rs"]
mod tests;
