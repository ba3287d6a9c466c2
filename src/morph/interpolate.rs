use crate::animation::lerp::Lerp;
use crate::foundation::core::Point;

/// Pointwise blend `a[i] * (1 - t) + b[i] * t`.
///
/// Exact at both ends. Contours must already share a length; mismatched inputs log a warning
/// and return `a` unchanged.
pub fn interpolate(a: &[Point], b: &[Point], t: f64) -> Vec<Point> {
    if a.len() != b.len() {
        tracing::warn!(
            source = a.len(),
            target = b.len(),
            "contour length mismatch, keeping source"
        );
        return a.to_vec();
    }
    a.iter().zip(b).map(|(p, q)| <Point as Lerp>::lerp(p, q, t)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/morph/interpolate.rs"]
mod tests;
