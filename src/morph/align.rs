use crate::foundation::core::Point;

/// Rotation offset `k` of `target` minimizing `sum |reference[i] - target[(i + k) % len]|^2`.
///
/// Ties keep the smallest offset, so an already-aligned contour stays at `0`. Returns `0` when
/// the lengths differ or the contours are empty.
pub fn best_offset(reference: &[Point], target: &[Point]) -> usize {
    let len = target.len();
    if len == 0 || reference.len() != len {
        return 0;
    }

    let mut best = 0;
    let mut best_cost = f64::INFINITY;
    for offset in 0..len {
        let cost: f64 = reference
            .iter()
            .enumerate()
            .map(|(i, a)| (*a - target[(i + offset) % len]).hypot2())
            .sum();
        if cost < best_cost {
            best_cost = cost;
            best = offset;
        }
    }
    best
}

/// Rotated copy of `target` whose point order best matches `reference`.
///
/// Aligning before interpolation keeps each point travelling to its nearest counterpart, which
/// avoids polygons that twist through themselves mid-morph. Contours of different lengths are
/// returned unchanged.
pub fn align(reference: &[Point], target: &[Point]) -> Vec<Point> {
    let mut out = target.to_vec();
    out.rotate_left(best_offset(reference, target));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/morph/align.rs"]
mod tests;
