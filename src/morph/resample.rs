use crate::animation::lerp::Lerp;
use crate::foundation::core::Point;

/// Resample a closed outline into `n` points spaced evenly along its perimeter.
///
/// The closing edge (last point back to the first) is part of the perimeter. Sample `i` sits at
/// arc length `i * perimeter / n`, so the first sample is always the first input point.
///
/// Degenerate inputs never fail: fewer than two points or a zero perimeter yield `n` copies of the
/// first point (the origin when the input is empty).
pub fn resample(points: &[Point], n: usize) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }
    let Some(&first) = points.first() else {
        return vec![Point::ZERO; n];
    };
    if points.len() < 2 {
        return vec![first; n];
    }

    let edges: Vec<(Point, Point)> = (0..points.len())
        .map(|i| (points[i], points[(i + 1) % points.len()]))
        .collect();
    walk(&edges, n, n as f64, first, points[points.len() - 1])
}

/// Resample an open polyline into `n` points, both endpoints included.
pub fn resample_open(points: &[Point], n: usize) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }
    let Some(&first) = points.first() else {
        return vec![Point::ZERO; n];
    };
    if points.len() < 2 || n == 1 {
        return vec![first; n];
    }

    let edges: Vec<(Point, Point)> = points.windows(2).map(|w| (w[0], w[1])).collect();
    walk(&edges, n, (n - 1) as f64, first, points[points.len() - 1])
}

fn walk(
    edges: &[(Point, Point)],
    n: usize,
    divisions: f64,
    first: Point,
    last: Point,
) -> Vec<Point> {
    let lengths: Vec<f64> = edges.iter().map(|(a, b)| (*b - *a).hypot()).collect();
    let perimeter: f64 = lengths.iter().sum();
    if perimeter <= 0.0 {
        return vec![first; n];
    }

    let step = perimeter / divisions;
    let mut out = Vec::with_capacity(n);
    let mut walked = 0.0;
    let mut edge = 0;

    for i in 0..n {
        let target = i as f64 * step;
        while edge < edges.len() {
            let len = lengths[edge];
            if walked + len >= target {
                let (a, b) = edges[edge];
                let t = if len > 0.0 { (target - walked) / len } else { 0.0 };
                out.push(<Point as Lerp>::lerp(&a, &b, t));
                break;
            }
            walked += len;
            edge += 1;
        }
        // Accumulated rounding can push the final target past the last edge.
        if out.len() <= i {
            out.push(last);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/morph/resample.rs"]
mod tests;
