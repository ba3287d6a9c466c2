use kurbo::{ParamCurve, ParamCurveArclen, ParamCurveDeriv, PathSeg};

use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::error::{MorphError, MorphResult};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// A point on a sampled path plus the tangent direction there (radians, screen space).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPoint {
    pub point: Point,
    pub angle: f64,
}

/// SVG path data prepared for progress-based evaluation.
///
/// Progress is distributed over segments by arc length; within a segment the curve parameter is
/// stepped uniformly. Curvature-dense regions of a single segment are therefore slightly
/// under-sampled, which is acceptable for contours and motion paths.
#[derive(Clone, Debug)]
pub struct SampledPath {
    segments: Vec<PathSeg>,
    lengths: Vec<f64>,
    total: f64,
}

impl SampledPath {
    /// Parse SVG path data (`M L H V C S Q T A Z`, absolute or relative).
    pub fn parse(data: &str) -> MorphResult<Self> {
        let path = BezPath::from_svg(data)
            .map_err(|e| MorphError::geometry(format!("invalid path data: {e}")))?;
        Self::from_bez(&path)
    }

    /// Prepare an already-built path. Fails when the path has no drawable segment.
    pub fn from_bez(path: &BezPath) -> MorphResult<Self> {
        let segments: Vec<PathSeg> = path.segments().collect();
        if segments.is_empty() {
            return Err(MorphError::geometry("path has no drawable segments"));
        }
        let lengths: Vec<f64> = segments
            .iter()
            .map(|s| s.arclen(ARCLEN_ACCURACY))
            .collect();
        let total = lengths.iter().sum();
        Ok(Self {
            segments,
            lengths,
            total,
        })
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.total
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// First point of the path.
    pub fn start(&self) -> Point {
        self.segments
            .first()
            .map(|s| s.eval(0.0))
            .unwrap_or(Point::ZERO)
    }

    /// Point and tangent at progress `t` in `[0, 1]` (clamped).
    pub fn point_at(&self, t: f64) -> PathPoint {
        let t = t.clamp(0.0, 1.0);
        let Some(last) = self.segments.len().checked_sub(1) else {
            return PathPoint {
                point: Point::ZERO,
                angle: 0.0,
            };
        };

        if self.total <= 0.0 {
            // Degenerate path: every segment has zero length, split progress evenly.
            let scaled = t * self.segments.len() as f64;
            let idx = (scaled.floor() as usize).min(last);
            return eval_segment(&self.segments[idx], scaled - idx as f64);
        }

        let target = t * self.total;
        let mut acc = 0.0;
        for (idx, (seg, len)) in self.segments.iter().zip(&self.lengths).enumerate() {
            if acc + len >= target || idx == last {
                let local = if *len > 0.0 {
                    ((target - acc) / len).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                return eval_segment(seg, local);
            }
            acc += len;
        }

        eval_segment(&self.segments[last], 1.0)
    }

    /// `count` points at progress `i / count`, `i = 0..count`.
    pub fn sample_uniform(&self, count: usize) -> Vec<Point> {
        (0..count)
            .map(|i| self.point_at(i as f64 / count as f64).point)
            .collect()
    }
}

fn eval_segment(seg: &PathSeg, t: f64) -> PathPoint {
    let point = seg.eval(t);
    let d = tangent(seg, t);
    PathPoint {
        point,
        angle: d.y.atan2(d.x),
    }
}

fn tangent(seg: &PathSeg, t: f64) -> Vec2 {
    let d = match seg {
        PathSeg::Line(l) => l.p1 - l.p0,
        PathSeg::Quad(q) => q.deriv().eval(t).to_vec2(),
        PathSeg::Cubic(c) => c.deriv().eval(t).to_vec2(),
    };
    if d.hypot2() > 0.0 {
        return d;
    }
    // Coincident control points give a zero derivative at the ends; fall back to the chord.
    seg.end() - seg.start()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
