//! Centripetal Catmull-Rom segment geometry
//!
//! A segment is defined by four control points:
//! - p0, p3: neighbours that only shape the tangents
//! - p1, p2: the endpoints the curve actually passes through
//!
//! Knot spacing is the inter-point distance raised to `alpha`
//! (0.5 = centripetal), which keeps sharp turns free of cusps and loops.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SEGMENT_LOD, TANGENT_DELTA};
use crate::lerp_unclamped;

/// One Catmull-Rom patch with its arc length cached at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
    pub alpha: f64,
    arc_length: f64,
}

impl CurveSegment {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, alpha: f64) -> Self {
        let mut segment = Self {
            p0,
            p1,
            p2,
            p3,
            alpha,
            arc_length: 0.0,
        };
        segment.arc_length = segment.polyline_length(SEGMENT_LOD);
        segment
    }

    /// Approximate length of the segment (fixed-resolution polyline)
    #[inline]
    pub fn arc_length(&self) -> f64 {
        self.arc_length
    }

    /// Where the segment starts (p1)
    #[inline]
    pub fn start(&self) -> DVec2 {
        self.p1
    }

    /// Where the segment ends (p2)
    #[inline]
    pub fn end(&self) -> DVec2 {
        self.p2
    }

    /// Knot offsets (k1, k2, k3); k0 is always 0
    fn knots(&self) -> (f64, f64, f64) {
        let k1 = self.knot_interval(self.p0, self.p1);
        let k2 = k1 + self.knot_interval(self.p1, self.p2);
        let k3 = k2 + self.knot_interval(self.p2, self.p3);
        (k1, k2, k3)
    }

    fn knot_interval(&self, a: DVec2, b: DVec2) -> f64 {
        a.distance_squared(b).powf(0.5 * self.alpha)
    }

    /// Point at local parameter `t`; 0 maps to p1, 1 maps to p2.
    ///
    /// `t` is not clamped: values outside [0, 1] extrapolate the patch.
    pub fn evaluate(&self, t: f64) -> DVec2 {
        let k0 = 0.0;
        let (k1, k2, k3) = self.knots();

        let u = lerp_unclamped(k1, k2, t);

        let a1 = remap(k0, k1, self.p0, self.p1, u);
        let a2 = remap(k1, k2, self.p1, self.p2, u);
        let a3 = remap(k2, k3, self.p2, self.p3, u);

        let b1 = remap(k0, k2, a1, a2, u);
        let b2 = remap(k1, k3, a2, a3, u);

        remap(k1, k2, b1, b2, u)
    }

    /// Unit tangent at `t` (central difference, zero for degenerate patches)
    pub fn tangent(&self, t: f64) -> DVec2 {
        let before = self.evaluate(t - TANGENT_DELTA);
        let after = self.evaluate(t + TANGENT_DELTA);
        ((after - before) * 0.5).normalize_or_zero()
    }

    /// Sample `steps + 1` evenly spaced points from p1 to p2
    pub fn polyline(&self, steps: usize) -> Vec<DVec2> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| self.evaluate(i as f64 / steps as f64))
            .collect()
    }

    fn polyline_length(&self, steps: usize) -> f64 {
        let mut from = self.p1;
        let mut length = 0.0;
        for i in 1..=steps {
            let to = self.evaluate(i as f64 / steps as f64);
            length += from.distance(to);
            from = to;
        }
        length
    }
}

/// Blend `c -> d` at the fractional position of `u` within [a, b] (unclamped).
///
/// An empty interval (coincident control points) yields `c`.
#[inline]
fn remap(a: f64, b: f64, c: DVec2, d: DVec2, u: f64) -> DVec2 {
    let span = b - a;
    if span == 0.0 {
        return c;
    }
    c.lerp(d, (u - a) / span)
}
