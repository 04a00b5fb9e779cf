//! Ordered chain of Catmull-Rom segments

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::sampler::{self, CurveSample, SampleError};
use super::segment::CurveSegment;

/// Segments built from a sliding 4-point window over the control points
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentedCurve {
    segments: Vec<CurveSegment>,
    total_length: f64,
}

impl SegmentedCurve {
    /// Build `max(0, n - 3)` segments from `n` control points.
    ///
    /// The first and last point only shape the end tangents; the curve runs
    /// from `points[1]` to `points[n - 2]`.
    pub fn from_points(points: &[DVec2], alpha: f64) -> Self {
        let segments: Vec<CurveSegment> = points
            .windows(4)
            .map(|w| CurveSegment::new(w[0], w[1], w[2], w[3], alpha))
            .collect();
        let total_length = segments.iter().map(CurveSegment::arc_length).sum();
        Self {
            segments,
            total_length,
        }
    }

    #[inline]
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// Sum of the segments' arc lengths
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Position and tangent at `distance` along the curve
    pub fn sample_at_distance(&self, distance: f64) -> Result<CurveSample, SampleError> {
        sampler::sample_at_distance(&self.segments, distance)
    }

    /// Dense point list along the whole curve (`steps` per segment)
    pub fn polyline(&self, steps: usize) -> Vec<DVec2> {
        let mut points = Vec::with_capacity(self.segments.len() * steps + 1);
        for (i, segment) in self.segments.iter().enumerate() {
            let samples = segment.polyline(steps);
            // Shared endpoint between consecutive segments
            let skip = usize::from(i > 0);
            points.extend(samples.into_iter().skip(skip));
        }
        points
    }
}
