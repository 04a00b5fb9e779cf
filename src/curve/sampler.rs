//! Arc-length sampling
//!
//! Maps a distance along the curve to a position and tangent. The segment is
//! picked by subtracting cached segment lengths, then a forward march walks
//! the segment's parameter with a step that starts at 1/32 and is halved each
//! time it overshoots the target. The step never grows back, so the search is
//! capped at a fixed number of iterations.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::segment::CurveSegment;
use crate::consts::{SAMPLE_EPSILON, SAMPLE_MAX_ITERATIONS, SEGMENT_LOD};

/// A point found on the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSample {
    pub position: DVec2,
    /// Unit tangent in the direction of travel
    pub tangent: DVec2,
    /// Index of the segment the point lies on
    pub segment: usize,
    /// Local parameter within that segment
    pub param: f64,
    /// False when the iteration cap was hit; `position` is then the last
    /// committed point and `tangent` the one at the segment start
    pub converged: bool,
}

/// Sampling failures
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("distance {distance} is outside the curve (length {total_length})")]
    OutOfRange { distance: f64, total_length: f64 },
}

/// Find the point `distance` along the chain of `segments`
pub fn sample_at_distance(
    segments: &[CurveSegment],
    distance: f64,
) -> Result<CurveSample, SampleError> {
    let out_of_range = || SampleError::OutOfRange {
        distance,
        total_length: segments.iter().map(CurveSegment::arc_length).sum(),
    };

    if !distance.is_finite() || distance < 0.0 {
        return Err(out_of_range());
    }

    let mut remaining = distance;
    for (index, segment) in segments.iter().enumerate() {
        if remaining < segment.arc_length() {
            return Ok(march(index, segment, remaining));
        }
        remaining -= segment.arc_length();
    }

    Err(out_of_range())
}

fn march(index: usize, segment: &CurveSegment, distance: f64) -> CurveSample {
    let mut from = segment.evaluate(0.0);
    let mut travelled = 0.0;
    let mut param = 0.0;
    let mut step = 1.0 / SEGMENT_LOD as f64;
    let mut iterations = 0;

    loop {
        iterations += 1;
        if iterations > SAMPLE_MAX_ITERATIONS {
            log::warn!(
                "arc-length search did not converge on segment {} (distance {}, reached {})",
                index,
                distance,
                travelled
            );
            return CurveSample {
                position: from,
                tangent: segment.tangent(0.0),
                segment: index,
                param,
                converged: false,
            };
        }

        let candidate = param + step;
        let to = segment.evaluate(candidate);
        let chord = from.distance(to);
        let approx = distance - travelled - chord;

        if approx < 0.0 {
            // Overshoot: retry from the same point with a smaller step
            step *= 0.5;
            continue;
        }

        if approx < SAMPLE_EPSILON {
            return CurveSample {
                position: to,
                tangent: segment.tangent(candidate),
                segment: index,
                param: candidate,
                converged: true,
            };
        }

        from = to;
        param = candidate;
        travelled += chord;
    }
}
