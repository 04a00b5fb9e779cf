//! Curve geometry
//!
//! Pure math, no layout state:
//! - `segment`: one centripetal Catmull-Rom patch
//! - `spline`: a chain of patches built from control points
//! - `sampler`: distance-along-curve queries

pub mod sampler;
pub mod segment;
pub mod spline;

pub use sampler::{CurveSample, SampleError, sample_at_distance};
pub use segment::CurveSegment;
pub use spline::SegmentedCurve;
