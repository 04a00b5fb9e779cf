//! Card Hand - lays out a hand of cards along a smooth curve
//!
//! Core modules:
//! - `curve`: Centripetal Catmull-Rom segments and arc-length sampling
//! - `hand`: Per-card layer stacks and the hand layout controller
//! - `settings`: Data-driven layout tuning
//! - `error`: Error types shared by the modules above

pub mod curve;
pub mod error;
pub mod hand;
pub mod settings;

pub use curve::{CurveSample, CurveSegment, SampleError, SegmentedCurve};
pub use error::{LayoutError, Result};
pub use hand::{Card, CardId, FrameReport, HandController, Origin};
pub use settings::HandSettings;

/// Layout configuration constants
pub mod consts {
    /// Frame timestep used by the demo driver (60 Hz)
    pub const FRAME_DT: f64 = 1.0 / 60.0;

    /// Default centripetal parameterization
    pub const DEFAULT_ALPHA: f64 = 0.5;

    /// Polyline resolution used for segment arc length and the first march step
    pub const SEGMENT_LOD: usize = 32;
    /// Half-width of the central difference used for tangents
    pub const TANGENT_DELTA: f64 = 0.01;
    /// Acceptance window of the arc-length search
    pub const SAMPLE_EPSILON: f64 = 1e-6;
    /// Iteration cap of the arc-length search
    pub const SAMPLE_MAX_ITERATIONS: u32 = 100;

    /// Focus ramp change per evaluation (~33 frames to fully transition)
    pub const FOCUS_SPEED: f64 = 0.03;
    pub const FOCUS_GAP_LOW: f64 = 0.1;
    pub const FOCUS_GAP_HIGH: f64 = 0.5;
    pub const FOCUS_SCALE_LOW: f64 = 0.4;
    pub const FOCUS_SCALE_HIGH: f64 = 0.5;

    /// Share of the curve reserved before the first card
    pub const ARRANGE_MARGIN: f64 = 0.1;
    /// Share of the curve the cards are spread over
    pub const ARRANGE_RANGE: f64 = 0.8;
}

/// Linear interpolation without clamping `t`
#[inline]
pub fn lerp_unclamped(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Hermite-eased interpolation from `from` to `to`.
///
/// `t` is clamped to [0, 1] so the result always stays between the two ends.
#[inline]
pub fn ease_between(from: f64, to: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let t = -2.0 * t * t * t + 3.0 * t * t;
    to * t + from * (1.0 - t)
}
