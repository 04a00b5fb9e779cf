//! Transform stages
//!
//! A stage reads and overwrites the shared [`Origin`] accumulator. Two kinds
//! exist:
//! - `Focus`: ramps toward/away from focus, writes the display scale
//! - `Arrange`: turns the allocated offset into a curve position/orientation

use serde::{Deserialize, Serialize};

use super::origin::Origin;
use crate::curve::{SampleError, SegmentedCurve};
use crate::ease_between;
use crate::settings::{ArrangeTuning, FocusTuning};

/// Read-only data available to stages during evaluation
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    pub curve: &'a SegmentedCurve,
}

/// Why a stage could not write its part of the transform
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum StageError {
    /// Placement was requested before any spacing was allocated
    #[error("no spacing allocated (allocated length {0})")]
    Unallocated(f64),

    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// Focus ramp driving spacing and scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusStage {
    tuning: FocusTuning,
    /// Ramp position in [0, 1]
    ramp: f64,
    has_focus: bool,
}

impl FocusStage {
    pub fn new(tuning: FocusTuning) -> Self {
        Self {
            tuning,
            ramp: 0.0,
            has_focus: false,
        }
    }

    /// Set whether this card owns focus; the ramp keeps its position
    pub fn reset(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    #[inline]
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    #[inline]
    pub fn ramp(&self) -> f64 {
        self.ramp
    }

    /// Layout spacing this card currently claims
    pub fn allocated_size(&self) -> f64 {
        ease_between(self.tuning.gap_low, self.tuning.gap_high, self.ramp)
    }

    /// Uniform scale the card is drawn at
    pub fn display_scale(&self) -> f64 {
        ease_between(self.tuning.scale_low, self.tuning.scale_high, self.ramp)
    }

    /// Advance the ramp one step and write the scale
    pub fn evaluate(&mut self, origin: &mut Origin) {
        let direction = if self.has_focus { 1.0 } else { -1.0 };
        self.ramp = (self.ramp + direction * self.tuning.speed).clamp(0.0, 1.0);
        origin.scale = self.display_scale();
    }
}

/// Places a card on the hand curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrangeStage {
    tuning: ArrangeTuning,
    /// Total extent claimed by all cards
    allocated_length: f64,
    /// This card's centre within that extent
    offset: f64,
}

impl ArrangeStage {
    pub fn new(tuning: ArrangeTuning) -> Self {
        Self {
            tuning,
            allocated_length: 0.0,
            offset: 0.0,
        }
    }

    pub fn reset(&mut self, allocated_length: f64, offset: f64) {
        self.allocated_length = allocated_length;
        self.offset = offset;
    }

    #[inline]
    pub fn allocated_length(&self) -> f64 {
        self.allocated_length
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Distance along a curve of `total_length` where this card belongs.
    ///
    /// The leading margin is reserved explicitly; the trailing one only holds
    /// when the offsets exactly fill `allocated_length`.
    pub fn target_distance(&self, total_length: f64) -> f64 {
        let range = self.tuning.range * total_length;
        let margin = self.tuning.margin * total_length;
        margin + range * self.offset / self.allocated_length
    }

    pub fn evaluate(
        &mut self,
        ctx: &StageContext<'_>,
        origin: &mut Origin,
    ) -> Result<(), StageError> {
        // Also rejects NaN
        if !(self.allocated_length > 0.0) {
            return Err(StageError::Unallocated(self.allocated_length));
        }

        let distance = self.target_distance(ctx.curve.total_length());
        let sample = ctx.curve.sample_at_distance(distance)?;
        if !sample.converged {
            log::warn!("using unconverged curve sample at distance {}", distance);
        }

        origin.position = sample.position;
        origin.orientation = Origin::facing(-sample.tangent);
        Ok(())
    }
}

/// One unit of a card's layer stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stage {
    Arrange(ArrangeStage),
    Focus(FocusStage),
}

impl Stage {
    pub fn evaluate(
        &mut self,
        ctx: &StageContext<'_>,
        origin: &mut Origin,
    ) -> Result<(), StageError> {
        match self {
            Stage::Arrange(stage) => stage.evaluate(ctx, origin),
            Stage::Focus(stage) => {
                stage.evaluate(origin);
                Ok(())
            }
        }
    }

    pub fn as_arrange_mut(&mut self) -> Option<&mut ArrangeStage> {
        match self {
            Stage::Arrange(stage) => Some(stage),
            _ => None,
        }
    }

    pub fn as_focus(&self) -> Option<&FocusStage> {
        match self {
            Stage::Focus(stage) => Some(stage),
            _ => None,
        }
    }

    pub fn as_focus_mut(&mut self) -> Option<&mut FocusStage> {
        match self {
            Stage::Focus(stage) => Some(stage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use proptest::prelude::*;

    fn straight_curve() -> SegmentedCurve {
        let points: Vec<DVec2> = (0..6).map(|i| DVec2::new(i as f64, 0.0)).collect();
        SegmentedCurve::from_points(&points, 0.5)
    }

    #[test]
    fn test_focus_ramp_reaches_one_within_34_steps() {
        let mut stage = FocusStage::new(FocusTuning::default());
        let mut origin = Origin::default();
        stage.reset(true);
        for _ in 0..34 {
            stage.evaluate(&mut origin);
            assert!(stage.ramp() <= 1.0);
        }
        assert_eq!(stage.ramp(), 1.0);
        assert_eq!(stage.allocated_size(), 0.5);
        assert_eq!(origin.scale, 0.5);

        stage.reset(false);
        for _ in 0..34 {
            stage.evaluate(&mut origin);
            assert!(stage.ramp() >= 0.0);
        }
        assert_eq!(stage.ramp(), 0.0);
        assert_eq!(stage.allocated_size(), 0.1);
        assert_eq!(origin.scale, 0.4);
    }

    #[test]
    fn test_focus_reset_keeps_ramp() {
        let mut stage = FocusStage::new(FocusTuning::default());
        let mut origin = Origin::default();
        stage.reset(true);
        for _ in 0..10 {
            stage.evaluate(&mut origin);
        }
        let ramp = stage.ramp();
        stage.reset(false);
        assert_eq!(stage.ramp(), ramp);
        assert!(!stage.has_focus());
    }

    #[test]
    fn test_arrange_places_on_curve() {
        let curve = straight_curve();
        let ctx = StageContext { curve: &curve };
        let mut stage = ArrangeStage::new(ArrangeTuning::default());
        // Single card centred in its own allocation: halfway along the range
        stage.reset(1.0, 0.5);
        let mut origin = Origin::default();
        assert_eq!(stage.evaluate(&ctx, &mut origin), Ok(()));

        let expected_x = 1.0 + 0.1 * 3.0 + 0.8 * 3.0 * 0.5;
        assert!((origin.position.x - expected_x).abs() < 1e-5);
        assert!(origin.position.y.abs() < 1e-9);
        // Forward axis points against the direction of travel
        let forward = origin.orientation * glam::DVec3::X;
        assert!((forward.x + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrange_without_allocation_fails() {
        let curve = straight_curve();
        let ctx = StageContext { curve: &curve };
        let mut stage = ArrangeStage::new(ArrangeTuning::default());
        let mut origin = Origin::default();
        assert_eq!(
            stage.evaluate(&ctx, &mut origin),
            Err(StageError::Unallocated(0.0))
        );
        assert_eq!(origin, Origin::default());

        for bad in [-1.0, f64::NAN] {
            stage.reset(bad, 0.5);
            assert!(matches!(
                stage.evaluate(&ctx, &mut origin),
                Err(StageError::Unallocated(_))
            ));
            assert_eq!(origin, Origin::default());
        }
    }

    #[test]
    fn test_arrange_on_empty_curve_fails() {
        let curve = SegmentedCurve::default();
        let ctx = StageContext { curve: &curve };
        let mut stage = ArrangeStage::new(ArrangeTuning::default());
        stage.reset(1.0, 0.5);
        let mut origin = Origin::default();
        assert!(stage.evaluate(&ctx, &mut origin).is_err());
    }

    #[test]
    fn test_arrange_past_range_fails() {
        let curve = straight_curve();
        let ctx = StageContext { curve: &curve };
        let tuning = ArrangeTuning {
            margin: 0.5,
            range: 1.0,
        };
        let mut stage = ArrangeStage::new(tuning);
        stage.reset(1.0, 0.9);
        let mut origin = Origin::default();
        assert!(matches!(
            stage.evaluate(&ctx, &mut origin),
            Err(StageError::Sample(SampleError::OutOfRange { .. }))
        ));
    }

    proptest! {
        #[test]
        fn prop_focus_ramp_stays_bounded(toggles in proptest::collection::vec(any::<bool>(), 1..200)) {
            let mut stage = FocusStage::new(FocusTuning::default());
            let mut origin = Origin::default();
            for focus in toggles {
                stage.reset(focus);
                stage.evaluate(&mut origin);
                prop_assert!((0.0..=1.0).contains(&stage.ramp()));
                prop_assert!((0.1..=0.5).contains(&stage.allocated_size()));
                prop_assert!((0.4..=0.5).contains(&origin.scale));
            }
        }
    }
}
