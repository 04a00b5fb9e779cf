//! Per-card stage pipeline
//!
//! Stages are stored in attachment order and evaluated newest-first, so the
//! last stage attached sees the default accumulator.

use serde::{Deserialize, Serialize};

use super::origin::Origin;
use super::stage::{ArrangeStage, FocusStage, Stage, StageContext, StageError};

/// Handle to a stage inside one [`LayerStack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageSlot(usize);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerStack {
    stages: Vec<Stage>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a stage on top of the stack
    pub fn attach(&mut self, stage: Stage) -> StageSlot {
        self.stages.push(stage);
        StageSlot(self.stages.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stages in evaluation order (most recently attached first)
    pub fn iter_eval_order(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter().rev()
    }

    pub fn get(&self, slot: StageSlot) -> Option<&Stage> {
        self.stages.get(slot.0)
    }

    pub fn get_mut(&mut self, slot: StageSlot) -> Option<&mut Stage> {
        self.stages.get_mut(slot.0)
    }

    pub fn focus(&self, slot: StageSlot) -> Option<&FocusStage> {
        self.get(slot).and_then(Stage::as_focus)
    }

    pub fn focus_mut(&mut self, slot: StageSlot) -> Option<&mut FocusStage> {
        self.get_mut(slot).and_then(Stage::as_focus_mut)
    }

    pub fn arrange_mut(&mut self, slot: StageSlot) -> Option<&mut ArrangeStage> {
        self.get_mut(slot).and_then(Stage::as_arrange_mut)
    }

    /// Run every stage newest-first against a fresh accumulator.
    ///
    /// The first failing stage stops evaluation; stages after it do not run
    /// and the partial accumulator is discarded.
    pub fn evaluate(&mut self, ctx: &StageContext<'_>) -> Result<Origin, StageError> {
        let mut origin = Origin::default();
        for stage in self.stages.iter_mut().rev() {
            stage.evaluate(ctx, &mut origin)?;
        }
        Ok(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::SegmentedCurve;
    use crate::settings::{ArrangeTuning, FocusTuning};
    use glam::DVec2;

    fn curve() -> SegmentedCurve {
        let points: Vec<DVec2> = (0..6).map(|i| DVec2::new(i as f64, 0.0)).collect();
        SegmentedCurve::from_points(&points, 0.5)
    }

    fn card_stack() -> (LayerStack, StageSlot, StageSlot) {
        let mut stack = LayerStack::new();
        let arrange = stack.attach(Stage::Arrange(ArrangeStage::new(ArrangeTuning::default())));
        let focus = stack.attach(Stage::Focus(FocusStage::new(FocusTuning::default())));
        (stack, arrange, focus)
    }

    #[test]
    fn test_evaluation_order_is_newest_first() {
        let (stack, _, _) = card_stack();
        let kinds: Vec<bool> = stack
            .iter_eval_order()
            .map(|s| matches!(s, Stage::Focus(_)))
            .collect();
        assert_eq!(kinds, vec![true, false]);
    }

    #[test]
    fn test_slots_resolve_to_their_kind() {
        let (mut stack, arrange, focus) = card_stack();
        assert!(stack.arrange_mut(arrange).is_some());
        assert!(stack.focus(focus).is_some());
        assert!(stack.focus(arrange).is_none());
        assert!(stack.arrange_mut(focus).is_none());
    }

    #[test]
    fn test_evaluate_combines_scale_and_position() {
        let curve = curve();
        let ctx = StageContext { curve: &curve };
        let (mut stack, arrange, _) = card_stack();
        stack.arrange_mut(arrange).unwrap().reset(1.0, 0.5);

        let origin = stack.evaluate(&ctx).unwrap();
        assert_eq!(origin.scale, 0.4);
        assert!((origin.position.x - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_unallocated_arrange_fails_stack() {
        let curve = curve();
        let ctx = StageContext { curve: &curve };
        let (mut stack, _, focus) = card_stack();
        // Focus runs first and still advances; arrange has no allocation
        stack.focus_mut(focus).unwrap().reset(true);
        assert!(matches!(
            stack.evaluate(&ctx),
            Err(StageError::Unallocated(_))
        ));
        assert!(stack.focus(focus).unwrap().ramp() > 0.0);
    }

    #[test]
    fn test_error_aborts_evaluation() {
        let curve = SegmentedCurve::default();
        let ctx = StageContext { curve: &curve };
        let (mut stack, arrange, _) = card_stack();
        stack.arrange_mut(arrange).unwrap().reset(1.0, 0.5);
        assert!(matches!(stack.evaluate(&ctx), Err(StageError::Sample(_))));
    }
}
