//! Cards and their status counters

use generational_arena::Index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::layer_stack::{LayerStack, StageSlot};
use super::origin::Origin;
use super::stage::{ArrangeStage, FocusStage, Stage};
use crate::settings::{CounterTuning, HandSettings};

/// Stable handle to a live card.
///
/// Survives pool compaction; goes stale once the card is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(pub(crate) Index);

/// A status value that steps toward a randomly chosen target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    tuning: CounterTuning,
    current: i32,
    target: i32,
    /// Seconds left until the next step
    timer: f64,
}

impl Counter {
    pub fn new<R: Rng>(tuning: CounterTuning, rng: &mut R) -> Self {
        let mut counter = Self {
            tuning,
            current: 0,
            target: 0,
            timer: 0.0,
        };
        counter.select_target(rng);
        counter.current = counter.target;
        counter
    }

    /// Displayed value
    #[inline]
    pub fn value(&self) -> i32 {
        self.current.saturating_sub(self.tuning.offset)
    }

    /// Value the counter is heading toward
    #[inline]
    pub fn target_value(&self) -> i32 {
        self.target.saturating_sub(self.tuning.offset)
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Pick a new random target
    pub fn select_target<R: Rng>(&mut self, rng: &mut R) {
        let (min, max) = (self.tuning.target_min, self.tuning.target_max);
        self.target = if max > min { rng.random_range(min..max) } else { min };
    }

    /// Force the displayed value, skipping the animation
    pub fn set_value(&mut self, value: i32) {
        self.current = value.saturating_add(self.tuning.offset);
        self.target = self.current;
        self.timer = 0.0;
    }

    /// Step one unit toward the target every `step_seconds`
    pub fn advance(&mut self, dt: f64) {
        if self.current == self.target {
            return;
        }
        self.timer -= dt;
        if self.timer < 0.0 {
            self.timer = self.tuning.step_seconds;
            self.current += if self.target > self.current { 1 } else { -1 };
        }
    }
}

/// Which status counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterKind {
    Attack,
    Health,
    Mana,
}

impl CounterKind {
    pub const ALL: [CounterKind; 3] = [CounterKind::Attack, CounterKind::Health, CounterKind::Mana];
}

/// A card in the hand
#[derive(Debug, Clone)]
pub struct Card {
    pub name: String,
    pub attack: Counter,
    pub health: Counter,
    pub mana: Counter,
    /// Stages placing this card; arrange attached first, focus on top
    pub stack: LayerStack,
    pub(crate) arrange: StageSlot,
    pub(crate) focus: StageSlot,
    /// Last successfully evaluated transform
    pub transform: Origin,
}

impl Card {
    pub fn new<R: Rng>(name: String, settings: &HandSettings, rng: &mut R) -> Self {
        let attack = Counter::new(settings.counters, rng);
        let health = Counter::new(settings.counters, rng);
        let mana = Counter::new(settings.counters, rng);

        let mut stack = LayerStack::new();
        let arrange = stack.attach(Stage::Arrange(ArrangeStage::new(settings.arrange)));
        let focus = stack.attach(Stage::Focus(FocusStage::new(settings.focus)));

        Self {
            name,
            attack,
            health,
            mana,
            stack,
            arrange,
            focus,
            transform: Origin::default(),
        }
    }

    pub fn counter(&self, kind: CounterKind) -> &Counter {
        match kind {
            CounterKind::Attack => &self.attack,
            CounterKind::Health => &self.health,
            CounterKind::Mana => &self.mana,
        }
    }

    pub fn counter_mut(&mut self, kind: CounterKind) -> &mut Counter {
        match kind {
            CounterKind::Attack => &mut self.attack,
            CounterKind::Health => &mut self.health,
            CounterKind::Mana => &mut self.mana,
        }
    }

    /// Cards with health below 1 leave the hand
    pub fn is_expelled(&self) -> bool {
        self.health.value() < 1
    }

    /// Retarget one counter chosen at random; returns which
    pub fn select_random_target<R: Rng>(&mut self, rng: &mut R) -> CounterKind {
        let kind = CounterKind::ALL[rng.random_range(0..CounterKind::ALL.len())];
        self.counter_mut(kind).select_target(rng);
        kind
    }

    /// Spacing this card claims (from its focus stage)
    pub fn allocated_size(&self) -> f64 {
        self.focus_stage().map_or(0.0, FocusStage::allocated_size)
    }

    pub fn focus_stage(&self) -> Option<&FocusStage> {
        self.stack.focus(self.focus)
    }

    pub(crate) fn set_focus(&mut self, has_focus: bool) {
        if let Some(stage) = self.stack.focus_mut(self.focus) {
            stage.reset(has_focus);
        }
    }

    pub(crate) fn set_allocation(&mut self, allocated_length: f64, offset: f64) {
        if let Some(stage) = self.stack.arrange_mut(self.arrange) {
            stage.reset(allocated_length, offset);
        }
    }

    pub fn arrange_offset(&self) -> Option<f64> {
        match self.stack.get(self.arrange)? {
            Stage::Arrange(stage) => Some(stage.offset()),
            Stage::Focus(_) => None,
        }
    }

    /// Animate all counters
    pub fn advance_counters(&mut self, dt: f64) {
        self.attack.advance(dt);
        self.health.advance(dt);
        self.mana.advance(dt);
    }
}
