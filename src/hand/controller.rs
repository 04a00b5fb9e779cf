//! Hand layout controller
//!
//! Owns the card pool and the hand curve. Each frame runs two passes:
//! - `update`: cull expelled cards, compact, allocate spacing, sort depth
//! - `late_update`: evaluate every card's layer stack and write transforms
//!
//! Allocation always finishes before any card reads its offset.

use generational_arena::Arena;
use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::card::{Card, CardId};
use super::stage::StageContext;
use crate::curve::SegmentedCurve;
use crate::error::LayoutError;
use crate::settings::HandSettings;

/// Outcome of one late pass
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Cards whose transform was written
    pub placed: usize,
    /// Cards that could not be placed this frame (transform left stale)
    pub failures: Vec<LayoutError>,
}

impl FrameReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct HandController {
    settings: HandSettings,
    curve: SegmentedCurve,
    cards: Arena<Card>,
    /// Layout order (left to right along the curve)
    order: Vec<CardId>,
    /// Render order, back to front
    draw_order: Vec<CardId>,
    focused: Option<CardId>,
    /// Round-robin position of `action_step`
    action_cursor: Option<usize>,
    last_action: Option<CardId>,
    allocated_length: f64,
    spawned: usize,
    rng: Pcg32,
}

impl HandController {
    /// Create a hand with a random number of cards drawn from `seed`
    pub fn new(curve: SegmentedCurve, settings: HandSettings, seed: u64) -> Self {
        Self::with_rng(curve, settings, Pcg32::seed_from_u64(seed))
    }

    /// Create a hand using an explicit random source
    pub fn with_rng(curve: SegmentedCurve, settings: HandSettings, mut rng: Pcg32) -> Self {
        let (min, max) = (settings.pool_min, settings.pool_max);
        let count = if max > min { rng.random_range(min..max) } else { min };
        Self::with_cards(curve, settings, rng, count)
    }

    /// Create a hand with exactly `count` cards
    pub fn with_cards(
        curve: SegmentedCurve,
        settings: HandSettings,
        rng: Pcg32,
        count: usize,
    ) -> Self {
        let mut hand = Self {
            settings,
            curve,
            cards: Arena::new(),
            order: Vec::with_capacity(count),
            draw_order: Vec::with_capacity(count),
            focused: None,
            action_cursor: None,
            last_action: None,
            allocated_length: 0.0,
            spawned: 0,
            rng,
        };
        for _ in 0..count {
            hand.spawn_card();
        }
        log::debug!("hand created with {} cards", count);
        hand
    }

    /// Append a new card at the right end of the hand
    pub fn spawn_card(&mut self) -> CardId {
        let name = self.settings.card_name(self.spawned);
        self.spawned += 1;
        let card = Card::new(name, &self.settings, &mut self.rng);
        let id = CardId(self.cards.insert(card));
        self.order.push(id);
        self.draw_order.push(id);
        id
    }

    /// Replace the curve's control points
    pub fn set_curve_points(&mut self, points: &[DVec2]) {
        self.curve = SegmentedCurve::from_points(points, self.settings.alpha);
        log::debug!(
            "hand curve rebuilt: {} segments, length {:.3}",
            self.curve.segments().len(),
            self.curve.total_length()
        );
    }

    pub fn curve(&self) -> &SegmentedCurve {
        &self.curve
    }

    pub fn settings(&self) -> &HandSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.0)
    }

    /// Live cards in layout order
    pub fn cards(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.order
            .iter()
            .filter_map(|&id| self.cards.get(id.0).map(|card| (id, card)))
    }

    /// Card ids in layout order
    pub fn order(&self) -> &[CardId] {
        &self.order
    }

    pub fn card_by_name(&self, name: &str) -> Option<CardId> {
        self.cards()
            .find(|(_, card)| card.name == name)
            .map(|(id, _)| id)
    }

    pub fn index_of(&self, id: CardId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    pub fn focused(&self) -> Option<CardId> {
        self.focused
    }

    /// Sum of all cards' allocated sizes from the last update
    pub fn allocated_length(&self) -> f64 {
        self.allocated_length
    }

    /// Render order, back to front
    pub fn draw_order(&self) -> &[CardId] {
        &self.draw_order
    }

    /// Render order, front (topmost) to back
    pub fn draw_order_front_to_back(&self) -> Vec<CardId> {
        self.draw_order.iter().rev().copied().collect()
    }

    /// Card most recently retargeted by `action_step`
    pub fn last_action(&self) -> Option<CardId> {
        self.last_action
    }

    /// Lower a card's health; expelled cards leave on the next update
    pub fn damage(&mut self, id: CardId, amount: i32) {
        if let Some(card) = self.cards.get_mut(id.0) {
            let value = card.health.value().saturating_sub(amount);
            card.health.set_value(value);
        }
    }

    /// Give focus to the named card; unknown names are ignored
    pub fn focus_by_name(&mut self, name: &str) {
        let Some(id) = self.card_by_name(name) else {
            log::trace!("focus ignored, no card named {}", name);
            return;
        };
        if self.focused == Some(id) {
            return;
        }

        log::debug!("focus -> {}", name);
        self.focused = Some(id);
        for &other in &self.order {
            if let Some(card) = self.cards.get_mut(other.0) {
                card.set_focus(other == id);
            }
        }
    }

    /// Drag request for the named card; only the focused card may be dragged
    pub fn drag_by_name(&mut self, name: &str) {
        let id = self.card_by_name(name);
        if id.is_none() || id != self.focused {
            return;
        }
        log::trace!("drag on focused card {}", name);
    }

    /// Retarget a random counter on the next card, walking right to left
    pub fn action_step(&mut self) {
        let len = self.order.len();
        if len == 0 {
            return;
        }

        let cursor = self.action_cursor.map_or(0, |c| c + 1) % len;
        self.action_cursor = Some(cursor);
        let id = self.order[len - cursor - 1];
        if let Some(card) = self.cards.get_mut(id.0) {
            let kind = card.select_random_target(&mut self.rng);
            log::trace!("action on {}: {:?}", card.name, kind);
        }
        self.last_action = Some(id);
    }

    /// Run both frame passes
    pub fn frame(&mut self, dt: f64) -> FrameReport {
        self.update();
        self.late_update(dt)
    }

    /// Cull, compact, allocate and sort depth
    pub fn update(&mut self) {
        self.remove_expelled();
        self.allocate();
        self.sort_depth();
    }

    /// Evaluate every card's layer stack and animate counters
    pub fn late_update(&mut self, dt: f64) -> FrameReport {
        let ctx = StageContext { curve: &self.curve };
        let mut report = FrameReport::default();

        for id in &self.order {
            let Some(card) = self.cards.get_mut(id.0) else {
                continue;
            };
            match card.stack.evaluate(&ctx) {
                Ok(origin) => {
                    card.transform = origin;
                    report.placed += 1;
                }
                Err(source) => {
                    let err = LayoutError::NoRoom {
                        card: card.name.clone(),
                        source,
                    };
                    log::warn!("{}", err);
                    report.failures.push(err);
                }
            }
            card.advance_counters(dt);
        }

        report
    }

    fn remove_expelled(&mut self) {
        let expelled: Vec<CardId> = self
            .cards()
            .filter(|(_, card)| card.is_expelled())
            .map(|(id, _)| id)
            .collect();
        if expelled.is_empty() {
            return;
        }

        for id in &expelled {
            if let Some(card) = self.cards.remove(id.0) {
                log::debug!("card {} expelled", card.name);
            }
        }

        let cards = &self.cards;
        self.order.retain(|id| cards.contains(id.0));

        self.focused = None;
        for id in &self.order {
            if let Some(card) = self.cards.get_mut(id.0) {
                card.set_focus(false);
            }
        }
        self.draw_order = self.order.clone();
    }

    fn allocate(&mut self) {
        let length: f64 = self.cards().map(|(_, card)| card.allocated_size()).sum();
        self.allocated_length = length;

        let mut offset = 0.0;
        for id in &self.order {
            if let Some(card) = self.cards.get_mut(id.0) {
                let half = card.allocated_size() * 0.5;
                offset += half;
                card.set_allocation(length, offset);
                offset += half;
            }
        }
    }

    fn sort_depth(&mut self) {
        let Some(index) = self.focused.and_then(|id| self.index_of(id)) else {
            return;
        };
        self.draw_order = depth_sequence(index, self.order.len())
            .into_iter()
            .rev()
            .map(|i| self.order[i])
            .collect();
    }
}

/// Layout indices front to back when `focus` is on top: the focused card
/// first, then its neighbours alternating right and left moving outward.
pub fn depth_sequence(focus: usize, len: usize) -> Vec<usize> {
    let mut sequence = Vec::with_capacity(len);
    if focus >= len {
        return sequence;
    }
    sequence.push(focus);
    for side in 1..len {
        if focus + side < len {
            sequence.push(focus + side);
        }
        if side <= focus {
            sequence.push(focus - side);
        }
    }
    sequence
}
