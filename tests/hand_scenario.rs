//! End-to-end layout scenarios

use card_hand::consts::FRAME_DT;
use card_hand::hand::depth_sequence;
use card_hand::{HandController, HandSettings, SegmentedCurve};
use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn scenario_points() -> Vec<DVec2> {
    vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(3.0, 1.0),
        DVec2::new(4.0, 0.0),
        DVec2::new(5.0, 0.0),
    ]
}

#[test]
fn test_curve_scenario() {
    let curve = SegmentedCurve::from_points(&scenario_points(), 0.5);
    assert_eq!(curve.segments().len(), 3);
    assert!(curve.total_length() > 0.0);

    let start = curve.sample_at_distance(0.0).unwrap();
    assert!(start.converged);
    assert!(start.position.distance(curve.segments()[0].evaluate(0.0)) < 1e-12);

    let middle = curve.sample_at_distance(curve.total_length() / 2.0).unwrap();
    assert!(middle.converged);

    assert!(curve.sample_at_distance(curve.total_length() + 1.0).is_err());
}

#[test]
fn test_hand_session() {
    let curve = SegmentedCurve::from_points(&scenario_points(), 0.5);
    let mut hand = HandController::with_cards(
        curve,
        HandSettings::default(),
        Pcg32::seed_from_u64(2024),
        5,
    );

    hand.focus_by_name("cc_02");
    for _ in 0..60 {
        let report = hand.frame(FRAME_DT);
        assert!(report.is_clean());
        assert_eq!(report.placed, hand.len());
    }

    // Focused card is on top and at full size
    let front = hand.draw_order_front_to_back();
    let expected: Vec<_> = depth_sequence(2, 5)
        .into_iter()
        .map(|i| hand.order()[i])
        .collect();
    assert_eq!(front, expected);
    let focused = hand.card(hand.focused().unwrap()).unwrap();
    assert_eq!(focused.name, "cc_02");
    assert_eq!(focused.transform.scale, 0.5);

    // Every card sits inside the usable part of the curve
    let total = hand.curve().total_length();
    for (_, card) in hand.cards() {
        let offset = card.arrange_offset().unwrap();
        let distance = 0.1 * total + 0.8 * total * offset / hand.allocated_length();
        assert!(distance > 0.1 * total && distance < 0.9 * total);
    }

    // Losing a card clears focus and keeps the rest in order
    let victim = hand.card_by_name("cc_04").unwrap();
    hand.damage(victim, 50);
    assert!(hand.frame(FRAME_DT).is_clean());
    assert_eq!(hand.len(), 4);
    assert_eq!(hand.focused(), None);
    let names: Vec<_> = hand.cards().map(|(_, c)| c.name.as_str()).collect();
    assert_eq!(names, ["cc_00", "cc_01", "cc_02", "cc_03"]);

    // Focus ramps back down once nothing is focused
    for _ in 0..40 {
        hand.frame(FRAME_DT);
    }
    assert!(hand.cards().all(|(_, c)| c.transform.scale == 0.4));
}

#[test]
fn test_settings_drive_layout() {
    let settings = HandSettings::from_json(r#"{ "pool_min": 2, "pool_max": 3, "name_prefix": "card-" }"#)
        .unwrap();
    let curve = SegmentedCurve::from_points(&scenario_points(), settings.alpha);
    let hand = HandController::new(curve, settings, 1);
    let names: Vec<_> = hand.cards().map(|(_, c)| c.name.clone()).collect();
    assert_eq!(names, ["card-00", "card-01"]);
}
