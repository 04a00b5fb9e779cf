//! Card Hand demo driver
//!
//! Builds a fan-shaped hand curve and runs a scripted session at a fixed
//! frame rate, logging the layout as it animates.
//!
//! Usage: `card-hand [settings.json] [seed]`

use card_hand::consts::FRAME_DT;
use card_hand::{HandController, HandSettings, SegmentedCurve};
use glam::DVec2;

/// Frames to simulate (10 seconds at 60 Hz)
const SESSION_FRAMES: u32 = 600;

/// Control points of a shallow arc, wider than it is tall
fn fan_points() -> Vec<DVec2> {
    (0..9)
        .map(|i| {
            let x = (i as f64 - 4.0) * 1.5;
            DVec2::new(x, -0.08 * x * x)
        })
        .collect()
}

fn log_layout(hand: &HandController, frame: u32) {
    log::info!(
        "frame {}: {} cards, allocated {:.3}",
        frame,
        hand.len(),
        hand.allocated_length()
    );
    for (id, card) in hand.cards() {
        let focused = hand.focused() == Some(id);
        log::info!(
            "  {}{} pos=({:.3}, {:.3}) angle={:.1}deg scale={:.3} hp={}",
            card.name,
            if focused { "*" } else { "" },
            card.transform.position.x,
            card.transform.position.y,
            card.transform.angle().to_degrees(),
            card.transform.scale,
            card.health.value()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Card Hand (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match HandSettings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}; using default settings", e);
                HandSettings::default()
            }
        },
        None => HandSettings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let curve = SegmentedCurve::from_points(&fan_points(), settings.alpha);
    log::info!(
        "curve: {} segments, length {:.3}",
        curve.segments().len(),
        curve.total_length()
    );

    let mut hand = HandController::new(curve, settings, seed);
    let names: Vec<String> = hand.cards().map(|(_, c)| c.name.clone()).collect();

    for frame in 0..SESSION_FRAMES {
        // Scripted input: move focus along the hand, poke counters, drag
        if frame % 120 == 30 {
            if let Some(name) = names.get((frame / 120) as usize % names.len().max(1)) {
                hand.focus_by_name(name);
                hand.drag_by_name(name);
            }
        }
        if frame % 45 == 0 {
            hand.action_step();
        }
        if frame == 400 {
            if let Some(&id) = hand.order().first() {
                hand.damage(id, 100);
            }
        }

        let report = hand.frame(FRAME_DT);
        for failure in &report.failures {
            log::error!("frame {}: {}", frame, failure);
        }

        if frame % 120 == 119 {
            log_layout(&hand, frame);
        }
    }

    log::info!("Session finished with {} cards", hand.len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host drives HandController directly
}
