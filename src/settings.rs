//! Hand layout settings
//!
//! Loaded from JSON; every field falls back to its default when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Focus ramp speed and the ease ranges it drives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusTuning {
    /// Ramp change per evaluation
    pub speed: f64,
    /// Spacing claimed at ramp 0 / ramp 1
    pub gap_low: f64,
    pub gap_high: f64,
    /// Display scale at ramp 0 / ramp 1
    pub scale_low: f64,
    pub scale_high: f64,
}

impl Default for FocusTuning {
    fn default() -> Self {
        Self {
            speed: FOCUS_SPEED,
            gap_low: FOCUS_GAP_LOW,
            gap_high: FOCUS_GAP_HIGH,
            scale_low: FOCUS_SCALE_LOW,
            scale_high: FOCUS_SCALE_HIGH,
        }
    }
}

/// How allocated offsets map onto the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangeTuning {
    /// Share of the curve skipped before the first card
    pub margin: f64,
    /// Share of the curve the cards are spread over
    pub range: f64,
}

impl Default for ArrangeTuning {
    fn default() -> Self {
        Self {
            margin: ARRANGE_MARGIN,
            range: ARRANGE_RANGE,
        }
    }
}

/// Status counter behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterTuning {
    /// Random targets are drawn from [target_min, target_max)
    pub target_min: i32,
    pub target_max: i32,
    /// Subtracted from the raw counter to get the displayed value
    pub offset: i32,
    /// Seconds between single-unit steps toward the target
    pub step_seconds: f64,
}

impl Default for CounterTuning {
    fn default() -> Self {
        Self {
            target_min: 3,
            target_max: 12,
            offset: 2,
            step_seconds: 1.0,
        }
    }
}

/// Complete layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandSettings {
    /// Catmull-Rom parameterization (0.5 = centripetal)
    pub alpha: f64,
    pub focus: FocusTuning,
    pub arrange: ArrangeTuning,
    pub counters: CounterTuning,
    /// Initial hand size is drawn from [pool_min, pool_max)
    pub pool_min: usize,
    pub pool_max: usize,
    /// Card names are `{prefix}{index:02}`
    pub name_prefix: String,
}

impl Default for HandSettings {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            focus: FocusTuning::default(),
            arrange: ArrangeTuning::default(),
            counters: CounterTuning::default(),
            pool_min: 4,
            pool_max: 7,
            name_prefix: "cc_".to_string(),
        }
    }
}

impl HandSettings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Name for the card created at `index`
    pub fn card_name(&self, index: usize) -> String {
        format!("{}{:02}", self.name_prefix, index)
    }
}
