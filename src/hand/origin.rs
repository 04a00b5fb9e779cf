//! Transform accumulator threaded through a layer stack

use glam::{DQuat, DVec2};
use serde::{Deserialize, Serialize};

/// Position, orientation and uniform scale of a card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub position: DVec2,
    pub orientation: DQuat,
    pub scale: f64,
}

impl Default for Origin {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            orientation: DQuat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Origin {
    /// Rotation about Z that turns the +X axis onto `direction`.
    ///
    /// A zero direction leaves the orientation at identity.
    pub fn facing(direction: DVec2) -> DQuat {
        if direction == DVec2::ZERO {
            return DQuat::IDENTITY;
        }
        DQuat::from_rotation_z(direction.y.atan2(direction.x))
    }

    /// Angle of the orientation about Z (radians)
    pub fn angle(&self) -> f64 {
        let forward = self.orientation * glam::DVec3::X;
        forward.y.atan2(forward.x)
    }
}
