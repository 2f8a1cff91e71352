//! Platformer physics: vertical integration, platform motion and landing.
//!
//! One frame runs [`integrate_vertical`] → [`PlatformRegistry::update_motion`]
//! → [`resolve_landing`]; [`step`] wires the three together.

mod body;
mod integrator;
mod landing;
mod platform;
mod stepper;

pub use body::Kinematics;
pub use integrator::integrate_vertical;
pub use landing::{resolve_landing, Landing};
pub use platform::{MotionLaw, Platform, PlatformRegistry};
pub use stepper::{step, StepReport};

use serde::{Deserialize, Serialize};

/// Tunables for the physics loop. All lengths are world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration in units/s². Negative pulls down.
    pub gravity: f32,
    /// Forgiveness for the clean-landing test and the top of the fallback window.
    pub landing_eps: f32,
    /// Depth of the near-top fallback window below a platform's top.
    pub near_top: f32,
    /// Gap left between a landed body's bottom and the surface.
    pub snap_offset: f32,
    /// How far below its bottom a body still probes for support.
    /// Must be at least `snap_offset` for resting bodies to stay grounded.
    pub contact_skin: f32,
    /// Bodies below this height have left the course.
    pub out_of_bounds_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -22.0,
            landing_eps: 0.18,
            near_top: 0.45,
            snap_offset: 0.01,
            contact_skin: 0.02,
            out_of_bounds_y: -20.0,
        }
    }
}
