use crate::core::time::FrameTime;

use super::body::Kinematics;
use super::integrator::integrate_vertical;
use super::landing::{resolve_landing, Landing};
use super::platform::PlatformRegistry;
use super::PhysicsConfig;

/// Outcome of one physics frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// The platform the body is standing on after this frame.
    pub landing: Option<Landing>,
    /// The body dropped below `out_of_bounds_y`.
    pub out_of_bounds: bool,
}

/// Run one frame: integrate the body, move platforms, then resolve landing
/// against the freshly moved volumes.
///
/// A body that ended last frame on a platform rides that platform's vertical
/// displacement, so descending platforms keep it grounded. Horizontal motion
/// is not carried.
pub fn step(
    body: &mut Kinematics,
    platforms: &mut PlatformRegistry,
    time: FrameTime,
    config: &PhysicsConfig,
) -> StepReport {
    let support = body
        .support
        .and_then(|id| platforms.get(id).map(|p| (id, p.position.y)));

    integrate_vertical(body, config.gravity, time.dt);
    platforms.update_motion(time.elapsed);

    if let Some((id, before)) = support {
        if let Some(platform) = platforms.get(id) {
            let dy = platform.position.y - before;
            body.position.y += dy;
            body.previous_y += dy;
        }
    }

    let landing = resolve_landing(body, platforms.as_slice(), config);

    StepReport {
        landing,
        out_of_bounds: body.position.y < config.out_of_bounds_y,
    }
}
