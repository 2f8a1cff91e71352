use crate::api::types::EntityId;

use super::body::Kinematics;
use super::platform::Platform;
use super::PhysicsConfig;

/// The platform a body landed on this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub platform: EntityId,
    /// Index into the platform slice that was resolved against.
    pub index: usize,
    pub top: f32,
}

/// Decide whether the body's downward motion is arrested by a platform.
///
/// A candidate must overlap the body on all three axes (the body probes
/// `contact_skin` below its bottom) and either:
/// - clean landing: the body's bottom last frame was at or above `top - landing_eps`, or
/// - near-top fallback: its bottom now lies in `[top - near_top, top + landing_eps]`.
///
/// The highest valid top wins, so stacked stairs never snap the body to the
/// lower step. Equal tops keep the first one encountered. Bodies moving up
/// never land.
pub fn resolve_landing(
    body: &mut Kinematics,
    platforms: &[Platform],
    config: &PhysicsConfig,
) -> Option<Landing> {
    let landing = find_landing(body, platforms, config);

    match landing {
        Some(l) => {
            // Computed from the top alone so a resting body lands on the same
            // bit pattern every frame
            body.position.y = l.top + config.snap_offset - body.shape.bottom_offset();
            body.vertical_velocity = 0.0;
            body.grounded = true;
            body.can_jump = true;
            body.support = Some(l.platform);
        }
        None => {
            body.grounded = false;
            body.can_jump = false;
            body.support = None;
        }
    }

    landing
}

fn find_landing(body: &Kinematics, platforms: &[Platform], config: &PhysicsConfig) -> Option<Landing> {
    if body.vertical_velocity > 0.0 {
        return None;
    }

    let now = body.volume();
    let probe = now.extended_down(config.contact_skin);
    let prev_bottom = body.previous_volume().bottom();
    let bottom = now.bottom();

    let mut best: Option<Landing> = None;

    for (index, platform) in platforms.iter().enumerate() {
        if !probe.intersects(&platform.volume) {
            continue;
        }

        let top = platform.top();
        let was_above = prev_bottom >= top - config.landing_eps;
        let near_top = bottom <= top + config.landing_eps && bottom >= top - config.near_top;

        if !(was_above || near_top) {
            continue;
        }

        if best.map_or(true, |b| top > b.top) {
            best = Some(Landing {
                platform: platform.id,
                index,
                top,
            });
        }
    }

    best
}
