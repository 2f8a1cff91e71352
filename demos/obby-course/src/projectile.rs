use glam::Vec3;
use obby_engine::{BoxShape, EntityId};

/// Orb flight speed in units/s.
pub const ORB_SPEED: f32 = 48.0;
/// Distance from a mob's center that counts as a hit.
pub const HIT_RADIUS: f32 = 1.0;
/// Orbs vanish after travelling this far.
pub const MAX_TRAVEL: f32 = 100.0;

pub fn orb_shape() -> BoxShape {
    BoxShape::centered(Vec3::splat(0.2))
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub traveled: f32,
}

impl Projectile {
    /// Launch from `origin` toward `target`. Falls back to −Z when the
    /// target coincides with the origin.
    pub fn aimed(id: EntityId, origin: Vec3, target: Vec3) -> Self {
        let dir = (target - origin).try_normalize().unwrap_or(Vec3::NEG_Z);
        Self {
            id,
            position: origin,
            velocity: dir * ORB_SPEED,
            traveled: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        let step = self.velocity * dt;
        self.position += step;
        self.traveled += step.length();
    }

    pub fn hits(&self, center: Vec3) -> bool {
        self.position.distance(center) < HIT_RADIUS
    }

    pub fn expired(&self) -> bool {
        self.traveled > MAX_TRAVEL
    }
}
