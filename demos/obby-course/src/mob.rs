use glam::Vec3;
use serde::Deserialize;
use obby_engine::{Aabb, BoxShape, EntityId};

/// Mob bounds relative to its feet.
pub fn mob_shape() -> BoxShape {
    BoxShape::new(Vec3::new(-0.7, 0.0, -0.5), Vec3::new(0.7, 2.7, 0.56))
}

/// Closer than this, a mob stops advancing.
const STOP_DISTANCE: f32 = 0.5;

/// Tuning for one mob.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MobParams {
    /// Chase speed in units/s.
    pub speed: f32,
    /// Horizontal distance within which the mob notices the player.
    pub aggro_radius: f32,
    /// Seconds after spawning before the mob starts moving.
    pub chase_delay: f32,
    pub health: u32,
}

impl Default for MobParams {
    fn default() -> Self {
        Self {
            speed: 2.5,
            aggro_radius: 10.0,
            chase_delay: 1.0,
            health: 2,
        }
    }
}

impl MobParams {
    pub fn new(speed: f32, aggro_radius: f32, chase_delay: f32) -> Self {
        Self {
            speed,
            aggro_radius,
            chase_delay,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mob {
    pub id: EntityId,
    pub position: Vec3,
    pub shape: BoxShape,
    pub params: MobParams,
    /// Game time the mob appeared.
    pub spawned_at: f64,
    pub health: u32,
}

impl Mob {
    pub fn new(id: EntityId, position: Vec3, params: MobParams, spawned_at: f64) -> Self {
        Self {
            id,
            position,
            shape: mob_shape(),
            params,
            spawned_at,
            health: params.health,
        }
    }

    pub fn volume(&self) -> Aabb {
        self.shape.volume_at(self.position)
    }

    pub fn center(&self) -> Vec3 {
        self.volume().center()
    }

    /// Whether the chase delay has run out at time `now`.
    pub fn is_awake(&self, now: f64) -> bool {
        now - self.spawned_at >= f64::from(self.params.chase_delay)
    }

    /// Advance toward `target` on the horizontal plane. Returns true if the
    /// mob moved.
    pub fn chase(&mut self, target: Vec3, now: f64, dt: f32) -> bool {
        if !self.is_awake(now) {
            return false;
        }

        let mut to_target = target - self.position;
        to_target.y = 0.0;
        let dist = to_target.length();

        if dist > STOP_DISTANCE && dist <= self.params.aggro_radius {
            self.position += to_target / dist * self.params.speed * dt;
            true
        } else {
            false
        }
    }

    /// Take one point of damage. Returns true when this kills the mob.
    pub fn damage(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }
}
