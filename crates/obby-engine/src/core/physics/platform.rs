use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::core::geom::{Aabb, Axis, BoxShape};

/// Periodic displacement along one axis:
/// `base + amplitude * sin(elapsed * angular_speed + phase)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionLaw {
    pub axis: Axis,
    pub amplitude: f32,
    /// Radians per second.
    pub angular_speed: f32,
    pub phase: f32,
    /// Rest coordinate along `axis`.
    pub base: f32,
}

impl MotionLaw {
    pub fn new(axis: Axis, amplitude: f32, angular_speed: f32, phase: f32, base: f32) -> Self {
        Self {
            axis,
            amplitude,
            angular_speed,
            phase,
            base,
        }
    }

    /// Coordinate along `axis` at absolute time `elapsed`.
    pub fn coordinate(&self, elapsed: f64) -> f32 {
        // f64 keeps the phase accurate for long sessions
        let angle = elapsed * self.angular_speed as f64 + self.phase as f64;
        self.base + self.amplitude * angle.sin() as f32
    }
}

/// A platform volume owned by the active level.
#[derive(Debug, Clone)]
pub struct Platform {
    pub id: EntityId,
    pub tag: String,
    pub position: Vec3,
    pub shape: BoxShape,
    /// World volume; always matches `position` after [`Platform::apply_motion`].
    pub volume: Aabb,
    pub motion: Option<MotionLaw>,
    /// Reaching this platform completes the level.
    pub goal: bool,
}

impl Platform {
    /// Create a static platform centred at `position` with full `size`.
    pub fn new(id: EntityId, position: Vec3, size: Vec3) -> Self {
        let shape = BoxShape::from_size(size);
        Self {
            id,
            tag: String::new(),
            position,
            shape,
            volume: shape.volume_at(position),
            motion: None,
            goal: false,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_motion(mut self, motion: MotionLaw) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn as_goal(mut self) -> Self {
        self.goal = true;
        self
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.volume.max.y
    }

    /// Reposition from the motion law (if any) and refresh the volume.
    /// Returns true when the platform moved.
    pub fn apply_motion(&mut self, elapsed: f64) -> bool {
        let Some(law) = self.motion else {
            return false;
        };
        law.axis.set(&mut self.position, law.coordinate(elapsed));
        self.volume = self.shape.volume_at(self.position);
        true
    }
}

/// Ordered collection of the active level's platforms.
pub struct PlatformRegistry {
    platforms: Vec<Platform>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self {
            platforms: Vec::with_capacity(64),
        }
    }

    pub fn add(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    /// Remove a platform by ID, preserving the order of the rest.
    pub fn remove(&mut self, id: EntityId) -> Option<Platform> {
        let idx = self.platforms.iter().position(|p| p.id == id)?;
        Some(self.platforms.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Advance every moving platform to `elapsed` and refresh its volume
    /// before anything reads it this frame.
    pub fn update_motion(&mut self, elapsed: f64) {
        for p in self.platforms.iter_mut() {
            p.apply_motion(elapsed);
        }
    }

    pub fn as_slice(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    /// IDs of platforms that carry a motion law.
    pub fn moving_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.platforms.iter().filter(|p| p.motion.is_some()).map(|p| p.id)
    }

    pub fn goal(&self) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.goal)
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Drop every platform. Returns their IDs so the caller can clear the scene.
    pub fn clear(&mut self) -> Vec<EntityId> {
        self.platforms.drain(..).map(|p| p.id).collect()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn motion_law_at_zero_is_base_plus_phase() {
        let law = MotionLaw::new(Axis::X, 2.0, 1.0, FRAC_PI_2, 3.0);
        assert!((law.coordinate(0.0) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn motion_law_is_periodic() {
        let law = MotionLaw::new(Axis::Z, 1.5, 2.0, 0.3, -4.0);
        let period = std::f64::consts::PI; // 2π / angular_speed
        let a = law.coordinate(1.25);
        let b = law.coordinate(1.25 + period);
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn apply_motion_refreshes_volume() {
        let mut p = Platform::new(EntityId(1), Vec3::ZERO, Vec3::new(4.0, 0.5, 4.0))
            .with_motion(MotionLaw::new(Axis::Y, 1.0, 1.0, FRAC_PI_2, 0.0));
        assert!(p.apply_motion(0.0));
        assert!((p.position.y - 1.0).abs() < 1e-5);
        assert!((p.top() - 1.25).abs() < 1e-5);
        assert_eq!(p.volume, p.shape.volume_at(p.position));
    }

    #[test]
    fn static_platform_never_moves() {
        let mut p = Platform::new(EntityId(1), Vec3::new(1.0, 2.0, 3.0), Vec3::ONE);
        let before = p.volume;
        assert!(!p.apply_motion(10.0));
        assert_eq!(p.volume, before);
    }

    #[test]
    fn registry_update_moves_only_moving_platforms() {
        let mut reg = PlatformRegistry::new();
        reg.add(Platform::new(EntityId(1), Vec3::ZERO, Vec3::ONE));
        reg.add(
            Platform::new(EntityId(2), Vec3::ZERO, Vec3::ONE)
                .with_motion(MotionLaw::new(Axis::X, 2.0, 1.0, FRAC_PI_2, 0.0)),
        );
        reg.update_motion(0.0);
        assert_eq!(reg.get(EntityId(1)).unwrap().position.x, 0.0);
        assert!((reg.get(EntityId(2)).unwrap().position.x - 2.0).abs() < 1e-5);
        assert_eq!(reg.moving_ids().collect::<Vec<_>>(), vec![EntityId(2)]);
    }

    #[test]
    fn clear_returns_ids() {
        let mut reg = PlatformRegistry::new();
        reg.add(Platform::new(EntityId(4), Vec3::ZERO, Vec3::ONE));
        reg.add(Platform::new(EntityId(5), Vec3::ZERO, Vec3::ONE).as_goal());
        assert_eq!(reg.goal().unwrap().id, EntityId(5));
        let ids = reg.clear();
        assert_eq!(ids, vec![EntityId(4), EntityId(5)]);
        assert!(reg.is_empty());
    }
}
