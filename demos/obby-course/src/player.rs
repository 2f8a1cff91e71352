use glam::Vec3;
use obby_engine::{Aabb, Action, ActionSource, BoxShape, EntityId, Kinematics};

/// Player avatar bounds relative to its origin: legs reach 0.65 below it,
/// the head 3.0 above, the arms 1.15 to each side.
pub fn player_shape() -> BoxShape {
    BoxShape::new(Vec3::new(-1.15, -0.65, -0.5), Vec3::new(1.15, 3.0, 0.51))
}

/// Distance above the origin that counts as chest height.
pub const CHEST_HEIGHT: f32 = 1.3;

pub struct Player {
    pub id: EntityId,
    pub body: Kinematics,
    /// Horizontal speed in units/s.
    pub speed: f32,
    /// Upward velocity applied on jump.
    pub jump_strength: f32,
}

impl Player {
    pub fn new(id: EntityId, spawn: Vec3) -> Self {
        Self {
            id,
            body: Kinematics::new(spawn, player_shape()),
            speed: 10.0,
            jump_strength: 12.0,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_jump_strength(mut self, jump_strength: f32) -> Self {
        self.jump_strength = jump_strength;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn volume(&self) -> Aabb {
        self.body.volume()
    }

    /// Bottom of the avatar in world space.
    pub fn feet_y(&self) -> f32 {
        self.body.volume().bottom()
    }

    pub fn chest(&self) -> Vec3 {
        self.body.position + Vec3::Y * CHEST_HEIGHT
    }

    /// Move horizontally from the held direction actions.
    /// Diagonals are normalised so they are no faster than straight lines.
    pub fn steer(&mut self, input: &dyn ActionSource, dt: f32) {
        let axis = |pos: Action, neg: Action| {
            (input.held(pos) as i32 - input.held(neg) as i32) as f32
        };
        let dir = Vec3::new(
            axis(Action::Right, Action::Left),
            0.0,
            axis(Action::Back, Action::Forward),
        );
        let step = dir.normalize_or_zero() * self.speed * dt;
        self.body.position.x += step.x;
        self.body.position.z += step.z;
    }

    /// Start a jump if Jump is held and the body may jump.
    pub fn try_jump(&mut self, input: &dyn ActionSource) -> bool {
        if input.held(Action::Jump) && self.body.can_jump {
            self.body.vertical_velocity = self.jump_strength;
            self.body.can_jump = false;
            true
        } else {
            false
        }
    }

    /// Put the player back at `spawn` with no motion.
    pub fn respawn(&mut self, spawn: Vec3) {
        self.body.teleport(spawn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Held(HashSet<Action>);

    impl Held {
        fn of(actions: &[Action]) -> Self {
            Held(actions.iter().copied().collect())
        }
    }

    impl ActionSource for Held {
        fn held(&self, action: Action) -> bool {
            self.0.contains(&action)
        }

        fn pressed(&self, action: Action) -> bool {
            self.0.contains(&action)
        }
    }

    #[test]
    fn steering_follows_actions() {
        let mut p = Player::new(EntityId(1), Vec3::ZERO);
        p.steer(&Held::of(&[Action::Forward]), 0.5);
        assert_eq!(p.position(), Vec3::new(0.0, 0.0, -5.0));
        p.steer(&Held::of(&[Action::Right]), 0.1);
        assert!((p.position().x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let mut p = Player::new(EntityId(1), Vec3::ZERO);
        p.steer(&Held::of(&[Action::Forward, Action::Left]), 1.0);
        let moved = Vec3::new(p.position().x, 0.0, p.position().z).length();
        assert!((moved - 10.0).abs() < 1e-4);
    }

    #[test]
    fn opposite_actions_cancel() {
        let mut p = Player::new(EntityId(1), Vec3::ZERO);
        p.steer(&Held::of(&[Action::Left, Action::Right]), 1.0);
        assert_eq!(p.position(), Vec3::ZERO);
    }

    #[test]
    fn jump_needs_can_jump() {
        let mut p = Player::new(EntityId(1), Vec3::ZERO);
        let jump = Held::of(&[Action::Jump]);
        assert!(!p.try_jump(&jump));

        p.body.can_jump = true;
        assert!(p.try_jump(&jump));
        assert_eq!(p.body.vertical_velocity, 12.0);
        assert!(!p.body.can_jump);
        assert!(!p.try_jump(&jump));
    }

    #[test]
    fn respawn_clears_motion() {
        let mut p = Player::new(EntityId(1), Vec3::ZERO);
        p.body.vertical_velocity = -30.0;
        p.respawn(Vec3::new(0.0, 2.0, 10.0));
        assert_eq!(p.position(), Vec3::new(0.0, 2.0, 10.0));
        assert_eq!(p.body.vertical_velocity, 0.0);
        assert!((p.feet_y() - 1.35).abs() < 1e-6);
    }
}
