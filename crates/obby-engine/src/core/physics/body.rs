use glam::Vec3;

use crate::api::types::EntityId;
use crate::core::geom::{Aabb, BoxShape};

/// Kinematic state of a gravity-driven body (the player avatar).
///
/// Only the vertical axis is simulated; horizontal motion is written
/// directly into `position` by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub can_jump: bool,
    /// Height at the start of the current frame, before integration.
    pub previous_y: f32,
    pub shape: BoxShape,
    /// Platform the body stood on at the end of the last frame.
    pub support: Option<EntityId>,
}

impl Kinematics {
    pub fn new(position: Vec3, shape: BoxShape) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            grounded: false,
            can_jump: false,
            previous_y: position.y,
            shape,
            support: None,
        }
    }

    /// Start in a resting state (grounded, jump available).
    pub fn resting(mut self) -> Self {
        self.grounded = true;
        self.can_jump = true;
        self
    }

    /// Start resting on platform `id`, so its motion carries the body from
    /// the first frame.
    pub fn standing_on(self, id: EntityId) -> Self {
        let mut body = self.resting();
        body.support = Some(id);
        body
    }

    pub fn with_velocity(mut self, vertical_velocity: f32) -> Self {
        self.vertical_velocity = vertical_velocity;
        self
    }

    /// World-space volume at the current position.
    #[inline]
    pub fn volume(&self) -> Aabb {
        self.shape.volume_at(self.position)
    }

    /// Volume as it was before this frame's vertical move.
    #[inline]
    pub fn previous_volume(&self) -> Aabb {
        self.volume()
            .translated(Vec3::new(0.0, self.previous_y - self.position.y, 0.0))
    }

    /// Place the body at `position` with no vertical motion.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.previous_y = position.y;
        self.vertical_velocity = 0.0;
        self.grounded = false;
        self.can_jump = false;
        self.support = None;
    }
}
