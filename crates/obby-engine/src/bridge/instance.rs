use bytemuck::{Pod, Zeroable};

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Per-entity volume record read by the host page from linear memory.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VolumeInstance {
    /// Entity ID (exact for IDs below 2^24).
    pub id: f32,
    /// `EntityKind::code()`.
    pub kind: f32,
    pub min_x: f32,
    pub min_y: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub max_z: f32,
}

impl VolumeInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_entity(entity: &Entity) -> Self {
        let v = entity.volume;
        Self {
            id: entity.id.0 as f32,
            kind: entity.kind.code(),
            min_x: v.min.x,
            min_y: v.min.y,
            min_z: v.min.z,
            max_x: v.max.x,
            max_y: v.max.y,
            max_z: v.max.z,
        }
    }

    pub fn entity_id(&self) -> EntityId {
        EntityId(self.id as u32)
    }
}

/// Volume buffer rebuilt every frame from the scene.
pub struct VolumeBuffer {
    pub instances: Vec<VolumeInstance>,
    capacity: usize,
}

impl VolumeBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Buffer that never holds more than `capacity` instances.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false (and drops it) when full.
    pub fn push(&mut self, instance: VolumeInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for linear-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for VolumeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityKind;
    use crate::core::geom::Aabb;
    use glam::Vec3;

    #[test]
    fn instance_is_eight_floats() {
        assert_eq!(std::mem::size_of::<VolumeInstance>(), VolumeInstance::STRIDE_BYTES);
    }

    #[test]
    fn floats_follow_wire_order() {
        let entity = Entity::new(EntityId(7))
            .with_kind(EntityKind::Mob)
            .with_volume(Aabb::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 3.0, 2.0)));
        let mut buf = VolumeBuffer::with_capacity(4);
        buf.push(VolumeInstance::from_entity(&entity));

        let expected: [f32; 8] = [7.0, 3.0, -1.0, 0.0, -2.0, 1.0, 3.0, 2.0];
        assert_eq!(buf.as_floats(), &expected[..]);
        assert_eq!(buf.instances[0].entity_id(), EntityId(7));
    }

    #[test]
    fn push_respects_capacity() {
        let mut buf = VolumeBuffer::with_capacity(1);
        assert!(buf.push(VolumeInstance::default()));
        assert!(!buf.push(VolumeInstance::default()));
        assert_eq!(buf.instance_count(), 1);
    }
}
