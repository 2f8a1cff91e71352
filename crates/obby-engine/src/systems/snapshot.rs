use crate::bridge::instance::{VolumeBuffer, VolumeInstance};
use crate::components::entity::Entity;

/// Build the volume buffer from a set of entities.
/// Inactive entities are skipped. Entities past the buffer's capacity are
/// dropped and the number dropped is returned.
pub fn build_volume_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut VolumeBuffer,
) -> usize {
    buffer.clear();

    let mut dropped = 0;
    for entity in entities {
        if !entity.active {
            continue;
        }
        if !buffer.push(VolumeInstance::from_entity(entity)) {
            dropped += 1;
        }
    }

    if dropped > 0 {
        log::warn!("volume buffer full: {} entities not sent", dropped);
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EntityId, EntityKind};

    #[test]
    fn skips_inactive_entities() {
        let entities = vec![
            Entity::new(EntityId(1)).with_kind(EntityKind::Player),
            Entity::new(EntityId(2)).with_active(false),
            Entity::new(EntityId(3)).with_kind(EntityKind::Platform),
        ];
        let mut buf = VolumeBuffer::with_capacity(8);
        build_volume_buffer(entities.iter(), &mut buf);

        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.instances[1].entity_id(), EntityId(3));
        assert_eq!(buf.instances[1].kind, EntityKind::Platform.code());
    }

    #[test]
    fn overflow_is_counted() {
        let entities: Vec<Entity> = (0..5).map(|i| Entity::new(EntityId(i))).collect();
        let mut buf = VolumeBuffer::with_capacity(3);
        assert_eq!(build_volume_buffer(entities.iter(), &mut buf), 2);
        assert_eq!(buf.instance_count(), 3);
    }

    #[test]
    fn rebuild_replaces_previous_frame() {
        let entities = vec![Entity::new(EntityId(1))];
        let mut buf = VolumeBuffer::with_capacity(8);
        build_volume_buffer(entities.iter(), &mut buf);
        build_volume_buffer(entities.iter(), &mut buf);
        assert_eq!(buf.instance_count(), 1);
    }
}
