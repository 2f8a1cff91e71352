use crate::api::collab::SceneHost;
use crate::api::types::{EntityId, EntityKind};
use crate::components::entity::Entity;
use crate::core::geom::Aabb;

/// Simple entity storage using a flat Vec.
/// Designed for small-to-medium entity counts (hundreds, not millions).
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    /// Add an entity to the scene. An existing entity with the same ID is replaced.
    pub fn spawn(&mut self, entity: Entity) {
        if let Some(existing) = self.get_mut(entity.id) {
            *existing = entity;
        } else {
            self.entities.push(entity);
        }
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        if let Some(idx) = self.entities.iter().position(|e| e.id == id) {
            Some(self.entities.swap_remove(idx))
        } else {
            None
        }
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// All entities of one kind.
    pub fn find_all_by_kind(&self, kind: EntityKind) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.kind == kind).collect()
    }

    /// Remove every entity of one kind. Returns how many were removed.
    pub fn despawn_kind(&mut self, kind: EntityKind) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.kind != kind);
        before - self.entities.len()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneHost for Scene {
    fn add_entity(&mut self, entity: Entity) {
        self.spawn(entity);
    }

    fn remove_entity(&mut self, id: EntityId) -> bool {
        self.despawn(id).is_some()
    }

    fn set_volume(&mut self, id: EntityId, volume: Aabb) {
        if let Some(e) = self.get_mut(id) {
            e.volume = volume;
        }
    }

    fn volume(&self, id: EntityId) -> Option<Aabb> {
        self.get(id).map(|e| e.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn unit_box_at(x: f32) -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(x, 0.0, 0.0), Vec3::splat(0.5))
    }

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_volume(unit_box_at(10.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.volume.center().x, 10.0);
    }

    #[test]
    fn despawn_removes_entity() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id));
        assert_eq!(scene.len(), 1);
        scene.despawn(id);
        assert_eq!(scene.len(), 0);
    }

    #[test]
    fn spawn_same_id_replaces() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_kind(EntityKind::Mob));
        scene.spawn(Entity::new(EntityId(1)).with_kind(EntityKind::Platform));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(EntityId(1)).unwrap().kind, EntityKind::Platform);
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("hero"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("enemy"));
        let hero = scene.find_by_tag("hero").unwrap();
        assert_eq!(hero.id, EntityId(1));
    }

    #[test]
    fn despawn_kind_leaves_others() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_kind(EntityKind::Player));
        scene.spawn(Entity::new(EntityId(2)).with_kind(EntityKind::Mob));
        scene.spawn(Entity::new(EntityId(3)).with_kind(EntityKind::Mob));
        assert_eq!(scene.despawn_kind(EntityKind::Mob), 2);
        assert_eq!(scene.len(), 1);
        assert!(scene.find_all_by_kind(EntityKind::Mob).is_empty());
    }

    #[test]
    fn host_reports_volume_on_demand() {
        let mut scene = Scene::new();
        let host: &mut dyn SceneHost = &mut scene;
        host.add_entity(Entity::new(EntityId(9)).with_kind(EntityKind::Platform));
        host.set_volume(EntityId(9), unit_box_at(2.0));
        assert_eq!(host.volume(EntityId(9)), Some(unit_box_at(2.0)));
        assert!(host.remove_entity(EntityId(9)));
        assert!(!host.remove_entity(EntityId(9)));
        assert_eq!(host.volume(EntityId(9)), None);
    }
}
