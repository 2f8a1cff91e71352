use crate::api::types::{EntityId, EntityKind};
use crate::core::geom::Aabb;

/// Scene-side record of something the host should draw.
/// Holds only the opaque ID, a kind for picking a mesh, and the current
/// world volume; physics state lives with the game.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    pub kind: EntityKind,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// World-space bounding volume as of the last sync.
    pub volume: Aabb,
}

impl Entity {
    /// Create a new entity with the given ID and an empty volume at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            kind: EntityKind::default(),
            active: true,
            volume: Aabb::default(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_volume(mut self, volume: Aabb) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
