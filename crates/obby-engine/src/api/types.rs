use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// What an entity represents. The host uses this to pick a mesh/material;
/// the core only uses it for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    Player,
    Platform,
    Goal,
    Mob,
    Projectile,
    /// Short-lived visual effect (laser beam, hit flash).
    Effect,
}

impl EntityKind {
    /// Numeric code written into the wire buffer.
    /// Must stay in sync with the host's `EntityKind` table.
    pub fn code(self) -> f32 {
        match self {
            EntityKind::Player => 0.0,
            EntityKind::Platform => 1.0,
            EntityKind::Goal => 2.0,
            EntityKind::Mob => 3.0,
            EntityKind::Projectile => 4.0,
            EntityKind::Effect => 5.0,
        }
    }
}

/// A game event communicated from Rust to the host page via linear memory.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Score changed: `a` = delta.
    pub const SCORE: f32 = 1.0;
    /// Level changed: `a` = new level number.
    pub const LEVEL: f32 = 2.0;
    /// Lives changed: `a` = remaining lives.
    pub const LIVES: f32 = 3.0;
    /// Session over: `a` = final score.
    pub const GAME_OVER: f32 = 4.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Session summary a game exposes to the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStatus {
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_are_distinct() {
        let kinds = [
            EntityKind::Player,
            EntityKind::Platform,
            EntityKind::Goal,
            EntityKind::Mob,
            EntityKind::Projectile,
            EntityKind::Effect,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }
}
