//! Narrow contracts between the core and everything outside it.
//!
//! The core never touches meshes, DOM nodes or key codes; it talks to these
//! traits instead. In-memory implementations live next to the types they
//! wrap (`Scene`, `ActionState`, `EngineContext`).

use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::geom::Aabb;
use crate::input::actions::Action;

/// Whatever holds the visual side of each entity.
pub trait SceneHost {
    /// Register an entity. Re-adding an existing ID replaces it.
    fn add_entity(&mut self, entity: Entity);

    /// Drop an entity. Returns `false` if it was not present.
    fn remove_entity(&mut self, id: EntityId) -> bool;

    /// Publish an entity's current world volume.
    fn set_volume(&mut self, id: EntityId, volume: Aabb);

    /// The last volume published for `id`.
    fn volume(&self, id: EntityId) -> Option<Aabb>;
}

/// Logical input, sampled once per tick.
pub trait ActionSource {
    fn held(&self, action: Action) -> bool;

    /// Held this tick but not the previous one.
    fn pressed(&self, action: Action) -> bool;
}

/// Restarts the current level after a gameplay failure
/// (fell out of the world, caught by a mob).
pub trait LevelReset {
    fn reset_level(&mut self, ctx: &mut EngineContext, reason: &str);
}

/// Score and status text shown to the player.
pub trait Hud {
    fn add_score(&mut self, delta: u32);

    /// Show `text`. `None` keeps it up until replaced.
    fn show_message(&mut self, text: &str, duration: Option<f32>);
}

/// A HUD update recorded during a tick, drained by the host afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum HudEvent {
    Score { delta: u32 },
    Message { text: String, duration: Option<f32> },
}
