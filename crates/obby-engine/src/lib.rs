pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::collab::{ActionSource, Hud, HudEvent, LevelReset, SceneHost};
pub use api::error::ConfigError;
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, EntityKind, GameEvent, GameStatus};
pub use components::entity::Entity;
pub use core::geom::{Aabb, Axis, BoxShape};
pub use core::physics::{
    integrate_vertical, resolve_landing, step,
    Kinematics, Landing, MotionLaw, PhysicsConfig,
    Platform, PlatformRegistry, StepReport,
};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::{FrameTime, GameClock};
pub use input::actions::{Action, ActionState, KeyBindings};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::instance::{VolumeBuffer, VolumeInstance};
pub use bridge::protocol::ProtocolLayout;
pub use systems::cleanup::CleanupQueue;
pub use systems::snapshot::build_volume_buffer;
