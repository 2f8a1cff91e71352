use serde::Deserialize;

use crate::api::collab::{ActionSource, Hud, HudEvent, SceneHost};
use crate::api::error::ConfigError;
use crate::api::types::{EntityId, EntityKind, GameEvent, GameStatus};
use crate::components::entity::Entity;
use crate::core::physics::{step, Kinematics, PhysicsConfig, Platform, PlatformRegistry, StepReport};
use crate::core::scene::Scene;
use crate::core::time::FrameTime;
use crate::systems::cleanup::CleanupQueue;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum number of volumes written to the wire buffer (default: 512).
    pub max_volumes: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Longest frame the simulation will integrate, in seconds (default: 0.1).
    /// Longer host frames are clamped so a backgrounded tab cannot tunnel
    /// the player through a platform.
    pub max_frame_dt: f32,
    pub physics: PhysicsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_volumes: 512,
            max_events: 32,
            max_frame_dt: 0.1,
            physics: PhysicsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;

        if self.max_volumes == 0 {
            return Err(ConfigError::invalid("max_volumes", "must be at least 1"));
        }
        if self.max_events == 0 {
            return Err(ConfigError::invalid("max_events", "must be at least 1"));
        }
        if !(self.max_frame_dt > 0.0 && self.max_frame_dt.is_finite()) {
            return Err(ConfigError::invalid(
                "max_frame_dt",
                format!("must be positive, got {}", self.max_frame_dt),
            ));
        }
        if !(p.gravity < 0.0) {
            return Err(ConfigError::invalid(
                "physics.gravity",
                format!("must pull downwards, got {}", p.gravity),
            ));
        }
        if p.landing_eps < 0.0 || p.snap_offset < 0.0 {
            return Err(ConfigError::invalid(
                "physics.landing_eps",
                "tolerances cannot be negative",
            ));
        }
        if p.near_top < p.landing_eps {
            return Err(ConfigError::invalid(
                "physics.near_top",
                format!("{} is smaller than landing_eps {}", p.near_top, p.landing_eps),
            ));
        }
        if p.contact_skin < p.snap_offset {
            return Err(ConfigError::invalid(
                "physics.contact_skin",
                format!("{} is smaller than snap_offset {}", p.contact_skin, p.snap_offset),
            ));
        }
        Ok(())
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, build the first level, spawn the player.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. `ctx.time` already holds this frame's clock.
    fn update(&mut self, ctx: &mut EngineContext, input: &dyn ActionSource);

    /// Level, score and lives for the host's HUD.
    fn status(&self) -> GameStatus {
        GameStatus::default()
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    /// Platforms of the active level. Cleared on every level build.
    pub platforms: PlatformRegistry,
    pub events: Vec<GameEvent>,
    pub hud: Vec<HudEvent>,
    /// Clock reading for the current frame.
    pub time: FrameTime,
    pub config: GameConfig,
    cleanup: CleanupQueue,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            platforms: PlatformRegistry::new(),
            events: Vec::with_capacity(config.max_events),
            hud: Vec::new(),
            time: FrameTime::default(),
            config,
            cleanup: CleanupQueue::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        } else {
            log::warn!("event buffer full, dropping kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data (events, HUD updates).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.hud.clear();
    }

    // -- Level building --

    /// Register a platform with physics and the scene.
    pub fn spawn_platform(&mut self, platform: Platform) -> EntityId {
        let id = platform.id;
        let kind = if platform.goal {
            EntityKind::Goal
        } else {
            EntityKind::Platform
        };
        self.scene.add_entity(
            Entity::new(id)
                .with_tag(platform.tag.clone())
                .with_kind(kind)
                .with_volume(platform.volume),
        );
        self.platforms.add(platform);
        id
    }

    /// Remove an entity from the scene, the platform registry and the
    /// cleanup queue.
    pub fn despawn(&mut self, id: EntityId) {
        self.scene.remove_entity(id);
        self.platforms.remove(id);
        self.cleanup.cancel(id);
    }

    /// Remove every platform of the active level from physics and the scene.
    /// Returns how many were removed.
    pub fn clear_platforms(&mut self) -> usize {
        let ids = self.platforms.clear();
        for id in &ids {
            self.scene.remove_entity(*id);
        }
        ids.len()
    }

    // -- Deferred cleanup --

    /// Despawn `id` once `delay` seconds of game time have passed.
    pub fn despawn_after(&mut self, id: EntityId, delay: f32) {
        self.cleanup.schedule(id, self.time.elapsed + f64::from(delay.max(0.0)));
    }

    /// Despawn every entity whose scheduled time has come.
    /// Called by the runner after `Game::update()`.
    pub fn flush_cleanup(&mut self) -> usize {
        let expired = self.cleanup.drain_expired(self.time.elapsed);
        for id in &expired {
            self.scene.remove_entity(*id);
        }
        expired.len()
    }

    /// Drop every pending cleanup without despawning.
    pub fn cancel_cleanup(&mut self) {
        self.cleanup.clear();
    }

    pub fn pending_cleanup(&self) -> usize {
        self.cleanup.len()
    }

    // -- Physics --

    /// Step the physics loop for one body and sync platform volumes back to
    /// the scene.
    pub fn step_physics(&mut self, body: &mut Kinematics) -> StepReport {
        let report = step(body, &mut self.platforms, self.time, &self.config.physics);

        for platform in self.platforms.iter().filter(|p| p.motion.is_some()) {
            self.scene.set_volume(platform.id, platform.volume);
        }

        if let Some(landing) = report.landing {
            log::trace!("landed on {:?} at top {:.3}", landing.platform, landing.top);
        }
        report
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud for EngineContext {
    fn add_score(&mut self, delta: u32) {
        self.hud.push(HudEvent::Score { delta });
        self.emit_event(GameEvent::new(GameEvent::SCORE, delta as f32, 0.0, 0.0));
    }

    fn show_message(&mut self, text: &str, duration: Option<f32>) {
        self.hud.push(HudEvent::Message {
            text: text.to_string(),
            duration,
        });
    }
}
