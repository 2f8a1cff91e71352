//! Level plans and building them into the engine.
//!
//! A [`LevelPlan`] is plain data: platform boxes, motion, mob spawns and the
//! spawn point. [`build_level`] turns a plan into registered platforms and
//! mobs; phases for moving platforms come from the level's seeded RNG so the
//! same seed replays the same course.

pub mod blueprint;
pub mod procedural;

use std::f32::consts::TAU;

use glam::Vec3;
use obby_engine::{Axis, EngineContext, Entity, EntityId, EntityKind, MotionLaw, Platform, Rng, SceneHost};

use crate::mob::{Mob, MobParams};

/// Every platform slab is this thick.
pub const PLATFORM_THICKNESS: f32 = 0.5;

/// Sinusoidal movement attached to a platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub axis: Axis,
    pub amplitude: f32,
    /// Angular speed in rad/s.
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSpec {
    /// Center of the slab.
    pub position: Vec3,
    pub width: f32,
    pub depth: f32,
    pub movement: Option<Movement>,
    pub goal: bool,
}

impl PlatformSpec {
    pub fn new(position: Vec3, width: f32, depth: f32) -> Self {
        Self {
            position,
            width,
            depth,
            movement: None,
            goal: false,
        }
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, PLATFORM_THICKNESS, self.depth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobSpawn {
    /// Feet position.
    pub position: Vec3,
    pub params: MobParams,
}

impl MobSpawn {
    pub fn new(position: Vec3, params: MobParams) -> Self {
        Self { position, params }
    }
}

/// Everything needed to build one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelPlan {
    pub platforms: Vec<PlatformSpec>,
    pub mobs: Vec<MobSpawn>,
    pub spawn: Vec3,
}

impl LevelPlan {
    pub fn goal_index(&self) -> Option<usize> {
        self.platforms.iter().position(|p| p.goal)
    }
}

/// A level as it exists in the engine.
#[derive(Debug)]
pub struct BuiltLevel {
    pub goal: Option<EntityId>,
    pub mobs: Vec<Mob>,
    pub spawn: Vec3,
}

/// RNG for one level: the run seed mixed with the level number.
pub fn level_rng(seed: u64, level: u32) -> Rng {
    Rng::new(seed ^ u64::from(level).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Register every platform and mob of `plan` with the engine.
pub fn build_level(ctx: &mut EngineContext, plan: &LevelPlan, rng: &mut Rng) -> BuiltLevel {
    let mut goal = None;

    for (i, spec) in plan.platforms.iter().enumerate() {
        let id = ctx.next_id();
        let mut platform = Platform::new(id, spec.position, spec.size())
            .with_tag(format!("platform-{i}"));

        if let Some(m) = spec.movement {
            let base = m.axis.get(spec.position);
            let phase = rng.range(0.0, TAU);
            platform = platform.with_motion(MotionLaw::new(m.axis, m.amplitude, m.speed, phase, base));
            platform.apply_motion(ctx.time.elapsed);
        }
        if spec.goal {
            platform = platform.as_goal().with_tag("goal");
            goal = Some(id);
        }
        ctx.spawn_platform(platform);
    }

    let now = ctx.time.elapsed;
    let mobs = plan
        .mobs
        .iter()
        .map(|s| {
            let mob = Mob::new(ctx.next_id(), s.position, s.params, now);
            ctx.scene.add_entity(
                Entity::new(mob.id)
                    .with_tag("mob")
                    .with_kind(EntityKind::Mob)
                    .with_volume(mob.volume()),
            );
            mob
        })
        .collect::<Vec<_>>();

    log::info!(
        "level built: {} platforms, {} mobs, goal {:?}",
        plan.platforms.len(),
        mobs.len(),
        goal
    );

    BuiltLevel {
        goal,
        mobs,
        spawn: plan.spawn,
    }
}
