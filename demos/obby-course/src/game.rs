use glam::Vec3;
use serde::Deserialize;
use obby_engine::*;

use crate::levels::{self, blueprint, procedural, LevelPlan};
use crate::mob::Mob;
use crate::player::Player;
use crate::projectile::{orb_shape, Projectile};
use crate::session::{GameSession, LifeLost};
use crate::weapon::{Attack, Weapon, WeaponKind, BEAM_LIFETIME, LASER_POINTS, ORB_POINTS, SWORD_POINTS};

pub const FELL_MESSAGE: &str = "You fell! Try again.";
pub const CAUGHT_MESSAGE: &str = "A mob got you! Be careful!";
pub const GAME_OVER_MESSAGE: &str = "Game Over! Press R to Restart";
/// Seconds a transient HUD message stays up.
const MESSAGE_SECONDS: f32 = 2.0;
/// Half thickness of a drawn laser beam.
const BEAM_RADIUS: f32 = 0.05;

/// Where courses come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelSource {
    /// The six hand-authored staircases, repeating.
    #[default]
    Blueprints,
    /// A fresh random course per level.
    Procedural,
}

/// Game-side tuning, separate from the engine's `GameConfig`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    /// Seeds platform phases and procedural courses.
    pub seed: u64,
    pub source: LevelSource,
    pub weapon: WeaponKind,
    pub lives: u32,
    pub player_speed: f32,
    pub jump_strength: f32,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            source: LevelSource::default(),
            weapon: WeaponKind::default(),
            lives: 3,
            player_speed: 10.0,
            jump_strength: 12.0,
        }
    }
}

impl CourseConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CourseConfig = serde_json::from_str(json)?;
        if config.lives == 0 {
            return Err(ConfigError::invalid("lives", "must be at least 1"));
        }
        if !(config.player_speed > 0.0) {
            return Err(ConfigError::invalid(
                "player_speed",
                format!("must be positive, got {}", config.player_speed),
            ));
        }
        if !(config.jump_strength > 0.0) {
            return Err(ConfigError::invalid(
                "jump_strength",
                format!("must be positive, got {}", config.jump_strength),
            ));
        }
        Ok(config)
    }
}

/// The obby: climb from the spawn to the goal platform, dodge or fight the
/// mobs, and keep going for as long as the lives last.
pub struct ObbyCourse {
    config: CourseConfig,
    session: GameSession,
    player: Option<Player>,
    mobs: Vec<Mob>,
    projectiles: Vec<Projectile>,
    weapon: Weapon,
    goal: Option<EntityId>,
    spawn: Vec3,
}

impl ObbyCourse {
    pub fn new() -> Self {
        Self::with_config(CourseConfig::default())
    }

    pub fn with_config(config: CourseConfig) -> Self {
        Self {
            session: GameSession::new(config.lives),
            weapon: Weapon::new(config.weapon),
            config,
            player: None,
            mobs: Vec::new(),
            projectiles: Vec::new(),
            goal: None,
            spawn: Vec3::ZERO,
        }
    }

    pub fn select_weapon(&mut self, kind: WeaponKind) {
        if self.weapon.kind() != kind {
            self.weapon = Weapon::new(kind);
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn mobs(&self) -> &[Mob] {
        &self.mobs
    }

    fn plan(&self, rng: &mut Rng) -> LevelPlan {
        match self.config.source {
            LevelSource::Blueprints => blueprint::blueprint(self.session.level as usize - 1),
            LevelSource::Procedural => procedural::generate(self.session.level, rng),
        }
    }

    /// Tear down the current level and build the session's level fresh.
    fn rebuild(&mut self, ctx: &mut EngineContext) {
        self.clear_level(ctx);

        let mut rng = levels::level_rng(self.config.seed, self.session.level);
        let plan = self.plan(&mut rng);
        let built = levels::build_level(ctx, &plan, &mut rng);
        self.goal = built.goal;
        self.mobs = built.mobs;
        self.spawn = built.spawn;

        if let Some(player) = self.player.as_mut() {
            player.respawn(self.spawn);
            ctx.scene.set_volume(player.id, player.volume());
        }
    }

    fn clear_level(&mut self, ctx: &mut EngineContext) {
        ctx.clear_platforms();
        for mob in self.mobs.drain(..) {
            ctx.despawn(mob.id);
        }
        for orb in self.projectiles.drain(..) {
            ctx.despawn(orb.id);
        }
        ctx.scene.despawn_kind(EntityKind::Effect);
        ctx.cancel_cleanup();
        self.goal = None;
    }

    fn complete_level(&mut self, ctx: &mut EngineContext) {
        let bonus = self.session.complete_level();
        let finished = self.session.level - 1;
        log::info!("level {finished} complete, +{bonus}");

        ctx.add_score(bonus);
        ctx.show_message(&format!("Level {finished} Complete!"), Some(MESSAGE_SECONDS));
        ctx.emit_event(GameEvent::new(GameEvent::LEVEL, self.session.level as f32, 0.0, 0.0));
        self.rebuild(ctx);
    }

    fn restart(&mut self, ctx: &mut EngineContext) {
        log::info!("restarting after game over, final score {}", self.session.score);
        self.session.restart();
        ctx.emit_event(GameEvent::new(GameEvent::LEVEL, self.session.level as f32, 0.0, 0.0));
        ctx.emit_event(GameEvent::new(GameEvent::LIVES, self.session.lives as f32, 0.0, 0.0));
        ctx.show_message("", None);
        self.rebuild(ctx);
    }

    fn kill_mob(&mut self, ctx: &mut EngineContext, id: EntityId) -> bool {
        let Some(idx) = self.mobs.iter().position(|m| m.id == id) else {
            return false;
        };
        self.mobs.swap_remove(idx);
        ctx.despawn(id);
        true
    }

    fn apply_attack(&mut self, ctx: &mut EngineContext, attack: Attack) {
        if attack != Attack::CoolingDown {
            log::debug!("{:?} attack: {attack:?}", self.weapon.kind());
        }
        match attack {
            Attack::CoolingDown => {}
            Attack::NoTarget => ctx.show_message("Laser missed.", Some(MESSAGE_SECONDS)),
            Attack::Slash { killed } => {
                let mut count = 0;
                for id in killed {
                    if self.kill_mob(ctx, id) {
                        count += 1;
                    }
                }
                if count > 0 {
                    self.award(ctx, SWORD_POINTS * count);
                    ctx.show_message(
                        &format!("Sword slash! Killed {count} mob(s)."),
                        Some(MESSAGE_SECONDS),
                    );
                } else {
                    ctx.show_message("Sword swing missed.", Some(MESSAGE_SECONDS));
                }
            }
            Attack::Beam { hit, from, to } => {
                let beam = ctx.next_id();
                ctx.scene.add_entity(
                    Entity::new(beam)
                        .with_tag("beam")
                        .with_kind(EntityKind::Effect)
                        .with_volume(beam_volume(from, to)),
                );
                ctx.despawn_after(beam, BEAM_LIFETIME);

                match hit {
                    Some(id) if self.kill_mob(ctx, id) => {
                        self.award(ctx, LASER_POINTS);
                        ctx.show_message("Laser hit a mob!", Some(MESSAGE_SECONDS));
                    }
                    _ => ctx.show_message("Laser missed.", Some(MESSAGE_SECONDS)),
                }
            }
            Attack::Launch { origin, target } => {
                let orb = Projectile::aimed(ctx.next_id(), origin, target);
                ctx.scene.add_entity(
                    Entity::new(orb.id)
                        .with_tag("orb")
                        .with_kind(EntityKind::Projectile)
                        .with_volume(orb_shape().volume_at(orb.position)),
                );
                self.projectiles.push(orb);
            }
        }
    }

    fn update_projectiles(&mut self, ctx: &mut EngineContext) {
        let dt = ctx.time.dt;
        let mut i = 0;
        while i < self.projectiles.len() {
            let orb = &mut self.projectiles[i];
            orb.advance(dt);

            let hit = self.mobs.iter().position(|m| orb.hits(m.center()));
            if hit.is_none() && !orb.expired() {
                ctx.scene.set_volume(orb.id, orb_shape().volume_at(orb.position));
                i += 1;
                continue;
            }

            let orb = self.projectiles.swap_remove(i);
            ctx.despawn(orb.id);
            if let Some(idx) = hit {
                if self.mobs[idx].damage() {
                    let mob = self.mobs.swap_remove(idx);
                    ctx.despawn(mob.id);
                    self.award(ctx, ORB_POINTS);
                }
            }
        }
    }

    fn award(&mut self, ctx: &mut EngineContext, points: u32) {
        self.session.award(points);
        ctx.add_score(points);
    }
}

impl Default for ObbyCourse {
    fn default() -> Self {
        Self::new()
    }
}

fn beam_volume(from: Vec3, to: Vec3) -> Aabb {
    let b = Aabb::from_points(from, to);
    Aabb::new(b.min - Vec3::splat(BEAM_RADIUS), b.max + Vec3::splat(BEAM_RADIUS))
}

impl Game for ObbyCourse {
    fn init(&mut self, ctx: &mut EngineContext) {
        let id = ctx.next_id();
        let player = Player::new(id, Vec3::ZERO)
            .with_speed(self.config.player_speed)
            .with_jump_strength(self.config.jump_strength);
        ctx.scene.add_entity(
            Entity::new(id)
                .with_tag("player")
                .with_kind(EntityKind::Player)
                .with_volume(player.volume()),
        );
        self.player = Some(player);
        self.rebuild(ctx);

        log::info!(
            "obby course started: {:?} levels, {} lives, weapon {:?}",
            self.config.source,
            self.session.lives,
            self.weapon.kind()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &dyn ActionSource) {
        if self.session.game_over {
            if input.pressed(Action::Restart) {
                self.restart(ctx);
            }
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };

        let now = ctx.time.elapsed;
        let dt = ctx.time.dt;

        player.steer(input, dt);
        player.try_jump(input);
        let report = ctx.step_physics(&mut player.body);
        ctx.scene.set_volume(player.id, player.volume());

        if report.out_of_bounds {
            self.reset_level(ctx, FELL_MESSAGE);
            return;
        }
        if report.landing.is_some_and(|l| Some(l.platform) == self.goal) {
            self.complete_level(ctx);
            return;
        }

        if input.pressed(Action::Attack) {
            if let Some(player) = self.player.as_ref() {
                let attack = self.weapon.attack(now, player, &self.mobs);
                self.apply_attack(ctx, attack);
            }
        }
        self.update_projectiles(ctx);

        let Some(player) = self.player.as_ref() else {
            return;
        };
        let target = player.position();
        let body = player.volume();

        let mut caught = false;
        for mob in &mut self.mobs {
            if mob.chase(target, now, dt) {
                ctx.scene.set_volume(mob.id, mob.volume());
            }
            caught |= mob.volume().intersects(&body);
        }
        if caught {
            self.reset_level(ctx, CAUGHT_MESSAGE);
        }
    }

    fn status(&self) -> GameStatus {
        self.session.status()
    }
}

impl LevelReset for ObbyCourse {
    fn reset_level(&mut self, ctx: &mut EngineContext, reason: &str) {
        match self.session.lose_life() {
            LifeLost::GameOver => {
                log::info!("game over ({reason}), score {}", self.session.score);
                ctx.emit_event(GameEvent::new(GameEvent::LIVES, 0.0, 0.0, 0.0));
                ctx.emit_event(GameEvent::new(GameEvent::GAME_OVER, self.session.score as f32, 0.0, 0.0));
                ctx.show_message(GAME_OVER_MESSAGE, None);
            }
            LifeLost::Retry { lives } => {
                log::info!("level {} reset: {reason} ({lives} lives left)", self.session.level);
                ctx.emit_event(GameEvent::new(GameEvent::LIVES, lives as f32, 0.0, 0.0));
                ctx.show_message(reason, Some(MESSAGE_SECONDS));
                self.rebuild(ctx);
            }
        }
    }
}
