//! Player weapons.
//!
//! Weapons only decide what an attack did; the game applies the outcome
//! (despawning mobs, scoring, HUD text, spawning visuals).

use glam::Vec3;
use serde::Deserialize;
use obby_engine::EntityId;

use crate::mob::Mob;
use crate::player::Player;

pub const SWORD_RANGE: f32 = 2.0;
pub const SWORD_POINTS: u32 = 15;
pub const LASER_POINTS: u32 = 10;
pub const ORB_POINTS: u32 = 50;

/// Heights above the player's feet that the laser samples.
pub const LASER_HEIGHTS: [f32; 4] = [0.8, 1.6, 2.4, 3.2];
const LASER_RANGE: f32 = 100.0;
/// Length of the drawn beam.
pub const BEAM_LENGTH: f32 = 20.0;
/// Seconds a beam stays visible.
pub const BEAM_LIFETIME: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Sword,
    #[default]
    Laser,
    Orb,
}

impl WeaponKind {
    /// Seconds between attacks.
    pub fn cooldown(self) -> f32 {
        match self {
            WeaponKind::Sword => 0.4,
            WeaponKind::Laser => 0.25,
            WeaponKind::Orb => 0.8,
        }
    }
}

/// Result of pulling the trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Attack {
    /// Still cooling down; nothing happened.
    CoolingDown,
    /// Laser with no mob to aim at.
    NoTarget,
    /// Every mob listed is dead.
    Slash { killed: Vec<EntityId> },
    /// Beam drawn from `from` to `to`; `hit` is dead.
    Beam { hit: Option<EntityId>, from: Vec3, to: Vec3 },
    /// Launch an orb from `origin` toward `target`.
    Launch { origin: Vec3, target: Vec3 },
}

#[derive(Debug, Clone)]
pub struct Weapon {
    kind: WeaponKind,
    last_used: Option<f64>,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            last_used: None,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn ready(&self, now: f64) -> bool {
        match self.last_used {
            Some(t) => now - t >= f64::from(self.kind.cooldown()),
            None => true,
        }
    }

    pub fn attack(&mut self, now: f64, player: &Player, mobs: &[Mob]) -> Attack {
        if !self.ready(now) {
            return Attack::CoolingDown;
        }
        self.last_used = Some(now);

        match self.kind {
            WeaponKind::Sword => slash(player, mobs),
            WeaponKind::Laser => fire_laser(player, mobs),
            WeaponKind::Orb => launch_orb(player, mobs),
        }
    }
}

fn slash(player: &Player, mobs: &[Mob]) -> Attack {
    let killed = mobs
        .iter()
        .filter(|m| m.position.distance(player.position()) <= SWORD_RANGE)
        .map(|m| m.id)
        .collect();
    Attack::Slash { killed }
}

/// Horizontal distance from `from` to the mob's position.
fn flat_distance(from: Vec3, mob: &Mob) -> f32 {
    let mut d = mob.position - from;
    d.y = 0.0;
    d.length()
}

fn nearest_mob<'a>(from: Vec3, mobs: &'a [Mob]) -> Option<&'a Mob> {
    mobs.iter()
        .min_by(|a, b| flat_distance(from, a).total_cmp(&flat_distance(from, b)))
}

fn fire_laser(player: &Player, mobs: &[Mob]) -> Attack {
    let base = player.position();
    let Some(target) = nearest_mob(base, mobs) else {
        return Attack::NoTarget;
    };

    let mut aim = target.position - base;
    aim.y = 0.0;
    let dir = aim.try_normalize().unwrap_or(Vec3::NEG_Z);
    let feet = player.feet_y();

    let mut hit = None;
    for h in LASER_HEIGHTS {
        let origin = Vec3::new(base.x, feet + h, base.z);
        hit = mobs
            .iter()
            .filter_map(|m| m.volume().ray_hit(origin, dir, LASER_RANGE).map(|t| (t, m.id)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id);
        if hit.is_some() {
            break;
        }
    }

    let from = Vec3::new(base.x, feet + 1.6, base.z);
    Attack::Beam {
        hit,
        from,
        to: from + dir * BEAM_LENGTH,
    }
}

fn launch_orb(player: &Player, mobs: &[Mob]) -> Attack {
    let origin = player.chest();
    let target = nearest_mob(player.position(), mobs)
        .map(|m| m.center())
        .unwrap_or(origin + Vec3::NEG_Z);
    Attack::Launch { origin, target }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mob::MobParams;

    fn player_at(pos: Vec3) -> Player {
        Player::new(EntityId(1), pos)
    }

    fn mob(id: u32, pos: Vec3) -> Mob {
        Mob::new(EntityId(id), pos, MobParams::default(), 0.0)
    }

    #[test]
    fn cooldown_gates_attacks() {
        let mut sword = Weapon::new(WeaponKind::Sword);
        let p = player_at(Vec3::ZERO);
        assert!(matches!(sword.attack(0.0, &p, &[]), Attack::Slash { .. }));
        assert_eq!(sword.attack(0.3, &p, &[]), Attack::CoolingDown);
        assert!(matches!(sword.attack(0.45, &p, &[]), Attack::Slash { .. }));
    }

    #[test]
    fn sword_kills_everything_in_range() {
        let mut sword = Weapon::new(WeaponKind::Sword);
        let p = player_at(Vec3::ZERO);
        let mobs = [
            mob(2, Vec3::new(1.5, 0.0, 0.0)),
            mob(3, Vec3::new(0.0, 0.0, -2.0)),
            mob(4, Vec3::new(3.0, 0.0, 0.0)),
        ];
        assert_eq!(
            sword.attack(0.0, &p, &mobs),
            Attack::Slash { killed: vec![EntityId(2), EntityId(3)] }
        );
    }

    #[test]
    fn laser_without_mobs_has_no_target() {
        let mut laser = Weapon::new(WeaponKind::Laser);
        assert_eq!(laser.attack(0.0, &player_at(Vec3::ZERO), &[]), Attack::NoTarget);
    }

    #[test]
    fn laser_hits_nearest_mob_first() {
        let mut laser = Weapon::new(WeaponKind::Laser);
        let p = player_at(Vec3::new(0.0, 0.65, 0.0));
        let mobs = [mob(2, Vec3::new(0.0, 0.0, -12.0)), mob(3, Vec3::new(0.0, 0.0, -6.0))];

        let Attack::Beam { hit, from, to } = laser.attack(0.0, &p, &mobs) else {
            panic!("laser did not fire");
        };
        assert_eq!(hit, Some(EntityId(3)));
        assert!((from.y - 1.6).abs() < 1e-5);
        assert!((to.z + BEAM_LENGTH).abs() < 1e-4);
    }

    #[test]
    fn laser_misses_mob_far_above() {
        let mut laser = Weapon::new(WeaponKind::Laser);
        let p = player_at(Vec3::new(0.0, 0.65, 0.0));
        let mobs = [mob(2, Vec3::new(5.0, 10.0, 0.0))];
        assert!(matches!(laser.attack(0.0, &p, &mobs), Attack::Beam { hit: None, .. }));
    }

    #[test]
    fn orb_aims_at_nearest_mob_or_forward() {
        let mut orb = Weapon::new(WeaponKind::Orb);
        let p = player_at(Vec3::ZERO);

        let Attack::Launch { origin, target } = orb.attack(0.0, &p, &[]) else {
            panic!("orb did not launch");
        };
        assert_eq!(target - origin, Vec3::NEG_Z);

        let mobs = [mob(2, Vec3::new(4.0, 0.0, 0.0))];
        let Attack::Launch { target, .. } = orb.attack(1.0, &p, &mobs) else {
            panic!("orb did not launch");
        };
        assert_eq!(target, mobs[0].center());
    }
}
