//! Random courses that get longer and harder with the level number.

use glam::Vec3;
use obby_engine::{Axis, Rng};

use super::{LevelPlan, MobSpawn, Movement, PlatformSpec};
use crate::mob::MobParams;

pub const SPAWN: Vec3 = Vec3::new(0.0, 2.0, 0.0);
pub const START_PAD: f32 = 6.0;
pub const GOAL_SIZE: f32 = 5.0;
/// Peak speed of a moving platform, units/s.
const PEAK_SPEED: f32 = 1.2;
/// Smallest footprint edge a course platform shrinks to.
pub const MIN_SIZE: f32 = 1.0;

/// Number of course platforms between the start pad and the goal.
pub fn platform_count(level: u32) -> usize {
    15 + 3 * level as usize
}

/// Generate the course for 1-based `level`.
pub fn generate(level: u32, rng: &mut Rng) -> LevelPlan {
    let d = level as f32;
    let count = platform_count(level);

    let mut platforms = Vec::with_capacity(count + 2);
    let mut mobs = Vec::new();
    platforms.push(PlatformSpec::new(Vec3::ZERO, START_PAD, START_PAD));

    let mut last = Vec3::new(0.0, 2.0, 5.0);
    for i in 0..count {
        let gap = 3.0 + rng.next_f32() * (2.0 + d * 0.3);
        let climb = (rng.next_f32() - 0.3) * (3.0 + d * 0.5);
        let angle = (rng.next_f32() - 0.5) * 0.5;

        last.x += angle.sin() * gap;
        last.z += angle.cos() * gap;
        last.y += climb;

        let width = (3.0 + rng.next_f32() * 2.0 - d * 0.1).max(MIN_SIZE);
        let depth = (3.0 + rng.next_f32() * 2.0 - d * 0.1).max(MIN_SIZE);
        let mut spec = PlatformSpec::new(last, width, depth);

        if rng.chance(0.3 + d * 0.05) {
            let amplitude = 3.0 + rng.next_f32() * 2.0;
            let axis = if rng.chance(0.5) { Axis::X } else { Axis::Z };
            spec.movement = Some(Movement {
                axis,
                amplitude,
                speed: PEAK_SPEED / amplitude,
            });
        }
        platforms.push(spec);

        if i > 3 && rng.chance(0.2 + d * 0.05) {
            let speed = (0.03 + d * 0.01) * 60.0;
            mobs.push(MobSpawn::new(
                last + Vec3::Y * 0.8,
                MobParams {
                    speed,
                    ..MobParams::default()
                },
            ));
        }
    }

    let mut goal = PlatformSpec::new(last + Vec3::new(0.0, 2.0, 8.0), GOAL_SIZE, GOAL_SIZE);
    goal.goal = true;
    platforms.push(goal);

    LevelPlan {
        platforms,
        mobs,
        spawn: SPAWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_has_pad_platforms_and_goal() {
        for level in 1..=4 {
            let plan = generate(level, &mut Rng::new(11));
            assert_eq!(plan.platforms.len(), 1 + platform_count(level) + 1);

            let pad = &plan.platforms[0];
            assert_eq!(pad.position, Vec3::ZERO);
            assert_eq!((pad.width, pad.depth), (START_PAD, START_PAD));

            let goal = plan.platforms.last().unwrap();
            assert!(goal.goal);
            assert_eq!((goal.width, goal.depth), (GOAL_SIZE, GOAL_SIZE));
            assert_eq!(plan.goal_index(), Some(plan.platforms.len() - 1));
        }
    }

    #[test]
    fn same_seed_same_course() {
        let a = generate(3, &mut Rng::new(99));
        let b = generate(3, &mut Rng::new(99));
        assert_eq!(a, b);
        assert_ne!(a, generate(3, &mut Rng::new(100)));
    }

    #[test]
    fn goal_sits_beyond_last_platform() {
        let plan = generate(2, &mut Rng::new(5));
        let n = plan.platforms.len();
        let last = plan.platforms[n - 2].position;
        let goal = plan.platforms[n - 1].position;
        assert!((goal.z - last.z - 8.0).abs() < 1e-4);
        assert!((goal.y - last.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn moving_platforms_peak_at_fixed_speed() {
        let plan = generate(5, &mut Rng::new(3));
        let moving: Vec<_> = plan.platforms.iter().filter_map(|p| p.movement).collect();
        assert!(!moving.is_empty());
        for m in moving {
            assert!((3.0..5.0).contains(&m.amplitude));
            assert!((m.amplitude * m.speed - PEAK_SPEED).abs() < 1e-5);
        }
    }

    #[test]
    fn footprints_never_shrink_below_minimum() {
        for level in [1, 30, 50, 80] {
            let plan = generate(level, &mut Rng::new(level as u64));
            for p in &plan.platforms {
                assert!(p.width >= MIN_SIZE && p.depth >= MIN_SIZE, "level {level}: {p:?}");
            }
        }
    }

    #[test]
    fn mobs_stay_off_the_first_stretch() {
        let plan = generate(6, &mut Rng::new(21));
        // First mob slot is course platform 4, five gaps past z = 5
        for mob in &plan.mobs {
            assert!(mob.position.z > 12.0);
        }
    }
}
