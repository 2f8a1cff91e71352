//! Hand-authored courses.
//!
//! Six staircase layouts of growing length and difficulty, assembled from
//! three helpers: [`stair_path`] lays out the steps, [`moving_every`] puts
//! every Nth step in motion and [`add_goal`] enlarges one step into the goal.

use glam::Vec3;
use obby_engine::Axis;

use super::{LevelPlan, MobSpawn, Movement, PlatformSpec};
use crate::mob::MobParams;

/// Where the player appears on every blueprint level.
pub const SPAWN: Vec3 = Vec3::new(0.0, 2.0, 10.0);

pub const LAYOUT_COUNT: usize = 6;

#[derive(Debug, Clone, Copy)]
pub struct StairParams {
    pub start: Vec3,
    pub steps: usize,
    /// Z advance per step (negative runs away from the spawn).
    pub dz: f32,
    /// Rise per step.
    pub dy: f32,
    /// Amplitude of the side-to-side weave.
    pub x_wiggle: f32,
    /// (width, depth) of a regular step.
    pub size: (f32, f32),
    /// Every Nth step (after the first) uses `thin_size`. 0 disables.
    pub thin_every: usize,
    pub thin_size: (f32, f32),
}

impl Default for StairParams {
    fn default() -> Self {
        Self {
            start: Vec3::new(0.0, 0.0, 10.0),
            steps: 10,
            dz: -4.0,
            dy: 0.35,
            x_wiggle: 1.2,
            size: (4.2, 4.2),
            thin_every: 0,
            thin_size: (2.0, 5.0),
        }
    }
}

pub fn stair_path(params: StairParams) -> Vec<PlatformSpec> {
    (0..params.steps)
        .map(|i| {
            let fi = i as f32;
            let position = Vec3::new(
                params.start.x + (fi * 0.9).sin() * params.x_wiggle,
                params.start.y + fi * params.dy,
                params.start.z + fi * params.dz,
            );
            let thin = params.thin_every > 0 && i > 0 && i % params.thin_every == 0;
            let (w, d) = if thin { params.thin_size } else { params.size };
            PlatformSpec::new(position, w, d)
        })
        .collect()
}

/// Make the step at `index` the goal, scaling its footprint by `size_boost`.
/// `None` picks the last step; indices past the end clamp to it.
pub fn add_goal(mut platforms: Vec<PlatformSpec>, index: Option<usize>, size_boost: f32) -> Vec<PlatformSpec> {
    let Some(last) = platforms.len().checked_sub(1) else {
        return platforms;
    };
    let idx = index.map_or(last, |i| i.min(last));
    let p = &mut platforms[idx];
    p.width *= size_boost;
    p.depth *= size_boost;
    p.goal = true;
    platforms
}

/// Put every `every`-th step in motion, skipping the first and last.
/// Later calls overwrite earlier movement on shared steps.
pub fn moving_every(platforms: &mut [PlatformSpec], every: usize, axis: Axis, amplitude: f32, speed: f32) {
    if every == 0 || platforms.len() < 3 {
        return;
    }
    let last = platforms.len() - 1;
    for (i, p) in platforms.iter_mut().enumerate().take(last).skip(1) {
        if i % every == 0 {
            p.movement = Some(Movement { axis, amplitude, speed });
        }
    }
}

fn layout(index: usize) -> Vec<PlatformSpec> {
    match index {
        // Long friendly staircase
        0 => add_goal(
            stair_path(StairParams {
                steps: 12,
                dz: -3.4,
                dy: 0.78,
                x_wiggle: 1.2,
                size: (5.2, 5.2),
                ..StairParams::default()
            }),
            None,
            1.25,
        ),
        // Introduces movement
        1 => {
            let mut p = stair_path(StairParams {
                steps: 14,
                dz: -3.5,
                dy: 0.30,
                x_wiggle: 1.4,
                size: (4.6, 4.6),
                ..StairParams::default()
            });
            moving_every(&mut p, 5, Axis::X, 3.0, 1.25);
            add_goal(p, None, 1.25)
        }
        // Precision
        2 => add_goal(
            stair_path(StairParams {
                steps: 16,
                dz: -3.6,
                dy: 0.34,
                x_wiggle: 2.3,
                size: (3.4, 3.8),
                thin_every: 3,
                thin_size: (2.0, 5.2),
                ..StairParams::default()
            }),
            None,
            1.25,
        ),
        // Thin and moving mix
        3 => {
            let mut p = stair_path(StairParams {
                steps: 18,
                dz: -3.7,
                dy: 0.36,
                x_wiggle: 2.8,
                size: (3.0, 3.4),
                thin_every: 2,
                thin_size: (1.9, 5.0),
                ..StairParams::default()
            });
            moving_every(&mut p, 4, Axis::X, 2.8, 1.55);
            moving_every(&mut p, 6, Axis::Z, 2.2, 1.25);
            add_goal(p, None, 1.25)
        }
        // Tall climb
        4 => {
            let mut p = stair_path(StairParams {
                steps: 20,
                dz: -3.5,
                dy: 0.45,
                x_wiggle: 2.2,
                size: (3.0, 3.0),
                thin_every: 4,
                thin_size: (2.0, 4.2),
                ..StairParams::default()
            });
            moving_every(&mut p, 5, Axis::X, 2.4, 1.6);
            moving_every(&mut p, 7, Axis::Y, 0.35, 1.8);
            add_goal(p, None, 1.25)
        }
        // Gauntlet
        _ => {
            let mut p = stair_path(StairParams {
                steps: 22,
                dz: -3.6,
                dy: 0.42,
                x_wiggle: 3.4,
                size: (2.7, 3.0),
                thin_every: 2,
                thin_size: (1.8, 4.6),
                ..StairParams::default()
            });
            moving_every(&mut p, 3, Axis::X, 2.6, 1.9);
            moving_every(&mut p, 4, Axis::Z, 2.0, 1.6);
            moving_every(&mut p, 7, Axis::Y, 0.45, 2.1);
            add_goal(p, None, 1.25)
        }
    }
}

/// (x, y, z, speed, aggro radius, chase delay)
type MobRow = (f32, f32, f32, f32, f32, f32);

const MOB_SPAWNS: [&[MobRow]; LAYOUT_COUNT] = [
    &[
        (0.0, 0.9, 2.0, 2.2, 10.0, 1.2),
        (1.0, 2.0, -8.0, 2.5, 10.0, 1.5),
    ],
    &[
        (0.0, 1.2, 1.0, 2.6, 11.0, 1.0),
        (-1.5, 2.3, -6.0, 2.9, 12.0, 1.2),
        (1.5, 3.2, -12.0, 3.1, 12.0, 1.5),
    ],
    &[
        (1.8, 1.2, 3.0, 3.0, 12.0, 0.9),
        (-1.8, 2.3, -4.0, 3.3, 13.0, 1.1),
        (0.0, 3.3, -10.0, 3.5, 13.0, 1.3),
        (0.8, 4.0, -18.0, 3.7, 14.0, 1.5),
    ],
    &[
        (0.0, 1.2, 4.0, 3.4, 13.0, 0.8),
        (2.2, 2.6, -2.0, 3.8, 14.0, 1.0),
        (-2.2, 3.8, -8.0, 4.1, 14.0, 1.2),
        (0.0, 5.0, -16.0, 4.3, 15.0, 1.4),
    ],
    &[
        (0.0, 1.2, 4.0, 3.8, 14.0, 0.7),
        (-2.0, 3.0, -2.0, 4.1, 15.0, 0.9),
        (2.0, 4.6, -10.0, 4.4, 15.0, 1.1),
        (0.0, 6.5, -18.0, 4.7, 16.0, 1.3),
        (0.0, 8.0, -26.0, 5.0, 16.0, 1.5),
    ],
    &[
        (0.0, 1.2, 4.0, 4.2, 15.0, 0.6),
        (2.6, 2.8, -1.0, 4.6, 16.0, 0.8),
        (-2.6, 4.2, -7.0, 5.0, 16.0, 1.0),
        (0.0, 5.8, -13.0, 5.3, 17.0, 1.1),
        (2.0, 7.2, -19.0, 5.6, 17.0, 1.3),
        (-2.0, 8.6, -25.0, 6.0, 18.0, 1.5),
    ],
];

/// Blueprint for a 0-based layout index. Indices wrap around the layout list.
pub fn blueprint(index: usize) -> LevelPlan {
    let idx = index % LAYOUT_COUNT;
    let mobs = MOB_SPAWNS[idx]
        .iter()
        .map(|&(x, y, z, speed, aggro, delay)| {
            MobSpawn::new(Vec3::new(x, y, z), MobParams::new(speed, aggro, delay))
        })
        .collect();

    LevelPlan {
        platforms: layout(idx),
        mobs,
        spawn: SPAWN,
    }
}
