use wasm_bindgen::prelude::*;
use obby_engine::*;

pub mod game;
pub mod levels;
pub mod mob;
pub mod player;
pub mod projectile;
pub mod session;
pub mod weapon;

pub use game::{CourseConfig, LevelSource, ObbyCourse};

obby_web::export_game!(ObbyCourse, "obby-course");

/// Restart with course settings from JSON (seed, level source, weapon,
/// lives, movement tuning). Rejected JSON leaves the running game alone.
#[wasm_bindgen]
pub fn course_load_config(json: &str) {
    match CourseConfig::from_json(json) {
        Ok(config) => {
            log::info!("course config loaded: {:?}", config);
            with_runner(|r| r.replace_game(ObbyCourse::with_config(config)));
        }
        Err(e) => log::warn!("course config rejected: {}", e),
    }
}
