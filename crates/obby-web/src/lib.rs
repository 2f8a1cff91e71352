pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use obby_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// obby_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `obby_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_load_config(json: &str) {
            with_runner(|r| r.load_config(json));
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        /// On-screen buttons. `action` is the `Action` code (0 = Forward … 6 = Restart).
        #[wasm_bindgen]
        pub fn game_action_down(action: u32) {
            match Action::from_code(action) {
                Some(a) => with_runner(|r| r.push_input(InputEvent::ActionDown(a))),
                None => log::warn!("unknown action code {}", action),
            }
        }

        #[wasm_bindgen]
        pub fn game_action_up(action: u32) {
            match Action::from_code(action) {
                Some(a) => with_runner(|r| r.push_input(InputEvent::ActionUp(a))),
                None => log::warn!("unknown action code {}", action),
            }
        }

        #[wasm_bindgen]
        pub fn game_blur() {
            with_runner(|r| r.blur());
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_volumes_ptr() -> *const f32 {
            with_runner(|r| r.volumes_ptr())
        }

        #[wasm_bindgen]
        pub fn get_volume_count() -> u32 {
            with_runner(|r| r.volume_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn take_hud_message() -> String {
            with_runner(|r| r.take_hud_message())
        }

        #[wasm_bindgen]
        pub fn get_hud_message_duration() -> f32 {
            with_runner(|r| r.hud_message_duration())
        }

        // ---- Session accessors ----

        #[wasm_bindgen]
        pub fn get_level() -> u32 {
            with_runner(|r| r.status().level)
        }

        #[wasm_bindgen]
        pub fn get_score() -> u32 {
            with_runner(|r| r.status().score)
        }

        #[wasm_bindgen]
        pub fn get_lives() -> u32 {
            with_runner(|r| r.status().lives)
        }

        #[wasm_bindgen]
        pub fn is_game_over() -> bool {
            with_runner(|r| r.status().game_over)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_volumes() -> u32 {
            with_runner(|r| r.max_volumes())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
