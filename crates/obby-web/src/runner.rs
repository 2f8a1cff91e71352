use obby_engine::{
    ActionState, EngineContext, Game, GameClock, GameConfig, GameStatus, HudEvent,
    InputEvent, InputQueue, ProtocolLayout, VolumeBuffer,
};
use obby_engine::bridge::protocol::HEADER_FLOATS;
use obby_engine::systems::snapshot::build_volume_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `obby-course`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    actions: ActionState,
    volume_buffer: VolumeBuffer,
    clock: GameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    initialized: bool,
    /// Latest status text not yet picked up by the host.
    pending_message: Option<String>,
    /// Display time of the latest message; outlives `take_hud_message`.
    message_duration: f32,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let clock = GameClock::new(config.max_frame_dt);
        let layout = ProtocolLayout::from_config(&config);
        let volume_buffer = VolumeBuffer::with_capacity(config.max_volumes);

        Self {
            game,
            ctx: EngineContext::with_config(config.clone()),
            input: InputQueue::new(),
            actions: ActionState::default(),
            volume_buffer,
            clock,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            initialized: false,
            pending_message: None,
            message_duration: 0.0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.ctx.time = self.clock.now();
        self.game.init(&mut self.ctx);
        self.collect_hud();
        self.publish();
        self.initialized = true;
    }

    /// Replace the engine config from host-supplied JSON.
    /// Invalid JSON or tunables are logged and the current config is kept.
    pub fn load_config(&mut self, json: &str) {
        match GameConfig::from_json(json) {
            Ok(config) => {
                self.clock.set_max_dt(config.max_frame_dt);
                self.layout = ProtocolLayout::from_config(&config);
                self.volume_buffer = VolumeBuffer::with_capacity(config.max_volumes);
                self.ctx.config = config.clone();
                self.config = config;
                log::info!("config loaded");
            }
            Err(e) => log::warn!("config rejected, keeping current: {}", e),
        }
    }

    /// Swap in a new game with a fresh scene. The clock and engine config
    /// carry over; the new game is initialized if the old one was.
    pub fn replace_game(&mut self, game: G) {
        self.game = game;
        self.ctx = EngineContext::with_config(self.config.clone());
        self.actions.release_all();
        self.pending_message = None;
        self.message_duration = 0.0;
        if self.initialized {
            self.init();
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: sample input, update game, flush deferred
    /// cleanup, rebuild the volume buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.ctx.time = self.clock.advance(dt);
        let events = self.input.drain();
        self.actions.sample(&events);

        self.game.update(&mut self.ctx, &self.actions);
        self.ctx.flush_cleanup();

        self.collect_hud();
        self.publish();
    }

    /// Release all held input (window blur).
    pub fn blur(&mut self) {
        self.input.push(InputEvent::FocusLost);
    }

    fn collect_hud(&mut self) {
        for event in &self.ctx.hud {
            if let HudEvent::Message { text, duration } = event {
                self.pending_message = Some(text.clone());
                self.message_duration = duration.unwrap_or(0.0);
            }
        }
    }

    fn publish(&mut self) {
        build_volume_buffer(self.ctx.scene.iter(), &mut self.volume_buffer);
        self.layout.write_header(
            &mut self.header,
            self.ctx.time.frame,
            self.volume_buffer.instances.len(),
            self.ctx.events.len(),
            self.game.status(),
            self.ctx.time.elapsed,
        );
    }

    // ---- HUD ----

    /// Take the latest status message; empty when there is none.
    pub fn take_hud_message(&mut self) -> String {
        self.pending_message.take().unwrap_or_default()
    }

    /// Display time of the latest message in seconds; 0 means "until replaced".
    /// Readable before or after the text is taken.
    pub fn hud_message_duration(&self) -> f32 {
        self.message_duration
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    // ---- Pointer accessors for linear-memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn volumes_ptr(&self) -> *const f32 {
        self.volume_buffer.instances_ptr()
    }

    pub fn volume_count(&self) -> u32 {
        self.volume_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_volumes(&self) -> u32 {
        self.layout.max_volumes as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use obby_engine::input::actions::keys;
    use obby_engine::{
        Action, ActionSource, BoxShape, Entity, EntityId, EntityKind, Hud, Kinematics, Platform,
        SceneHost,
    };

    /// One body dropped onto one floor.
    struct Dropper {
        body: Kinematics,
        player: EntityId,
        jumps: u32,
    }

    impl Dropper {
        fn new() -> Self {
            Self {
                body: Kinematics::new(Vec3::new(0.0, 3.0, 0.0), BoxShape::feet(0.5, 2.0, 0.5)),
                player: EntityId(0),
                jumps: 0,
            }
        }
    }

    impl Game for Dropper {
        fn init(&mut self, ctx: &mut EngineContext) {
            let floor = ctx.next_id();
            ctx.spawn_platform(Platform::new(floor, Vec3::new(0.0, -0.25, 0.0), Vec3::new(10.0, 0.5, 10.0)));
            self.player = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(self.player)
                    .with_kind(EntityKind::Player)
                    .with_volume(self.body.volume()),
            );
            ctx.show_message("Go!", None);
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &dyn ActionSource) {
            if input.held(Action::Jump) && self.body.can_jump {
                self.body.vertical_velocity = 12.0;
                self.body.can_jump = false;
                self.jumps += 1;
                ctx.show_message("Jump!", Some(1.5));
            }
            ctx.step_physics(&mut self.body);
            ctx.scene.set_volume(self.player, self.body.volume());
        }

        fn status(&self) -> GameStatus {
            GameStatus {
                level: 1,
                score: 0,
                lives: 3,
                game_over: false,
            }
        }
    }

    fn started() -> GameRunner<Dropper> {
        let mut runner = GameRunner::new(Dropper::new());
        runner.init();
        runner
    }

    fn settle(runner: &mut GameRunner<Dropper>) {
        for _ in 0..120 {
            runner.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut runner = GameRunner::new(Dropper::new());
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.context().time.frame, 0);
        assert_eq!(runner.volume_count(), 0);
    }

    #[test]
    fn init_publishes_volumes_and_message() {
        let mut runner = started();
        assert_eq!(runner.volume_count(), 2);
        assert_eq!(runner.take_hud_message(), "Go!");
        assert_eq!(runner.take_hud_message(), "");
    }

    #[test]
    fn body_settles_on_floor() {
        let mut runner = started();
        settle(&mut runner);
        let player = runner.game.player;
        let bottom = runner.context().scene.get(player).unwrap().volume.bottom();
        assert!((bottom - 0.01).abs() < 1e-4, "bottom = {bottom}");
        assert!(runner.game.body.grounded);
    }

    #[test]
    fn held_key_jumps_and_blur_releases() {
        let mut runner = started();
        settle(&mut runner);

        runner.push_input(InputEvent::KeyDown { key_code: keys::SPACE });
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game.jumps, 1);

        runner.blur();
        settle(&mut runner);
        assert_eq!(runner.game.jumps, 1);
    }

    #[test]
    fn rejected_config_keeps_previous() {
        let mut runner = started();
        runner.load_config(r#"{ "max_volumes": 0 }"#);
        assert_eq!(runner.max_volumes(), 512);

        runner.load_config(r#"{ "max_volumes": 64, "max_frame_dt": 0.05 }"#);
        assert_eq!(runner.max_volumes(), 64);
        assert_eq!(runner.config().max_frame_dt, 0.05);
    }

    #[test]
    fn replaced_game_starts_fresh() {
        let mut runner = started();
        settle(&mut runner);
        let frame = runner.context().time.frame;

        runner.replace_game(Dropper::new());
        assert_eq!(runner.volume_count(), 2);
        assert_eq!(runner.context().time.frame, frame);
        assert!(!runner.game.body.grounded);
        assert_eq!(runner.take_hud_message(), "Go!");
    }

    #[test]
    fn header_tracks_status() {
        let runner = started();
        assert_eq!(runner.header[obby_engine::bridge::protocol::HEADER_LIVES], 3.0);
        assert_eq!(runner.header[obby_engine::bridge::protocol::HEADER_VOLUME_COUNT], 2.0);
    }

    #[test]
    fn message_duration_survives_take() {
        let mut runner = started();
        settle(&mut runner);
        runner.push_input(InputEvent::KeyDown { key_code: keys::SPACE });
        runner.tick(1.0 / 60.0);

        assert_eq!(runner.take_hud_message(), "Jump!");
        assert_eq!(runner.hud_message_duration(), 1.5);
        assert_eq!(runner.take_hud_message(), "");
        assert_eq!(runner.hud_message_duration(), 1.5);
    }

    #[test]
    fn replacing_game_resets_message_duration() {
        let mut runner = started();
        settle(&mut runner);
        runner.push_input(InputEvent::KeyDown { key_code: keys::SPACE });
        runner.tick(1.0 / 60.0);

        runner.replace_game(Dropper::new());
        assert_eq!(runner.hud_message_duration(), 0.0);
        assert_eq!(runner.take_hud_message(), "Go!");
    }
}
