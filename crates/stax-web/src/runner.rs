use stax_core::{
    FetchRequest, FixedTimestep, FrameBuffers, GameConfig, InputEvent, InputQueue, StaxGame,
};

/// Wires the puzzle core to the browser loop: input queue in, fixed
/// timestep steps through the game, flat frame buffers out.
pub struct GameRunner {
    game: StaxGame,
    input: InputQueue,
    timestep: FixedTimestep,
    frame: FrameBuffers,
}

impl GameRunner {
    pub fn new(config: GameConfig) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt);
        Self {
            game: StaxGame::new(config),
            input: InputQueue::new(),
            timestep,
            frame: FrameBuffers::new(),
        }
    }

    /// Push an input event into the queue (called from JS).
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Refit the world after a window resize.
    pub fn resize(&mut self, screen_w: f32, screen_h: f32) {
        self.game.set_viewport(screen_w, screen_h);
    }

    /// Run one display frame: handle input once, step game logic at the
    /// fixed rate, repack the frame buffers.
    pub fn tick(&mut self, dt: f32) {
        self.game.clear_frame_data();
        for event in self.input.drain() {
            self.game.handle_event(event);
        }
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.advance(self.timestep.dt());
        }
        self.frame
            .rebuild(self.game.stacks(), self.game.sounds(), self.game.ui_events());
    }

    // ---- Fetch handoff ----

    pub fn take_fetch(&mut self) -> Option<FetchRequest> {
        self.game.take_fetch_request()
    }

    pub fn deliver_fetch(&mut self, level: u32, status: u16, body: &str) {
        self.game.deliver_fetch(level, status, body);
    }

    pub fn deliver_fetch_error(&mut self, level: u32, message: &str) {
        self.game.deliver_fetch_error(level, message);
    }

    // ---- Data accessors for JS reads ----

    pub fn positions_ptr(&self) -> *const f32 {
        self.frame.positions_ptr()
    }

    pub fn stack_count(&self) -> u32 {
        self.frame.stack_count()
    }

    pub fn sounds_ptr(&self) -> *const u8 {
        self.frame.sounds_ptr()
    }

    pub fn sound_count(&self) -> u32 {
        self.frame.sound_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.frame.events_ptr()
    }

    pub fn event_count(&self) -> u32 {
        self.frame.event_count()
    }

    pub fn layout_json(&self) -> String {
        self.game.layout_json().to_string()
    }

    pub fn modal_json(&self) -> String {
        self.game.modals().to_json()
    }

    pub fn world_width(&self) -> f32 {
        self.game.config().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.game.config().world_height
    }
}
