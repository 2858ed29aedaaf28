// game.rs
//
// The progression controller: owns the level lifecycle state machine and
// is the sole mutator of session and round state. Everything visual or
// audible leaves through position buffers, sound/UI events and modal
// descriptors; everything inbound arrives as input events or a delivered
// fetch result.

use glam::Vec2;
use serde::Serialize;

use crate::anim::{AnimationState, SettleAnim};
use crate::api::config::GameConfig;
use crate::api::types::{SoundEvent, UiEvent};
use crate::input::queue::{ControlAction, InputEvent, InputQueue};
use crate::modal::{ModalKind, ModalStack};
use crate::puzzle::definition::PuzzleDefinition;
use crate::puzzle::source::{FetchPlan, PuzzleSource};
use crate::puzzle::PuzzleError;
use crate::round::lives::{register_loss, LossOutcome};
use crate::round::score::star_rating;
use crate::round::session::{ProgressSession, RoundState};
use crate::round::timer::TimerTick;
use crate::round::win::evaluate;
use crate::stacks::drag::DragSnap;
use crate::stacks::StackRuntime;
use crate::view::Viewport;

/// Level lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Home screen; no level materialized.
    Idle,
    /// Waiting for the puzzle of `level`. Stale deliveries are dropped.
    Loading { level: u32 },
    Playing,
    Won,
    /// Timeout with lives remaining; retry re-enters the same level.
    Lost,
    /// The level could not be produced; retry re-invokes the load.
    LevelUnavailable { level: u32 },
    /// Lives exhausted. Terminal until restart.
    GameOver,
}

/// A remote load the bridge must execute.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub level: u32,
    pub url: String,
}

/// The materialized level: stacks, solution and per-stack drag state.
struct LevelState {
    word: String,
    stacks: Vec<StackRuntime>,
    solution: Vec<usize>,
    drags: Vec<DragSnap>,
    /// Stack currently grabbed by the (single) pointer.
    active_drag: Option<usize>,
}

pub struct StaxGame {
    config: GameConfig,
    source: PuzzleSource,
    session: ProgressSession,
    round: RoundState,
    phase: GamePhase,
    level: Option<LevelState>,
    anims: AnimationState,
    modals: ModalStack,
    viewport: Viewport,
    pending_fetch: Option<FetchRequest>,
    layout_json: String,
    sounds: Vec<SoundEvent>,
    ui_events: Vec<UiEvent>,
}

impl StaxGame {
    pub fn new(config: GameConfig) -> Self {
        let source = PuzzleSource::new(config.endpoint.clone());
        let session = ProgressSession::new(config.max_lives);
        Self {
            config,
            source,
            session,
            round: RoundState::default(),
            phase: GamePhase::Idle,
            level: None,
            anims: AnimationState::new(),
            modals: ModalStack::new(),
            viewport: Viewport::identity(),
            pending_fetch: None,
            layout_json: String::new(),
            sounds: Vec::new(),
            ui_events: Vec::new(),
        }
    }

    // ---- Host-facing accessors ----

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &ProgressSession {
        &self.session
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn stacks(&self) -> &[StackRuntime] {
        self.level.as_ref().map(|l| l.stacks.as_slice()).unwrap_or(&[])
    }

    pub fn word(&self) -> Option<&str> {
        self.level.as_ref().map(|l| l.word.as_str())
    }

    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }

    /// Layout snapshot of the current level, refreshed on every load.
    pub fn layout_json(&self) -> &str {
        &self.layout_json
    }

    pub fn sounds(&self) -> &[SoundEvent] {
        &self.sounds
    }

    pub fn ui_events(&self) -> &[UiEvent] {
        &self.ui_events
    }

    /// Refit the world into a resized host window.
    pub fn set_viewport(&mut self, screen_w: f32, screen_h: f32) {
        self.viewport = Viewport::fit(
            screen_w,
            screen_h,
            self.config.world_width,
            self.config.world_height,
        );
    }

    /// The remote load the bridge should start, if one is pending.
    pub fn take_fetch_request(&mut self) -> Option<FetchRequest> {
        self.pending_fetch.take()
    }

    // ---- Frame driving ----

    /// Drop last frame's sounds and UI events. The bridge calls this once
    /// per display frame, before input handling and logic steps.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.ui_events.clear();
    }

    /// Convenience driver for simple hosts and tests: one frame, one step.
    pub fn tick(&mut self, dt: f32, input: &mut InputQueue) {
        self.clear_frame_data();
        for event in input.drain() {
            self.handle_event(event);
        }
        self.advance(dt);
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Control { action } => self.handle_control(action),
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            // Release anywhere ends the drag, including outside the stack
            InputEvent::PointerUp { .. } => self.release_active_drag(),
        }
    }

    /// Advance timers and animation tasks by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if matches!(self.phase, GamePhase::Playing) {
            // Star clock is wall-clock: pause does not stop it
            self.round.elapsed += dt;
            let urgent_at = self.config.urgent_threshold;
            match self.round.timer.tick(dt, self.round.is_paused) {
                TimerTick::Ticked(left) => {
                    self.emit_ui(UiEvent::timer(left, left <= urgent_at));
                }
                TimerTick::Expired => {
                    self.emit_ui(UiEvent::timer(0, true));
                    self.on_time_expired();
                }
                TimerTick::Idle => {}
            }
        }

        let landed = match self.level.as_mut() {
            Some(level) => self.anims.tick_settles(dt, &mut level.stacks),
            None => Vec::new(),
        };
        let mut won = false;
        for (stack, index) in landed {
            if let Some(level) = self.level.as_mut() {
                if let Some(runtime) = level.stacks.get_mut(stack) {
                    runtime.selected_index = index;
                }
                // Gate on the timer so a settle landing after a loss can
                // never turn into a win
                if matches!(self.phase, GamePhase::Playing)
                    && self.round.timer.running()
                    && evaluate(&level.stacks, &level.solution)
                {
                    won = true;
                }
            }
        }
        if won {
            self.do_win();
        }

        let revealed = self.anims.tick_star_reveals(dt);
        for ordinal in revealed {
            self.emit_ui(UiEvent::star_reveal(ordinal));
        }
    }

    // ---- Level lifecycle ----

    /// Begin loading `level`. Supersedes any load already in flight: a
    /// result delivered for an earlier level is dropped by the staleness
    /// guard in [`Self::deliver_fetch`].
    pub fn load_level(&mut self, level: u32) {
        self.session.level_index = level;
        self.level = None;
        self.anims.clear();
        self.modals.clear();
        self.pending_fetch = None;
        self.layout_json.clear();
        self.round.timer.stop();
        self.phase = GamePhase::Loading { level };
        match self.source.plan(level) {
            FetchPlan::Builtin(def) => self.apply_definition(def),
            FetchPlan::Remote { url } => {
                log::info!("level {}: fetching {}", level, url);
                self.pending_fetch = Some(FetchRequest { level, url });
            }
        }
    }

    /// Feed a completed HTTP exchange back into the load that requested it.
    pub fn deliver_fetch(&mut self, level: u32, status: u16, body: &str) {
        if !self.loading_level_is(level) {
            log::warn!("dropping stale fetch result for level {}", level);
            return;
        }
        match self.source.decode(level, status, body) {
            Ok(def) => self.apply_definition(def),
            Err(err) => self.fail_level(level, err),
        }
    }

    /// The fetch produced no response at all (network error).
    pub fn deliver_fetch_error(&mut self, level: u32, message: &str) {
        if !self.loading_level_is(level) {
            log::warn!("dropping stale fetch error for level {}", level);
            return;
        }
        self.fail_level(
            level,
            PuzzleError::FetchFailed {
                status: 0,
                message: Some(message.to_string()),
            },
        );
    }

    fn loading_level_is(&self, level: u32) -> bool {
        matches!(self.phase, GamePhase::Loading { level: l } if l == level)
    }

    fn apply_definition(&mut self, def: PuzzleDefinition) {
        let level = def.level;
        let row_height = self.config.row_height;
        let stacks: Vec<StackRuntime> = def
            .stacks
            .iter()
            .map(|spec| StackRuntime::from_spec(spec, row_height))
            .collect();
        self.layout_json = layout_json(&def, row_height);
        self.level = Some(LevelState {
            drags: vec![DragSnap::new(); stacks.len()],
            active_drag: None,
            word: def.word,
            solution: def.solution,
            stacks,
        });
        self.round.reset(self.config.round_seconds);
        self.phase = GamePhase::Playing;
        self.emit_ui(UiEvent::level(level));
        self.emit_ui(UiEvent::lives(self.session.lives, self.config.max_lives));
        self.emit_ui(UiEvent::timer(self.config.round_seconds, false));
        self.emit_ui(UiEvent::stars(self.session.total_stars));
        log::info!("level {} loaded", level);
    }

    fn fail_level(&mut self, level: u32, err: PuzzleError) {
        log::warn!("level {} unavailable: {}", level, err);
        self.phase = GamePhase::LevelUnavailable { level };
        self.push_modal(ModalKind::LevelUnavailable {
            level,
            reason: err.to_string(),
        });
    }

    // ---- Session operations ----

    pub fn start_session(&mut self) {
        self.session.reset(self.config.max_lives);
        log::info!("session started");
        self.load_level(0);
    }

    pub fn advance_level(&mut self) {
        let next = self.session.level_index + 1;
        self.load_level(next);
    }

    /// Abandon the current level and return home. Unlike game-over, this
    /// keeps lives and stars as they stand.
    pub fn end_session(&mut self) {
        self.level = None;
        self.anims.clear();
        self.modals.clear();
        self.pending_fetch = None;
        self.layout_json.clear();
        self.round.timer.stop();
        self.round.is_paused = false;
        self.phase = GamePhase::Idle;
        log::info!("session ended with {} stars", self.session.total_stars);
    }

    // ---- Input handling ----

    fn handle_control(&mut self, action: ControlAction) {
        match action {
            ControlAction::StartSession => {
                if matches!(self.phase, GamePhase::Idle) {
                    self.emit_sound(SoundEvent::Click);
                    self.start_session();
                }
            }
            ControlAction::TogglePause => {
                if matches!(self.phase, GamePhase::Playing) {
                    self.emit_sound(SoundEvent::Click);
                    self.toggle_pause();
                }
            }
            ControlAction::RetryLevel => {
                if matches!(
                    self.phase,
                    GamePhase::Lost | GamePhase::LevelUnavailable { .. }
                ) {
                    self.emit_sound(SoundEvent::Click);
                    self.load_level(self.session.level_index);
                }
            }
            ControlAction::NextLevel => {
                if matches!(self.phase, GamePhase::Won) {
                    self.emit_sound(SoundEvent::Click);
                    self.advance_level();
                }
            }
            ControlAction::EndSession => {
                if !matches!(self.phase, GamePhase::Idle) {
                    self.emit_sound(SoundEvent::Click);
                    self.end_session();
                }
            }
            ControlAction::RestartSession => {
                if matches!(self.phase, GamePhase::GameOver) {
                    self.emit_sound(SoundEvent::Click);
                    self.start_session();
                }
            }
            ControlAction::ToggleMute => {
                self.session.muted = !self.session.muted;
                self.emit_ui(UiEvent::muted(self.session.muted));
            }
        }
    }

    fn toggle_pause(&mut self) {
        if self.round.is_paused {
            self.round.is_paused = false;
            if matches!(self.modals.top(), Some(ModalKind::Pause)) {
                self.pop_modal();
            }
        } else {
            // No drag survives the freeze
            self.release_active_drag();
            self.round.is_paused = true;
            self.push_modal(ModalKind::Pause);
        }
    }

    fn pointer_down(&mut self, client: Vec2) {
        if !matches!(self.phase, GamePhase::Playing) {
            return;
        }
        let world = self.viewport.to_world(client);
        let row_height = self.config.row_height;
        let column_width = self.config.column_width;
        let paused = self.round.is_paused;
        let running = self.round.timer.running();

        let mut grabbed = None;
        if let Some(level) = self.level.as_mut() {
            for i in 0..level.stacks.len() {
                if level.stacks[i].hit_test(world, row_height, column_width)
                    && level.drags[i].try_grab(
                        world.y,
                        &level.stacks[i],
                        row_height,
                        paused,
                        running,
                    )
                {
                    level.active_drag = Some(i);
                    grabbed = Some(i);
                    break;
                }
            }
        }
        if let Some(stack) = grabbed {
            // A re-grabbed stack stops settling; the drag takes over
            self.anims.cancel_settle(stack);
        }
    }

    fn pointer_move(&mut self, client: Vec2) {
        let world = self.viewport.to_world(client);
        let row_height = self.config.row_height;
        let mut crossed = false;
        if let Some(level) = self.level.as_mut() {
            if let Some(i) = level.active_drag {
                crossed = level.drags[i].drag(world.y, &mut level.stacks[i], row_height);
            }
        }
        if crossed {
            self.emit_sound(SoundEvent::RowCrossed);
        }
    }

    /// End any active grab, handing the stack to a settle animation.
    fn release_active_drag(&mut self) {
        let row_height = self.config.row_height;
        let mut settle = None;
        if let Some(level) = self.level.as_mut() {
            if let Some(i) = level.active_drag.take() {
                if let Some(target) = level.drags[i].release(&level.stacks[i], row_height) {
                    settle = Some((i, level.stacks[i].pos.y, target));
                }
            }
        }
        if let Some((stack, from_y, target)) = settle {
            self.anims.add_settle(SettleAnim::new(
                stack,
                from_y,
                target.to_y,
                target.index,
                self.config.settle_duration,
            ));
        }
    }

    // ---- Win / loss ----

    fn do_win(&mut self) {
        self.round.timer.stop();
        self.phase = GamePhase::Won;
        let elapsed_seconds = self.round.elapsed.round() as u32;
        let stars = star_rating(elapsed_seconds);
        self.session.total_stars += stars;
        self.emit_sound(SoundEvent::Win);
        self.emit_ui(UiEvent::stars(self.session.total_stars));
        self.push_modal(ModalKind::Win {
            stars,
            elapsed_seconds,
        });
        self.anims.add_star_reveals(stars, self.config.star_stagger);
        log::info!(
            "level {} won: {} stars in {}s",
            self.session.level_index,
            stars,
            elapsed_seconds
        );
    }

    fn on_time_expired(&mut self) {
        self.release_active_drag();
        // Win takes precedence: a board that is already solved when the
        // clock runs out is a win, not a timeout
        let solved = self
            .level
            .as_ref()
            .map_or(false, |l| evaluate(&l.stacks, &l.solution));
        if solved {
            self.do_win();
            return;
        }
        match register_loss(&mut self.session) {
            LossOutcome::Retryable { lives_left } => {
                self.phase = GamePhase::Lost;
                self.emit_sound(SoundEvent::Loss);
                self.emit_ui(UiEvent::lives(lives_left, self.config.max_lives));
                self.push_modal(ModalKind::Loss { lives_left });
                log::info!(
                    "level {} lost to the clock, {} lives left",
                    self.session.level_index,
                    lives_left
                );
            }
            LossOutcome::GameOver => {
                self.phase = GamePhase::GameOver;
                self.emit_sound(SoundEvent::GameOver);
                self.emit_ui(UiEvent::lives(0, self.config.max_lives));
                self.push_modal(ModalKind::GameOver {
                    total_stars: self.session.total_stars,
                    level: self.session.level_index,
                });
                log::info!("game over at level {}", self.session.level_index);
            }
        }
    }

    // ---- Output ----

    fn emit_sound(&mut self, sound: SoundEvent) {
        if !self.session.muted {
            self.sounds.push(sound);
        }
    }

    fn emit_ui(&mut self, event: UiEvent) {
        self.ui_events.push(event);
    }

    fn push_modal(&mut self, modal: ModalKind) {
        self.emit_ui(UiEvent::modal_pushed(modal.code()));
        self.modals.push(modal);
    }

    fn pop_modal(&mut self) {
        if self.modals.pop().is_some() {
            self.emit_ui(UiEvent::modal_popped());
        }
    }
}

#[derive(Serialize)]
struct LayoutStack<'a> {
    letters: &'a [String],
    x: f32,
    rest_y: f32,
    selected_index: usize,
}

#[derive(Serialize)]
struct LevelLayout<'a> {
    level: u32,
    word: &'a str,
    row_height: f32,
    stacks: Vec<LayoutStack<'a>>,
}

/// One-shot layout snapshot for the host's visual build of a level.
fn layout_json(def: &PuzzleDefinition, row_height: f32) -> String {
    let layout = LevelLayout {
        level: def.level,
        word: &def.word,
        row_height,
        stacks: def
            .stacks
            .iter()
            .map(|spec| LayoutStack {
                letters: &spec.fragments,
                x: spec.pos.x,
                rest_y: spec.pos.y,
                selected_index: spec.initial_index,
            })
            .collect(),
    };
    serde_json::to_string(&layout).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::queue::InputQueue;

    fn game() -> StaxGame {
        StaxGame::new(GameConfig::default())
    }

    fn control(g: &mut StaxGame, action: ControlAction) {
        g.handle_event(InputEvent::Control { action });
    }

    fn run_seconds(g: &mut StaxGame, seconds: u32) {
        let mut q = InputQueue::new();
        for _ in 0..seconds {
            g.tick(1.0, &mut q);
        }
    }

    /// Drive the current round to expiry.
    fn time_out(g: &mut StaxGame) {
        let seconds = g.config().round_seconds;
        run_seconds(g, seconds + 1);
    }

    // Six columns mirroring the production first level's shape: fixed
    // single letters around two sliding stacks. Everything starts on its
    // solution row.
    const SOLVED_AT_LOAD: &str = r#"{
        "word": "অৰবুজ্ঞাতম",
        "stacks": [
            { "letters": ["অ"], "selected_index": 0, "x": 100, "y": 480 },
            { "letters": ["ৰ"], "selected_index": 0, "x": 220, "y": 480 },
            { "letters": ["প্ৰা", "খী", "বু", "ও"], "selected_index": 2, "x": 340, "y": 480 },
            { "letters": ["ণ্য", "জ্ঞা", "হা"], "selected_index": 1, "x": 460, "y": 480 },
            { "letters": ["ত"], "selected_index": 0, "x": 580, "y": 480 },
            { "letters": ["ম"], "selected_index": 0, "x": 700, "y": 480 }
        ],
        "correct_position": [0, 0, 2, 1, 0, 0]
    }"#;

    // Same board, one stack off its solution row.
    const ONE_OFF: &str = r#"{
        "word": "অৰবুজ্ঞাতম",
        "stacks": [
            { "letters": ["অ"], "selected_index": 0, "x": 100, "y": 480 },
            { "letters": ["ৰ"], "selected_index": 0, "x": 220, "y": 480 },
            { "letters": ["প্ৰা", "খী", "বু", "ও"], "selected_index": 0, "x": 340, "y": 480 },
            { "letters": ["ণ্য", "জ্ঞা", "হা"], "selected_index": 1, "x": 460, "y": 480 },
            { "letters": ["ত"], "selected_index": 0, "x": 580, "y": 480 },
            { "letters": ["ম"], "selected_index": 0, "x": 700, "y": 480 }
        ],
        "correct_position": [0, 0, 2, 1, 0, 0]
    }"#;

    fn load_remote(g: &mut StaxGame, level: u32, body: &str) {
        g.load_level(level);
        let req = g.take_fetch_request().expect("remote level should fetch");
        assert_eq!(req.level, level);
        g.deliver_fetch(level, 200, body);
    }

    #[test]
    fn start_session_plays_the_builtin_level_offline() {
        let mut g = game();
        control(&mut g, ControlAction::StartSession);
        assert_eq!(g.phase(), GamePhase::Playing);
        assert!(g.take_fetch_request().is_none());
        assert_eq!(g.session().lives, 3);
        assert_eq!(g.session().total_stars, 0);
        assert!(!g.stacks().is_empty());
        assert!(g.layout_json().contains("row_height"));
        assert_eq!(g.word(), Some("অৰুণোদয়"));
    }

    #[test]
    fn remote_levels_fetch_with_one_based_numbering() {
        let mut g = game();
        g.load_level(1);
        assert_eq!(g.phase(), GamePhase::Loading { level: 1 });
        let req = g.take_fetch_request().unwrap();
        assert_eq!(req.url, "/api/puzzle?level=2");
        g.deliver_fetch(1, 200, SOLVED_AT_LOAD);
        assert_eq!(g.phase(), GamePhase::Playing);
        assert_eq!(g.stacks().len(), 6);
    }

    #[test]
    fn superseded_load_result_is_dropped() {
        let mut g = game();
        g.load_level(2);
        let _stale = g.take_fetch_request().unwrap();
        g.load_level(3);
        let req = g.take_fetch_request().unwrap();
        assert_eq!(req.level, 3);

        // The level-2 response arrives late: ignored
        g.deliver_fetch(2, 200, SOLVED_AT_LOAD);
        assert_eq!(g.phase(), GamePhase::Loading { level: 3 });
        assert!(g.stacks().is_empty());

        // The level-3 response lands normally
        g.deliver_fetch(3, 200, ONE_OFF);
        assert_eq!(g.phase(), GamePhase::Playing);
    }

    #[test]
    fn failed_fetch_is_retryable_and_leaves_the_session_alone() {
        let mut g = game();
        control(&mut g, ControlAction::StartSession);
        g.load_level(1);
        g.take_fetch_request().unwrap();
        g.deliver_fetch(1, 503, r#"{ "message": "down" }"#);

        assert_eq!(g.phase(), GamePhase::LevelUnavailable { level: 1 });
        assert_eq!(g.session().lives, 3);
        assert_eq!(g.session().total_stars, 0);
        assert!(matches!(
            g.modals().top(),
            Some(ModalKind::LevelUnavailable { level: 1, .. })
        ));

        // Retry re-invokes the same load
        control(&mut g, ControlAction::RetryLevel);
        assert_eq!(g.phase(), GamePhase::Loading { level: 1 });
        let req = g.take_fetch_request().unwrap();
        assert_eq!(req.url, "/api/puzzle?level=2");
        g.deliver_fetch(1, 200, ONE_OFF);
        assert_eq!(g.phase(), GamePhase::Playing);
    }

    #[test]
    fn network_error_surfaces_like_a_bad_status() {
        let mut g = game();
        g.load_level(1);
        g.take_fetch_request().unwrap();
        g.deliver_fetch_error(1, "connection refused");
        assert_eq!(g.phase(), GamePhase::LevelUnavailable { level: 1 });
    }

    #[test]
    fn malformed_body_surfaces_like_a_bad_status() {
        let mut g = game();
        g.load_level(1);
        g.take_fetch_request().unwrap();
        g.deliver_fetch(1, 200, r#"{ "word": "no stacks here" }"#);
        assert_eq!(g.phase(), GamePhase::LevelUnavailable { level: 1 });
    }

    #[test]
    fn press_and_release_on_a_correct_board_wins_immediately() {
        let mut g = game();
        control(&mut g, ControlAction::StartSession);
        load_remote(&mut g, 1, SOLVED_AT_LOAD);

        // Stack 2 rests with row 2 selected: its container sits at
        // 480 - 2*120 = 240. Press it and let go without moving.
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 340.0, y: 400.0 });
        q.push(InputEvent::PointerUp { x: 340.0, y: 400.0 });
        g.tick(0.0, &mut q);
        assert_eq!(g.phase(), GamePhase::Playing, "settle still in flight");

        g.tick(0.5, &mut q);
        assert_eq!(g.phase(), GamePhase::Won);
        assert_eq!(g.session().total_stars, 3);
        assert!(matches!(g.modals().top(), Some(ModalKind::Win { stars: 3, .. })));
    }

    #[test]
    fn dragging_the_off_stack_into_place_wins() {
        let mut g = game();
        load_remote(&mut g, 1, ONE_OFF);

        // Stack 2 rests at 480 (row 0); solution wants row 2, which is
        // 240 units further up.
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 340.0, y: 600.0 });
        q.push(InputEvent::PointerMove { x: 340.0, y: 600.0 - 230.0 });
        q.push(InputEvent::PointerUp { x: 340.0, y: 370.0 });
        g.tick(0.0, &mut q);
        // One move event means one crossing signal, even across two rows
        assert_eq!(
            g.sounds()
                .iter()
                .filter(|s| **s == SoundEvent::RowCrossed)
                .count(),
            1
        );
        g.tick(0.5, &mut q);
        assert_eq!(g.phase(), GamePhase::Won);
        assert_eq!(g.stacks()[2].selected_index, 2);
        assert_eq!(g.stacks()[2].pos.y, 240.0);
    }

    #[test]
    fn fixed_letter_stacks_ignore_presses() {
        let mut g = game();
        load_remote(&mut g, 1, ONE_OFF);
        let mut q = InputQueue::new();
        // Stack 0 is a single fixed letter at x=100
        q.push(InputEvent::PointerDown { x: 100.0, y: 480.0 });
        q.push(InputEvent::PointerMove { x: 100.0, y: 100.0 });
        q.push(InputEvent::PointerUp { x: 100.0, y: 100.0 });
        g.tick(0.0, &mut q);
        g.tick(0.5, &mut q);
        assert_eq!(g.stacks()[0].selected_index, 0);
        assert_eq!(g.stacks()[0].pos.y, 480.0);
    }

    #[test]
    fn timeout_spends_a_life_and_retry_reloads_the_level() {
        let mut g = game();
        control(&mut g, ControlAction::StartSession);
        time_out(&mut g);

        assert_eq!(g.phase(), GamePhase::Lost);
        assert_eq!(g.session().lives, 2);
        assert!(matches!(
            g.modals().top(),
            Some(ModalKind::Loss { lives_left: 2 })
        ));

        control(&mut g, ControlAction::RetryLevel);
        assert_eq!(g.phase(), GamePhase::Playing);
        assert_eq!(g.session().level_index, 0);
        assert_eq!(g.round().timer.time_left(), g.config().round_seconds);
    }

    #[test]
    fn three_timeouts_end_the_session() {
        let mut g = game();
        control(&mut g, ControlAction::StartSession);
        for _ in 0..2 {
            time_out(&mut g);
            assert_eq!(g.phase(), GamePhase::Lost);
            control(&mut g, ControlAction::RetryLevel);
        }
        time_out(&mut g);
        assert_eq!(g.phase(), GamePhase::GameOver);
        assert_eq!(g.session().lives, 0);
        assert!(matches!(g.modals().top(), Some(ModalKind::GameOver { .. })));

        // Terminal: more time changes nothing
        run_seconds(&mut g, 10);
        assert_eq!(g.phase(), GamePhase::GameOver);
        assert_eq!(g.session().lives, 0);

        // Only restart leaves it, with a full reset
        control(&mut g, ControlAction::RestartSession);
        assert_eq!(g.phase(), GamePhase::Playing);
        assert_eq!(g.session().lives, 3);
        assert_eq!(g.session().total_stars, 0);
        assert_eq!(g.session().level_index, 0);
    }

    #[test]
    fn win_takes_precedence_over_expiry() {
        let mut g = game();
        control(&mut g, ControlAction::StartSession);
        load_remote(&mut g, 1, SOLVED_AT_LOAD);
        time_out(&mut g);
        assert_eq!(g.phase(), GamePhase::Won);
        assert_eq!(g.session().lives, 3, "no life spent on a solved board");
        // Slow solve: the full round elapsed
        assert_eq!(g.session().total_stars, 1);
    }

    #[test]
    fn star_tiers_follow_the_solve_time() {
        // 25 seconds before solving: middle tier
        let mut g = game();
        load_remote(&mut g, 1, SOLVED_AT_LOAD);
        run_seconds(&mut g, 25);
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 340.0, y: 400.0 });
        q.push(InputEvent::PointerUp { x: 340.0, y: 400.0 });
        g.tick(0.0, &mut q);
        g.tick(0.5, &mut q);
        assert_eq!(g.phase(), GamePhase::Won);
        assert!(matches!(g.modals().top(), Some(ModalKind::Win { stars: 2, .. })));
    }

    #[test]
    fn pause_freezes_the_clock_and_blocks_drags() {
        let mut g = game();
        control(&mut g, ControlAction::StartSession);
        run_seconds(&mut g, 3);
        let left_before = g.round().timer.time_left();

        control(&mut g, ControlAction::TogglePause);
        assert!(g.round().is_paused);
        assert!(matches!(g.modals().top(), Some(ModalKind::Pause)));
        run_seconds(&mut g, 5);
        assert_eq!(g.round().timer.time_left(), left_before);

        // Presses are rejected while frozen: builtin stack 1 slides
        // normally, but not now
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 280.0, y: 480.0 });
        q.push(InputEvent::PointerMove { x: 280.0, y: 200.0 });
        q.push(InputEvent::PointerUp { x: 280.0, y: 200.0 });
        g.tick(0.0, &mut q);
        g.tick(0.5, &mut q);
        assert_eq!(g.stacks()[1].pos.y, 480.0);

        control(&mut g, ControlAction::TogglePause);
        assert!(!g.round().is_paused);
        assert!(g.modals().is_empty());
        run_seconds(&mut g, 1);
        assert_eq!(g.round().timer.time_left(), left_before - 1);
    }

    #[test]
    fn end_session_returns_home_keeping_stars() {
        let mut g = game();
        control(&mut g, ControlAction::StartSession);
        load_remote(&mut g, 1, SOLVED_AT_LOAD);
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 340.0, y: 400.0 });
        q.push(InputEvent::PointerUp { x: 340.0, y: 400.0 });
        g.tick(0.0, &mut q);
        g.tick(0.5, &mut q);
        assert_eq!(g.session().total_stars, 3);

        control(&mut g, ControlAction::EndSession);
        assert_eq!(g.phase(), GamePhase::Idle);
        assert!(g.stacks().is_empty());
        assert!(g.modals().is_empty());
        assert_eq!(g.session().total_stars, 3, "explicit end keeps progress");
    }

    #[test]
    fn mute_suppresses_sounds_but_not_ui_events() {
        let mut g = game();
        control(&mut g, ControlAction::StartSession);
        control(&mut g, ControlAction::ToggleMute);
        assert!(g.session().muted);

        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 280.0, y: 480.0 });
        q.push(InputEvent::PointerMove { x: 280.0, y: 350.0 });
        g.tick(0.0, &mut q);
        assert!(g.sounds().is_empty());

        // The timer still reports through UI events
        g.tick(1.0, &mut q);
        assert!(g
            .ui_events()
            .iter()
            .any(|e| e.kind == UiEvent::KIND_TIMER));
    }

    #[test]
    fn load_emits_a_full_hud_refresh() {
        let mut g = game();
        g.clear_frame_data();
        control(&mut g, ControlAction::StartSession);
        let kinds: Vec<f32> = g.ui_events().iter().map(|e| e.kind).collect();
        for expected in [
            UiEvent::KIND_LEVEL,
            UiEvent::KIND_LIVES,
            UiEvent::KIND_TIMER,
            UiEvent::KIND_STARS,
        ] {
            assert!(kinds.contains(&expected), "missing kind {}", expected);
        }
    }

    #[test]
    fn star_reveals_trickle_out_after_a_win() {
        let mut g = game();
        load_remote(&mut g, 1, SOLVED_AT_LOAD);
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 340.0, y: 400.0 });
        q.push(InputEvent::PointerUp { x: 340.0, y: 400.0 });
        g.tick(0.0, &mut q);

        let mut revealed = Vec::new();
        for _ in 0..40 {
            g.tick(0.1, &mut q);
            revealed.extend(
                g.ui_events()
                    .iter()
                    .filter(|e| e.kind == UiEvent::KIND_STAR_REVEAL)
                    .map(|e| e.a as u32),
            );
        }
        assert_eq!(g.phase(), GamePhase::Won);
        assert_eq!(revealed, vec![1, 2, 3]);
    }

    #[test]
    fn pointer_input_respects_the_view_scale() {
        let mut g = game();
        load_remote(&mut g, 1, ONE_OFF);
        // Half-scale window: world 800x1200 in a 400x600 screen
        g.set_viewport(400.0, 600.0);

        // Stack 2's column center (world 340, 600) is client (170, 300)
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 170.0, y: 300.0 });
        q.push(InputEvent::PointerMove { x: 170.0, y: 300.0 - 115.0 });
        q.push(InputEvent::PointerUp { x: 170.0, y: 185.0 });
        g.tick(0.0, &mut q);
        g.tick(0.5, &mut q);
        // 115 client units = 230 world units: snaps to row 2
        assert_eq!(g.stacks()[2].selected_index, 2);
    }
}
