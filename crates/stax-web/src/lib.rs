pub mod fetch;
pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use stax_core::{ControlAction, GameConfig, InputEvent};

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Construct the game. `endpoint` overrides the default puzzle URL.
#[wasm_bindgen]
pub fn game_init(endpoint: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = GameConfig::default();
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(GameRunner::new(config));
    });
    log::info!("stax: initialized");
}

/// Advance one display frame. Also dispatches any remote level load the
/// core requested this frame; the result re-enters through the runner,
/// where stale deliveries are dropped.
#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));

    if let Some(req) = with_runner(|r| r.take_fetch()) {
        spawn_local(async move {
            match fetch::fetch_level(&req.url).await {
                Ok((status, body)) => {
                    with_runner(|r| r.deliver_fetch(req.level, status, &body));
                }
                Err(message) => {
                    with_runner(|r| r.deliver_fetch_error(req.level, &message));
                }
            }
        });
    }
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

/// UI control press (start, pause, retry, ...). Unknown codes are logged
/// and dropped.
#[wasm_bindgen]
pub fn game_control(code: u32) {
    match ControlAction::from_code(code) {
        Some(action) => with_runner(|r| r.push_input(InputEvent::Control { action })),
        None => log::warn!("unknown control code {}", code),
    }
}

#[wasm_bindgen]
pub fn game_resize(screen_w: f32, screen_h: f32) {
    with_runner(|r| r.resize(screen_w, screen_h));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_stack_positions_ptr() -> *const f32 {
    with_runner(|r| r.positions_ptr())
}

#[wasm_bindgen]
pub fn get_stack_count() -> u32 {
    with_runner(|r| r.stack_count())
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(|r| r.sounds_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_count())
}

#[wasm_bindgen]
pub fn get_ui_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_ui_events_len() -> u32 {
    with_runner(|r| r.event_count())
}

/// JSON snapshot of the current level's layout (fragments, columns, word).
/// Refreshed at every successful load.
#[wasm_bindgen]
pub fn get_layout_json() -> String {
    with_runner(|r| r.layout_json())
}

/// JSON of the modal descriptor stack, bottom to top.
#[wasm_bindgen]
pub fn get_modal_json() -> String {
    with_runner(|r| r.modal_json())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}
