// bridge/frame.rs
//
// Flat per-frame buffers the host reads over the WASM boundary.
// Stack layout (fragment texts, columns) changes only at level load and
// travels as JSON; these buffers carry what changes every frame.

use crate::api::types::{SoundEvent, UiEvent};
use crate::stacks::StackRuntime;

/// Floats per stack in the position buffer: x, y.
pub const POSITION_FLOATS: usize = 2;

/// Per-frame data packed for pointer-based reads from JS.
#[derive(Debug, Default)]
pub struct FrameBuffers {
    positions: Vec<f32>,
    sounds: Vec<u8>,
    events: Vec<f32>,
}

impl FrameBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repack all three buffers from the frame's outputs.
    pub fn rebuild(&mut self, stacks: &[StackRuntime], sounds: &[SoundEvent], events: &[UiEvent]) {
        self.positions.clear();
        for stack in stacks {
            self.positions.push(stack.pos.x);
            self.positions.push(stack.pos.y);
        }

        self.sounds.clear();
        self.sounds.extend(sounds.iter().map(|s| s.code()));

        self.events.clear();
        for ev in events {
            self.events.extend_from_slice(&[ev.kind, ev.a, ev.b, ev.c]);
        }
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }

    pub fn stack_count(&self) -> u32 {
        (self.positions.len() / POSITION_FLOATS) as u32
    }

    pub fn sounds_ptr(&self) -> *const u8 {
        self.sounds.as_ptr()
    }

    pub fn sound_count(&self) -> u32 {
        self.sounds.len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr()
    }

    pub fn event_count(&self) -> u32 {
        (self.events.len() / UiEvent::FLOATS) as u32
    }
}
