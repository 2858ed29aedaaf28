use bytemuck::{Pod, Zeroable};

/// A sound trigger emitted by the game logic.
/// The code maps to a host-defined sound in the browser audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// A control button was accepted.
    Click,
    /// A dragged stack crossed into a new discrete row.
    RowCrossed,
    Win,
    Loss,
    GameOver,
}

impl SoundEvent {
    /// Wire code for the flat sound buffer read by the host.
    pub const fn code(self) -> u8 {
        match self {
            SoundEvent::Click => 1,
            SoundEvent::RowCrossed => 2,
            SoundEvent::Win => 3,
            SoundEvent::Loss => 4,
            SoundEvent::GameOver => 5,
        }
    }
}

/// A HUD/display event communicated from the core to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct UiEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl UiEvent {
    pub const FLOATS: usize = 4;

    pub const KIND_TIMER: f32 = 1.0;
    pub const KIND_LIVES: f32 = 2.0;
    pub const KIND_LEVEL: f32 = 3.0;
    pub const KIND_STARS: f32 = 4.0;
    pub const KIND_STAR_REVEAL: f32 = 5.0;
    pub const KIND_MODAL_PUSHED: f32 = 6.0;
    pub const KIND_MODAL_POPPED: f32 = 7.0;
    pub const KIND_MUTED: f32 = 8.0;

    /// Timer display update. `a` = seconds left, `b` = 1 when urgent.
    pub fn timer(seconds_left: u32, urgent: bool) -> Self {
        Self {
            kind: Self::KIND_TIMER,
            a: seconds_left as f32,
            b: if urgent { 1.0 } else { 0.0 },
            c: 0.0,
        }
    }

    /// Life count update. `a` = remaining, `b` = maximum.
    pub fn lives(remaining: u32, max: u32) -> Self {
        Self {
            kind: Self::KIND_LIVES,
            a: remaining as f32,
            b: max as f32,
            c: 0.0,
        }
    }

    /// Current level display (zero-based index in `a`).
    pub fn level(index: u32) -> Self {
        Self {
            kind: Self::KIND_LEVEL,
            a: index as f32,
            b: 0.0,
            c: 0.0,
        }
    }

    /// Session star total update.
    pub fn stars(total: u32) -> Self {
        Self {
            kind: Self::KIND_STARS,
            a: total as f32,
            b: 0.0,
            c: 0.0,
        }
    }

    /// One star of the win dialog finished its staggered reveal.
    pub fn star_reveal(ordinal: u32) -> Self {
        Self {
            kind: Self::KIND_STAR_REVEAL,
            a: ordinal as f32,
            b: 0.0,
            c: 0.0,
        }
    }

    /// A modal descriptor was pushed; `a` = modal kind code.
    /// The host reads the full descriptor from the modal JSON accessor.
    pub fn modal_pushed(kind_code: u32) -> Self {
        Self {
            kind: Self::KIND_MODAL_PUSHED,
            a: kind_code as f32,
            b: 0.0,
            c: 0.0,
        }
    }

    /// The top modal descriptor was popped.
    pub fn modal_popped() -> Self {
        Self {
            kind: Self::KIND_MODAL_POPPED,
            a: 0.0,
            b: 0.0,
            c: 0.0,
        }
    }

    /// Mute flag changed. `a` = 1 when muted.
    pub fn muted(on: bool) -> Self {
        Self {
            kind: Self::KIND_MUTED,
            a: if on { 1.0 } else { 0.0 },
            b: 0.0,
            c: 0.0,
        }
    }
}
