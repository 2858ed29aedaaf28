/// Control actions delivered by the host UI (buttons on menus and dialogs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Begin a fresh session from the home screen.
    StartSession,
    /// Freeze/unfreeze gameplay and the round timer.
    TogglePause,
    /// Reload the current level after a loss or a failed load.
    RetryLevel,
    /// Advance to the next level after a win.
    NextLevel,
    /// Abandon the current level and return to the home screen.
    EndSession,
    /// Full session reset from the game-over screen.
    RestartSession,
    /// Toggle audio muting.
    ToggleMute,
}

impl ControlAction {
    /// Decode a host-side button code.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ControlAction::StartSession),
            2 => Some(ControlAction::TogglePause),
            3 => Some(ControlAction::RetryLevel),
            4 => Some(ControlAction::NextLevel),
            5 => Some(ControlAction::EndSession),
            6 => Some(ControlAction::RestartSession),
            7 => Some(ControlAction::ToggleMute),
            _ => None,
        }
    }
}

/// Input event types the core understands.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at client coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at client coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to client coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A UI control was pressed.
    Control { action: ControlAction },
}

/// A queue of input events.
/// The host writes events into the queue; the core reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from the host bridge).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Control {
            action: ControlAction::TogglePause,
        });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn control_codes_round_trip() {
        for code in 1..=7 {
            assert!(ControlAction::from_code(code).is_some(), "code {}", code);
        }
        assert!(ControlAction::from_code(0).is_none());
        assert!(ControlAction::from_code(99).is_none());
    }
}
