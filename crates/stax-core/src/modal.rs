//! Modal navigation stack.
//!
//! The core never builds popup visuals: it pushes and pops abstract
//! descriptors and the host renders whatever is on top.

use serde::Serialize;

/// Descriptor of one dialog, with its payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalKind {
    Pause,
    Win { stars: u32, elapsed_seconds: u32 },
    Loss { lives_left: u32 },
    GameOver { total_stars: u32, level: u32 },
    LevelUnavailable { level: u32, reason: String },
}

impl ModalKind {
    /// Compact code carried on the modal-pushed UI event.
    pub fn code(&self) -> u32 {
        match self {
            ModalKind::Pause => 1,
            ModalKind::Win { .. } => 2,
            ModalKind::Loss { .. } => 3,
            ModalKind::GameOver { .. } => 4,
            ModalKind::LevelUnavailable { .. } => 5,
        }
    }
}

/// Stack of modal descriptors; the host renders the top entry.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<ModalKind>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, modal: ModalKind) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<ModalKind> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&ModalKind> {
        self.stack.last()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Serialize the whole stack, bottom to top, for the host.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.stack).unwrap_or_else(|_| "[]".to_string())
    }
}
