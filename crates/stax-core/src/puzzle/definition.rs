use glam::Vec2;
use serde::Deserialize;

use super::PuzzleError;

/// Raw response shape. Required fields are optional here so their absence
/// can be reported as a malformed puzzle instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PuzzleWire {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub stacks: Option<Vec<StackWire>>,
    #[serde(default)]
    pub correct_position: Option<Vec<i64>>,
    /// Server-supplied explanation on error bodies.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StackWire {
    pub letters: Vec<String>,
    #[serde(default)]
    pub selected_index: i64,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

/// One fragment column as described by the puzzle data.
#[derive(Debug, Clone, PartialEq)]
pub struct StackSpec {
    /// Letter fragments, top to bottom. Never empty.
    pub fragments: Vec<String>,
    /// Starting row selection, `0..=fragments.len()`.
    pub initial_index: usize,
    /// Rest position of the column (center x, rest y).
    pub pos: Vec2,
}

/// A validated, immutable puzzle for one level.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleDefinition {
    pub level: u32,
    /// The word being spelled, for display.
    pub word: String,
    pub stacks: Vec<StackSpec>,
    /// One target row index per stack, same length and order as `stacks`.
    pub solution: Vec<usize>,
}

impl PuzzleDefinition {
    /// Parse and validate a puzzle response body.
    pub fn from_json(level: u32, json: &str) -> Result<Self, PuzzleError> {
        let wire: PuzzleWire = serde_json::from_str(json).map_err(|e| PuzzleError::Malformed {
            detail: e.to_string(),
        })?;
        Self::from_wire(level, wire)
    }

    pub(crate) fn from_wire(level: u32, wire: PuzzleWire) -> Result<Self, PuzzleError> {
        let malformed = |base: &str, message: &Option<String>| PuzzleError::Malformed {
            detail: match message {
                Some(msg) => format!("{} ({})", base, msg),
                None => base.to_string(),
            },
        };

        let stacks_wire = wire
            .stacks
            .ok_or_else(|| malformed("missing stacks", &wire.message))?;
        let solution_wire = wire
            .correct_position
            .ok_or_else(|| malformed("missing correct_position", &wire.message))?;

        if stacks_wire.is_empty() {
            return Err(malformed("puzzle has no stacks", &wire.message));
        }
        if solution_wire.len() != stacks_wire.len() {
            return Err(PuzzleError::Malformed {
                detail: format!(
                    "solution length {} does not match stack count {}",
                    solution_wire.len(),
                    stacks_wire.len()
                ),
            });
        }

        let mut stacks = Vec::with_capacity(stacks_wire.len());
        for (i, stack) in stacks_wire.into_iter().enumerate() {
            if stack.letters.is_empty() {
                return Err(PuzzleError::Malformed {
                    detail: format!("stack {} has no fragments", i),
                });
            }
            let initial_index = in_selection_range(stack.selected_index, stack.letters.len())
                .ok_or_else(|| PuzzleError::Malformed {
                    detail: format!(
                        "stack {} selected_index {} out of range 0..={}",
                        i,
                        stack.selected_index,
                        stack.letters.len()
                    ),
                })?;
            stacks.push(StackSpec {
                fragments: stack.letters,
                initial_index,
                pos: Vec2::new(stack.x, stack.y),
            });
        }

        let mut solution = Vec::with_capacity(solution_wire.len());
        for (i, &target) in solution_wire.iter().enumerate() {
            let target = in_selection_range(target, stacks[i].fragments.len()).ok_or_else(|| {
                PuzzleError::Malformed {
                    detail: format!(
                        "solution[{}] = {} out of range 0..={}",
                        i,
                        target,
                        stacks[i].fragments.len()
                    ),
                }
            })?;
            solution.push(target);
        }

        Ok(Self {
            level,
            word: wire.word.unwrap_or_default(),
            stacks,
            solution,
        })
    }
}

/// Selection indices may equal the fragment count: the empty slot above
/// the topmost fragment is a legal resting position.
fn in_selection_range(value: i64, fragment_count: usize) -> Option<usize> {
    if value >= 0 && (value as usize) <= fragment_count {
        Some(value as usize)
    } else {
        None
    }
}
