// puzzle/source.rs
//
// Level supply: a built-in first level with no network dependency, a
// remote fetch for everything after it. Every decision (the level-0
// special case, URL construction, response validation) lives here; the
// bridge only executes the HTTP round-trip it is told to.

use glam::Vec2;

use super::definition::{PuzzleDefinition, StackSpec};
use super::PuzzleError;

/// How to obtain the puzzle for a level.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPlan {
    /// Resolved immediately from the embedded puzzle.
    Builtin(PuzzleDefinition),
    /// One GET against `url`; feed the exchange back through [`PuzzleSource::decode`].
    Remote { url: String },
}

/// Supplies one validated puzzle per level request.
#[derive(Debug, Clone)]
pub struct PuzzleSource {
    endpoint: String,
}

impl PuzzleSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Level 0 is always playable offline; later levels go to the server.
    /// The wire protocol numbers levels from 1.
    pub fn plan(&self, level_index: u32) -> FetchPlan {
        if level_index == 0 {
            FetchPlan::Builtin(builtin_level())
        } else {
            FetchPlan::Remote {
                url: format!("{}?level={}", self.endpoint, level_index + 1),
            }
        }
    }

    /// Validate a completed HTTP exchange into a puzzle.
    /// No retry happens here: a failure surfaces as a retryable state and
    /// retry is a user-initiated action.
    pub fn decode(
        &self,
        level_index: u32,
        status: u16,
        body: &str,
    ) -> Result<PuzzleDefinition, PuzzleError> {
        if !(200..300).contains(&status) {
            return Err(PuzzleError::FetchFailed {
                status,
                message: server_message(body),
            });
        }
        PuzzleDefinition::from_json(level_index, body)
    }
}

/// Best-effort extraction of a `message` field from an error body.
fn server_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

/// The embedded first level.
pub fn builtin_level() -> PuzzleDefinition {
    let col = |fragments: &[&str], initial_index: usize, x: f32| StackSpec {
        fragments: fragments.iter().map(|s| s.to_string()).collect(),
        initial_index,
        pos: Vec2::new(x, 480.0),
    };
    PuzzleDefinition {
        level: 0,
        word: "অৰুণোদয়".to_string(),
        stacks: vec![
            col(&["অ"], 0, 160.0),
            col(&["মা", "ৰু"], 0, 280.0),
            col(&["খী", "বু", "ণো", "ও"], 3, 400.0),
            col(&["দ", "হা"], 1, 520.0),
            col(&["য়"], 0, 640.0),
        ],
        solution: vec![0, 1, 2, 0, 0],
    }
}
