pub mod definition;
pub mod source;

use std::fmt;

/// Why a level could not be produced. Both variants surface identically to
/// the player as a retryable "level unavailable" state; the distinction
/// exists for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The network exchange failed: non-2xx status, or no response at all
    /// (status 0).
    FetchFailed {
        status: u16,
        message: Option<String>,
    },
    /// The response parsed but does not describe a playable puzzle.
    Malformed { detail: String },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::FetchFailed { status, message } => {
                write!(f, "puzzle fetch failed (status {})", status)?;
                if let Some(msg) = message {
                    write!(f, ": {}", msg)?;
                }
                Ok(())
            }
            PuzzleError::Malformed { detail } => {
                write!(f, "malformed puzzle: {}", detail)
            }
        }
    }
}

impl std::error::Error for PuzzleError {}
