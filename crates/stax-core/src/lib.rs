pub mod anim;
pub mod api;
pub mod bridge;
pub mod game;
pub mod input;
pub mod modal;
pub mod puzzle;
pub mod round;
pub mod stacks;
pub mod time;
pub mod view;

// Re-export key types at crate root for convenience
pub use anim::easing::{ease, lerp, Easing};
pub use anim::{AnimationState, SettleAnim};
pub use api::config::GameConfig;
pub use api::types::{SoundEvent, UiEvent};
pub use bridge::frame::FrameBuffers;
pub use game::{FetchRequest, GamePhase, StaxGame};
pub use input::queue::{ControlAction, InputEvent, InputQueue};
pub use modal::{ModalKind, ModalStack};
pub use puzzle::definition::{PuzzleDefinition, StackSpec};
pub use puzzle::source::{builtin_level, FetchPlan, PuzzleSource};
pub use puzzle::PuzzleError;
pub use round::lives::{register_loss, LossOutcome};
pub use round::score::star_rating;
pub use round::session::{ProgressSession, RoundState};
pub use round::timer::{RoundTimer, TimerTick};
pub use round::win::evaluate;
pub use stacks::drag::{DragSnap, SettleTarget};
pub use stacks::StackRuntime;
pub use time::FixedTimestep;
pub use view::Viewport;
