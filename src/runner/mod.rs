//! Side-scroller simulation
//!
//! All gameplay logic for the runner mini-game lives here:
//! - One update per animation frame (no fixed timestep)
//! - Wall-clock time only gates spawning
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{EntityKind, PlayerBody, RunnerPhase, RunnerState, SimEntity};
pub use tick::{FrameStep, RunnerEvent, TickInput, frame, tick};
