mod controller;
mod state;

pub use controller::{CROUCHED_HEIGHT_FACTOR, CrouchController};
pub use state::{CrouchPhase, CrouchState};
