mod body;
mod look;

pub use body::{CharacterBody, LocomotionBody, MotionState};
pub use look::CameraLook;
