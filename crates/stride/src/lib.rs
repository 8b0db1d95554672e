pub mod character;
pub mod config;
pub mod crouch;
pub mod event;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod physics;
pub mod speed;

pub use character::{Character, TickReport};
pub use config::{ConfigError, LocomotionConfig};
pub use crouch::{CrouchController, CrouchPhase, CrouchState};
pub use event::{CrouchEvents, CrouchSignal, SubscriptionId};
pub use geometry::{CapsuleCollider, HeadOffset};
pub use input::{InputBinding, InputButtons, InputSource, InputState};
pub use motion::{CameraLook, CharacterBody, LocomotionBody, MotionState};
pub use physics::{PhysicsWorld, RapierBody};
pub use speed::{OverrideId, SpeedOverrideStack, SpeedProvider};
