use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct InputButtons: u16 {
        const CROUCH = 1 << 0;
    }
}

/// One tick's worth of already-debounced input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputState {
    /// X: right/left, Y: forward/backward.
    pub move_vector: Vec2,
    /// Device delta for this tick; Y up.
    pub look_delta: Vec2,
    pub buttons: InputButtons,
}

impl InputState {
    pub fn new(move_vector: Vec2, look_delta: Vec2, crouch_held: bool) -> Self {
        let mut state = Self {
            move_vector,
            look_delta,
            buttons: InputButtons::empty(),
        };
        state.set_crouch_held(crouch_held);
        state
    }

    pub fn crouch_held(&self) -> bool {
        self.buttons.contains(InputButtons::CROUCH)
    }

    pub fn set_crouch_held(&mut self, held: bool) {
        self.buttons.set(InputButtons::CROUCH, held);
    }
}
