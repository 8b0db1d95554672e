use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrouchPhase {
    #[default]
    Standing,
    Crouched,
}

impl CrouchPhase {
    pub fn is_crouched(self) -> bool {
        matches!(self, Self::Crouched)
    }
}

/// Persistent crouch bookkeeping. The `default_*` fields are captured from
/// the rig the first time it is seen and never overwritten afterward. Only
/// the crouch controller mutates it, keeping `phase` in step with the speed
/// override stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrouchState {
    pub(super) phase: CrouchPhase,
    pub(super) current_head_y: f32,
    pub(super) target_head_y: f32,
    pub(super) current_collider_height: f32,
    pub(super) target_collider_height: f32,
    default_head_y: Option<f32>,
    default_collider_height: Option<f32>,
}

impl CrouchState {
    pub fn phase(&self) -> CrouchPhase {
        self.phase
    }

    pub fn current_head_y(&self) -> f32 {
        self.current_head_y
    }

    pub fn target_head_y(&self) -> f32 {
        self.target_head_y
    }

    pub fn current_collider_height(&self) -> f32 {
        self.current_collider_height
    }

    pub fn target_collider_height(&self) -> f32 {
        self.target_collider_height
    }

    pub fn default_head_y(&self) -> Option<f32> {
        self.default_head_y
    }

    pub fn default_collider_height(&self) -> Option<f32> {
        self.default_collider_height
    }

    /// Returns true if this call performed the capture.
    pub fn capture_head_y(&mut self, y: f32) -> bool {
        if self.default_head_y.is_some() {
            return false;
        }
        self.default_head_y = Some(y);
        self.current_head_y = y;
        self.target_head_y = y;
        true
    }

    /// Returns true if this call performed the capture.
    pub fn capture_collider_height(&mut self, height: f32) -> bool {
        if self.default_collider_height.is_some() {
            return false;
        }
        self.default_collider_height = Some(height);
        self.current_collider_height = height;
        self.target_collider_height = height;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_captured_once() {
        let mut state = CrouchState::default();
        assert!(state.default_head_y().is_none());

        assert!(state.capture_head_y(1.6));
        assert!(!state.capture_head_y(0.4));
        assert_eq!(state.default_head_y(), Some(1.6));

        assert!(state.capture_collider_height(2.0));
        assert!(!state.capture_collider_height(1.0));
        assert_eq!(state.default_collider_height(), Some(2.0));
        assert_eq!(state.target_collider_height(), 2.0);
        assert_eq!(state.phase(), CrouchPhase::Standing);
    }
}
