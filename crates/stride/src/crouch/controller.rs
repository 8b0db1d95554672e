use std::cell::Cell;
use std::rc::Rc;

use crate::config::LocomotionConfig;
use crate::event::{CrouchEvents, CrouchSignal};
use crate::geometry::{CapsuleCollider, HeadOffset};
use crate::speed::{OverrideId, SpeedOverrideStack};

use super::{CrouchPhase, CrouchState};

/// Fraction of the standing collider height kept while crouched.
pub const CROUCHED_HEIGHT_FACTOR: f32 = 0.5;

/// Hold-to-crouch state machine with smoothed head and collider heights.
#[derive(Debug, Clone)]
pub struct CrouchController {
    /// Read live by the registered speed override.
    crouch_speed: Rc<Cell<f32>>,
    crouch_head_position: f32,
    transition_speed: f32,
    override_id: OverrideId,
    state: CrouchState,
}

impl CrouchController {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            crouch_speed: Rc::new(Cell::new(config.crouch_speed)),
            crouch_head_position: config.crouch_head_position,
            transition_speed: config.crouch_transition_speed,
            override_id: OverrideId::next(),
            state: CrouchState::default(),
        }
    }

    pub fn apply_config(&mut self, config: &LocomotionConfig) {
        self.crouch_speed.set(config.crouch_speed);
        self.crouch_head_position = config.crouch_head_position;
        self.transition_speed = config.crouch_transition_speed;
    }

    pub fn state(&self) -> &CrouchState {
        &self.state
    }

    pub fn phase(&self) -> CrouchPhase {
        self.state.phase
    }

    pub fn is_crouched(&self) -> bool {
        self.state.phase.is_crouched()
    }

    pub fn override_id(&self) -> OverrideId {
        self.override_id
    }

    /// Records the rig's resting heights if they have not been seen yet.
    pub fn capture_defaults(&mut self, head: Option<&HeadOffset>, collider: Option<&CapsuleCollider>) {
        if let Some(head) = head {
            if self.state.capture_head_y(head.local_y()) {
                log::debug!("captured default head height {:.3}", head.local_y());
            }
        }
        if let Some(collider) = collider {
            if self.state.capture_collider_height(collider.height) {
                log::debug!("captured default collider height {:.3}", collider.height);
            }
        }
    }

    /// Full per-tick update: transition decision, then smoothing.
    pub fn tick(
        &mut self,
        dt: f32,
        held: bool,
        mut head: Option<&mut HeadOffset>,
        mut collider: Option<&mut CapsuleCollider>,
        overrides: &mut SpeedOverrideStack,
        events: &mut CrouchEvents,
    ) -> Option<CrouchSignal> {
        self.capture_defaults(head.as_deref(), collider.as_deref());
        let signal = self.update_phase(held, overrides, events);
        self.interpolate(dt, head.as_deref_mut(), collider.as_deref_mut());
        signal
    }

    /// Sets targets for `held` and performs at most one transition. Calling it
    /// again with the same `held` changes nothing.
    pub fn update_phase(
        &mut self,
        held: bool,
        overrides: &mut SpeedOverrideStack,
        events: &mut CrouchEvents,
    ) -> Option<CrouchSignal> {
        if held {
            self.state.target_head_y = self.crouch_head_position;
            if let Some(height) = self.state.default_collider_height() {
                self.state.target_collider_height = height * CROUCHED_HEIGHT_FACTOR;
            }

            if self.state.phase == CrouchPhase::Standing {
                self.state.phase = CrouchPhase::Crouched;
                self.set_speed_override_active(overrides, true);
                log::debug!("crouch start");
                events.fire(CrouchSignal::Start);
                return Some(CrouchSignal::Start);
            }
        } else {
            if let Some(y) = self.state.default_head_y() {
                self.state.target_head_y = y;
            }
            if let Some(height) = self.state.default_collider_height() {
                self.state.target_collider_height = height;
            }

            if self.state.phase == CrouchPhase::Crouched {
                self.state.phase = CrouchPhase::Standing;
                self.set_speed_override_active(overrides, false);
                log::debug!("crouch end");
                events.fire(CrouchSignal::End);
                return Some(CrouchSignal::End);
            }
        }

        None
    }

    /// Moves head and collider toward their targets. Absent parts are skipped.
    pub fn interpolate(&mut self, dt: f32, head: Option<&mut HeadOffset>, collider: Option<&mut CapsuleCollider>) {
        let blend = (dt * self.transition_speed).clamp(0.0, 1.0);

        if let Some(head) = head {
            let y = lerp(head.local_y(), self.state.target_head_y, blend);
            head.set_local_y(y);
            self.state.current_head_y = y;
        }

        if let Some(collider) = collider {
            let height = lerp(collider.height, self.state.target_collider_height, blend);
            collider.set_height(height);
            self.state.current_collider_height = height;
        }
    }

    fn set_speed_override_active(&self, overrides: &mut SpeedOverrideStack, active: bool) {
        if active {
            let speed = Rc::clone(&self.crouch_speed);
            overrides.insert(self.override_id, move || speed.get());
        } else {
            overrides.remove(self.override_id);
        }
    }
}

/// Stays on the segment between `a` and `b` even after rounding.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t >= 1.0 {
        return b;
    }
    (a + (b - a) * t).clamp(a.min(b), a.max(b))
}
