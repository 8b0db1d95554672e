use glam::{Quat, Vec2, Vec3};

use crate::config::LocomotionConfig;
use crate::geometry::CapsuleCollider;

/// Physics capability the locomotion core moves through.
pub trait CharacterBody {
    /// Grounded state produced by the most recent move.
    fn is_grounded(&self) -> bool;

    /// Sweeps the body by `displacement` with collision response and returns
    /// whether it ended up on the ground.
    fn move_with_collision(&mut self, displacement: Vec3) -> bool;

    /// Called after the crouch controller reshapes the collider.
    fn resize(&mut self, _capsule: &CapsuleCollider) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    /// Signed, negative while falling.
    pub vertical_velocity: f32,
    pub grounded: bool,
}

/// Integrates horizontal intent and gravity into one displacement per tick.
#[derive(Debug, Clone)]
pub struct LocomotionBody {
    gravity: f32,
    grounded_velocity: f32,
    state: MotionState,
}

impl LocomotionBody {
    const MIN_INTENT_SQ: f32 = 1e-10;

    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            gravity: config.gravity,
            grounded_velocity: config.grounded_velocity,
            state: MotionState::default(),
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.state.vertical_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    pub fn apply_config(&mut self, config: &LocomotionConfig) {
        self.gravity = config.gravity;
        self.grounded_velocity = config.grounded_velocity;
    }

    /// Runs one tick and returns the displacement handed to the body.
    pub fn tick<B: CharacterBody + ?Sized>(
        &mut self,
        body: &mut B,
        facing: Quat,
        dt: f32,
        move_vector: Vec2,
        speed: f32,
    ) -> Vec3 {
        let grounded_at_start = body.is_grounded();
        if grounded_at_start {
            self.state.vertical_velocity = self.grounded_velocity;
        }
        if dt <= 0.0 {
            return Vec3::ZERO;
        }

        let horizontal = Self::horizontal_velocity(facing, move_vector, speed);
        if !grounded_at_start {
            self.state.vertical_velocity -= self.gravity * dt;
        }
        let vertical = self.state.vertical_velocity;
        let displacement = Vec3::new(horizontal.x, vertical, horizontal.z) * dt;

        let grounded = body.move_with_collision(displacement);
        if grounded != self.state.grounded {
            log::debug!(
                "{} (vertical velocity {:.3})",
                if grounded { "landed" } else { "left ground" },
                self.state.vertical_velocity
            );
        }
        self.state.grounded = grounded;

        displacement
    }

    /// Move intent rotated into the facing, in units per second.
    pub fn horizontal_velocity(facing: Quat, move_vector: Vec2, speed: f32) -> Vec3 {
        let local = Vec3::new(move_vector.x, 0.0, move_vector.y);
        if local.length_squared() < Self::MIN_INTENT_SQ {
            return Vec3::ZERO;
        }

        let world = facing * local.normalize();
        Vec3::new(world.x, 0.0, world.z) * speed
    }
}
