use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

use crate::geometry::CapsuleCollider;
use crate::motion::CharacterBody;

use super::PhysicsWorld;

/// Character body backed by rapier's kinematic character controller.
pub struct RapierBody {
    world: PhysicsWorld,
    handle: RigidBodyHandle,
    controller: KinematicCharacterController,
    capsule: CapsuleCollider,
    shape: SharedShape,
    feet: Vec3,
    grounded: bool,
}

impl RapierBody {
    pub fn new(mut world: PhysicsWorld, feet: Vec3, capsule: CapsuleCollider) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.offset = CharacterLength::Absolute(0.02);
        controller.up = Vector::Y;
        controller.max_slope_climb_angle = 50_f32.to_radians();
        controller.min_slope_slide_angle = 35_f32.to_radians();
        controller.snap_to_ground = Some(CharacterLength::Absolute(0.2));
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(0.35),
            min_width: CharacterLength::Absolute(0.15),
            include_dynamic_bodies: false,
        });

        let handle = world.add_character(feet, &capsule);
        world.step();

        Self {
            world,
            handle,
            controller,
            shape: PhysicsWorld::capsule_shape(&capsule),
            capsule,
            feet,
            grounded: false,
        }
    }

    pub fn feet(&self) -> Vec3 {
        self.feet
    }

    pub fn capsule(&self) -> &CapsuleCollider {
        &self.capsule
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    fn sync_body_position(&mut self) {
        self.world
            .set_body_position(self.handle, self.feet + self.capsule.center);
    }
}

impl CharacterBody for RapierBody {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_with_collision(&mut self, displacement: Vec3) -> bool {
        let corrected = self.world.move_character(
            &self.controller,
            self.handle,
            &self.shape,
            self.feet + self.capsule.center,
            displacement,
        );

        let t = corrected.translation;
        self.feet += Vec3::new(t.x, t.y, t.z);
        self.grounded = corrected.grounded;

        self.sync_body_position();
        self.world.step();

        self.grounded
    }

    fn resize(&mut self, capsule: &CapsuleCollider) {
        if (capsule.height - self.capsule.height).abs() < 1e-4 {
            return;
        }
        self.capsule = *capsule;
        self.shape = PhysicsWorld::capsule_shape(capsule);
        self.world.set_capsule(self.handle, capsule);
        self.sync_body_position();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_above_ground(height: f32) -> RapierBody {
        let mut world = PhysicsWorld::new();
        world.add_ground(0.0, 50.0);
        RapierBody::new(world, Vec3::new(0.0, height, 0.0), CapsuleCollider::new(2.0, 0.4))
    }

    #[test]
    fn falls_until_grounded() {
        let mut body = body_above_ground(1.0);
        let mut velocity = 0.0;

        for _ in 0..180 {
            velocity = if body.is_grounded() { -1.0 } else { velocity - 9.8 / 60.0 };
            body.move_with_collision(Vec3::new(0.0, velocity / 60.0, 0.0));
        }

        assert!(body.is_grounded());
        assert!(body.feet().y.abs() < 0.1, "feet at {}", body.feet().y);
    }

    #[test]
    fn wall_blocks_horizontal_motion() {
        let mut world = PhysicsWorld::new();
        world.add_ground(0.0, 50.0);
        world.add_static_box(Vec3::new(0.0, 1.5, 2.0), Vec3::new(5.0, 1.5, 0.25));
        let mut body = RapierBody::new(world, Vec3::new(0.0, 0.05, 0.0), CapsuleCollider::new(2.0, 0.4));

        for _ in 0..120 {
            body.move_with_collision(Vec3::new(0.0, -1.0 / 60.0, 5.0 / 60.0));
        }

        // Wall face is at z = 1.75, capsule radius 0.4.
        assert!(body.feet().z < 1.4, "feet at {}", body.feet().z);
    }

    #[test]
    fn resize_keeps_feet_and_shrinks_shape() {
        let mut body = body_above_ground(0.0);
        let mut capsule = *body.capsule();
        capsule.set_height(1.0);

        body.resize(&capsule);

        assert_eq!(body.capsule().height, 1.0);
        assert_eq!(body.feet(), Vec3::ZERO);
        let center = body.world().body_position(body.handle).unwrap();
        assert!((center.y - 0.5).abs() < 1e-5);
    }
}
