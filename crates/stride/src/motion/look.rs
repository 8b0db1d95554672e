use glam::{Quat, Vec2};

use crate::config::LocomotionConfig;

/// Mouse look. Pitch lives on the camera, yaw compounds onto the character.
#[derive(Debug, Clone)]
pub struct CameraLook {
    /// Degrees, positive looks down.
    pitch: f32,
    pitch_limit: f32,
}

impl CameraLook {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            pitch: 0.0,
            pitch_limit: config.pitch_clamp_degrees.abs(),
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    pub fn set_pitch_limit(&mut self, degrees: f32) {
        self.pitch_limit = degrees.abs();
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Camera rotation relative to the character: X axis only, never rolls or yaws.
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Applies one tick of look input and returns the new camera rotation.
    pub fn tick(&mut self, dt: f32, look_delta: Vec2, sensitivity: f32, facing: &mut Quat) -> Quat {
        let mouse_x = look_delta.x * sensitivity * dt;
        let mouse_y = look_delta.y * sensitivity * dt;

        self.pitch = (self.pitch - mouse_y).clamp(-self.pitch_limit, self.pitch_limit);

        if mouse_x != 0.0 {
            *facing = (*facing * Quat::from_rotation_y(mouse_x.to_radians())).normalize();
        }

        self.camera_rotation()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn look() -> CameraLook {
        CameraLook::new(&LocomotionConfig::default())
    }

    #[test]
    fn pitch_never_leaves_limit() {
        let mut look = look();
        let mut facing = Quat::IDENTITY;
        let deltas = [500.0, -2000.0, 30.0, 10_000.0, -3.0, -10_000.0, 0.5];

        for delta in deltas {
            look.tick(1.0 / 60.0, Vec2::new(0.0, delta), 2.0, &mut facing);
            assert!(look.pitch() >= -60.0 && look.pitch() <= 60.0);
        }
    }

    #[test]
    fn moving_up_looks_up() {
        let mut look = look();
        let mut facing = Quat::IDENTITY;
        let rotation = look.tick(0.1, Vec2::new(0.0, 50.0), 2.0, &mut facing);

        assert!((look.pitch() + 10.0).abs() < 1e-4);
        assert!((rotation * Vec3::Z).y > 0.0);
        assert_eq!(facing, Quat::IDENTITY);
    }

    #[test]
    fn yaw_compounds_without_bounds() {
        let mut look = look();
        let mut facing = Quat::IDENTITY;

        // 4 ticks of 100 degrees each.
        for _ in 0..4 {
            look.tick(0.5, Vec2::new(100.0, 0.0), 2.0, &mut facing);
        }

        let expected = Quat::from_rotation_y(400_f32.to_radians());
        assert!(facing.angle_between(expected) < 1e-3);
        assert_eq!(look.pitch(), 0.0);
    }

    #[test]
    fn camera_rotation_has_no_roll_or_yaw() {
        let mut look = look();
        let mut facing = Quat::IDENTITY;
        let rotation = look.tick(0.1, Vec2::new(30.0, -40.0), 2.0, &mut facing);

        let right = rotation * Vec3::X;
        assert!((right - Vec3::X).length() < 1e-5);
    }
}
