use glam::Vec3;

/// Camera mount relative to the character root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadOffset {
    pub local_position: Vec3,
}

impl HeadOffset {
    pub fn new(local_position: Vec3) -> Self {
        Self { local_position }
    }

    pub fn local_y(&self) -> f32 {
        self.local_position.y
    }

    /// Only the vertical axis moves; x/z stay where they were mounted.
    pub fn set_local_y(&mut self, y: f32) {
        self.local_position.y = y;
    }
}

/// Upright capsule anchored at the character's feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleCollider {
    pub height: f32,
    pub radius: f32,
    pub center: Vec3,
}

impl CapsuleCollider {
    pub fn new(height: f32, radius: f32) -> Self {
        Self {
            height,
            radius,
            center: Vec3::new(0.0, height * 0.5, 0.0),
        }
    }

    /// Resizes and recenters so the base stays at the feet.
    pub fn set_height(&mut self, height: f32) {
        self.height = height;
        self.center = Vec3::Y * height * 0.5;
    }

    /// Half length of the segment between the two hemispheres.
    pub fn half_segment(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.height * 0.5
    }
}
