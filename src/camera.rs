use glam::{Mat4, Quat, Vec3};

pub const DEFAULT_FOV: f32 = 70.0;
pub const DEFAULT_NEAR: f32 = 0.01;
pub const DEFAULT_FAR: f32 = 10.0;

/// Perspective camera looking down its local -Z axis
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub quaternion: Quat,
    pub up: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            quaternion: Quat::IDENTITY,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the cached projection after changing fov, aspect or clip planes
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Local-to-world transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.quaternion, self.position)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.matrix().inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Local +X axis in world space
    pub fn right(&self) -> Vec3 {
        self.quaternion * Vec3::X
    }

    /// Viewing direction in world space
    pub fn forward(&self) -> Vec3 {
        self.quaternion * Vec3::NEG_Z
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

impl AsRef<PerspectiveCamera> for PerspectiveCamera {
    fn as_ref(&self) -> &PerspectiveCamera {
        self
    }
}

impl AsMut<PerspectiveCamera> for PerspectiveCamera {
    fn as_mut(&mut self) -> &mut PerspectiveCamera {
        self
    }
}
