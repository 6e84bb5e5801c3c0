use glam::{EulerRot, Quat};

/// Axis order an [`Euler`] triple is applied in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EulerOrder {
    /// `R = Rx * Ry * Rz`, the default for scene objects
    #[default]
    Xyz,
    /// `R = Ry * Rx * Rz`: yaw, then pitch, then roll
    Yxz,
}

impl EulerOrder {
    fn rot(self) -> EulerRot {
        match self {
            EulerOrder::Xyz => EulerRot::XYZ,
            EulerOrder::Yxz => EulerRot::YXZ,
        }
    }
}

/// Rotation about the X, Y and Z axes in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub order: EulerOrder,
}

impl Euler {
    pub const fn new(x: f32, y: f32, z: f32, order: EulerOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Decompose `q` into angles of the given order
    pub fn from_quat(q: Quat, order: EulerOrder) -> Self {
        let mut euler = Self::new(0.0, 0.0, 0.0, order);
        euler.set_from_quat(q);
        euler
    }

    pub fn set_from_quat(&mut self, q: Quat) {
        let (a, b, c) = q.normalize().to_euler(self.order.rot());
        (self.x, self.y, self.z) = match self.order {
            EulerOrder::Xyz => (a, b, c),
            EulerOrder::Yxz => (b, a, c),
        };
    }

    pub fn to_quat(&self) -> Quat {
        match self.order {
            EulerOrder::Xyz => Quat::from_euler(EulerRot::XYZ, self.x, self.y, self.z),
            EulerOrder::Yxz => Quat::from_euler(EulerRot::YXZ, self.y, self.x, self.z),
        }
    }

    /// Rotation about the vertical axis
    pub fn yaw(&self) -> f32 {
        self.y
    }

    /// Rotation about the lateral axis
    pub fn pitch(&self) -> f32 {
        self.x
    }
}
