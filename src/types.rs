use glam::Mat4;

/// Mesh vertex for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Shading mode selector shared with the WGSL shader
pub const MATERIAL_NORMAL: u32 = 0;
pub const MATERIAL_BASIC: u32 = 1;

/// Per-mesh uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    pub model_view_proj: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4], // inverse transpose of model-view
    pub color: [f32; 4],
    pub material: u32,
    pub _pad: [u32; 3],
}

impl MeshUniform {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4, color: [f32; 4], material: u32) -> Self {
        let model_view = view * model;
        Self {
            model_view_proj: (projection * model_view).to_cols_array_2d(),
            normal_matrix: model_view.inverse().transpose().to_cols_array_2d(),
            color,
            material,
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3, Vec4};

    #[test]
    fn test_uniform_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<MeshUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<MeshUniform>(), 160);
    }

    #[test]
    fn test_vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn test_normal_matrix_matches_rotation_for_rigid_transform() {
        let model = Mat4::from_rotation_translation(Quat::from_rotation_y(0.5), Vec3::X);
        let uniform = MeshUniform::new(model, Mat4::IDENTITY, Mat4::IDENTITY, [1.0; 4], MATERIAL_NORMAL);

        let normal = Mat4::from_cols_array_2d(&uniform.normal_matrix) * Vec4::new(0.0, 0.0, 1.0, 0.0);
        let expected = Quat::from_rotation_y(0.5) * Vec3::Z;
        assert!(normal.truncate().abs_diff_eq(expected, 1e-5));
    }
}
