use std::ops::{Index, IndexMut};

use glam::{Mat4, Vec3};
use crate::geometry::BoxGeometry;
use crate::math::{Color, Euler};
use crate::types::{MATERIAL_BASIC, MATERIAL_NORMAL};

/// Surface shading for a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Color each fragment by its view-space normal
    Normal,
    /// Flat unlit color
    Basic(Color),
}

impl Material {
    /// Shader mode and linear color for the uniform buffer
    pub fn shader_params(&self) -> (u32, [f32; 4]) {
        match self {
            Material::Normal => (MATERIAL_NORMAL, [1.0; 4]),
            Material::Basic(color) => {
                let [r, g, b] = color.to_linear();
                (MATERIAL_BASIC, [r, g, b, 1.0])
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: BoxGeometry,
    pub material: Material,
    pub position: Vec3,
    pub rotation: Euler,
}

impl Mesh {
    pub fn new(geometry: BoxGeometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
            rotation: Euler::default(),
        }
    }

    /// Local-to-world transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation.to_quat(), self.position)
    }
}

/// Handle to a mesh inside a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(usize);

#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes.iter().enumerate().map(|(i, mesh)| (MeshId(i), mesh))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Meshes are never removed, so an id from [`Scene::add`] stays valid
impl Index<MeshId> for Scene {
    type Output = Mesh;

    fn index(&self, id: MeshId) -> &Mesh {
        &self.meshes[id.0]
    }
}

impl IndexMut<MeshId> for Scene {
    fn index_mut(&mut self, id: MeshId) -> &mut Mesh {
        &mut self.meshes[id.0]
    }
}
