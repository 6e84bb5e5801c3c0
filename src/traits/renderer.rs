use crate::camera::PerspectiveCamera;
use crate::scene::Scene;

/// Something that draws a scene onto a resizable output surface
pub trait SceneRenderer {
    /// Resize the output surface in physical pixels
    fn set_size(&mut self, width: u32, height: u32);

    /// Current output size in physical pixels
    fn size(&self) -> (u32, u32);

    /// Draw `scene` as seen from `camera`
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()>;
}
