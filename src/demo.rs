use crate::camera::PerspectiveCamera;
use crate::config::DemoConfig;
use crate::geometry::BoxGeometry;
use crate::renderer::RendererOptions;
use crate::scene::{Material, Mesh, MeshId, Scene};
use crate::traits::SceneRenderer;

/// Spinning-cube scene bootstrap
///
/// `C` is whatever holds the camera: the bare [`PerspectiveCamera`], or a
/// controller wrapping it (see [`CubeDemo::with_camera_rig`]).
///
/// # Examples
///
/// ```
/// use pointer_look::demo::CubeDemo;
///
/// let mut demo = CubeDemo::new(800, 600);
/// demo.animate(1000.0);
/// assert_eq!(demo.cube().rotation.y, 1.0);
/// ```
#[derive(Debug)]
pub struct CubeDemo<C = PerspectiveCamera> {
    rig: C,
    scene: Scene,
    cube: MeshId,
}

impl CubeDemo {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(&DemoConfig::default(), width, height)
    }

    pub fn from_config(config: &DemoConfig, width: u32, height: u32) -> Self {
        let mut camera = PerspectiveCamera::new(
            config.fov,
            aspect_ratio(width, height),
            config.near,
            config.far,
        );
        camera.position.z = config.camera_distance;

        let mut scene = Scene::new();
        let cube = scene.add(Mesh::new(
            BoxGeometry::cube(config.cube_size),
            Material::Normal,
        ));

        Self {
            rig: camera,
            scene,
            cube,
        }
    }
}

impl<C: AsRef<PerspectiveCamera> + AsMut<PerspectiveCamera>> CubeDemo<C> {
    /// Hand the camera to a rig (e.g. a look controller) that keeps driving it
    pub fn with_camera_rig<R, F>(self, wrap: F) -> CubeDemo<R>
    where
        F: FnOnce(C) -> R,
    {
        CubeDemo {
            rig: wrap(self.rig),
            scene: self.scene,
            cube: self.cube,
        }
    }

    /// Window resize handler: surface size and camera projection must agree
    pub fn resize<R: SceneRenderer + ?Sized>(&mut self, renderer: &mut R, width: u32, height: u32) {
        renderer.set_size(width, height);

        let camera = self.rig.as_mut();
        camera.aspect = aspect_ratio(width, height);
        camera.update_projection_matrix();
    }

    /// Pose the cube for `time_ms` milliseconds since the loop started
    pub fn animate(&mut self, time_ms: f64) {
        let cube = &mut self.scene[self.cube];
        cube.rotation.x = (time_ms / 2000.0) as f32;
        cube.rotation.y = (time_ms / 1000.0) as f32;
    }

    pub fn render<R: SceneRenderer + ?Sized>(&self, renderer: &mut R) -> anyhow::Result<()> {
        renderer.render(&self.scene, self.rig.as_ref())
    }

    /// Per-frame callback: animate then draw
    pub fn frame<R: SceneRenderer + ?Sized>(&mut self, renderer: &mut R, time_ms: f64) -> anyhow::Result<()> {
        self.animate(time_ms);
        self.render(renderer)
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        self.rig.as_ref()
    }

    pub fn rig(&self) -> &C {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut C {
        &mut self.rig
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn cube(&self) -> &Mesh {
        &self.scene[self.cube]
    }
}

/// Renderer settings for the demo
pub fn renderer_options(config: &DemoConfig) -> RendererOptions {
    RendererOptions {
        antialias: config.antialias,
        clear_color: config.clear_color(),
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}
