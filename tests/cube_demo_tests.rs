use std::collections::VecDeque;

use glam::{Quat, Vec3};
use pointer_look::camera::PerspectiveCamera;
use pointer_look::config::DemoConfig;
use pointer_look::controls::{InputEvent, InputSource, Listener, MouseMovement, PointerLockControls};
use pointer_look::demo::CubeDemo;
use pointer_look::scene::Scene;
use pointer_look::traits::SceneRenderer;

/// Mock renderer capturing what it was asked to draw
#[derive(Default)]
struct MockRenderer {
    size: (u32, u32),
    frames: Vec<(Quat, Vec3, f32)>,
    fail: bool,
}

impl SceneRenderer for MockRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("surface lost");
        }
        let (_, cube) = scene
            .meshes()
            .next()
            .ok_or_else(|| anyhow::anyhow!("empty scene"))?;
        self.frames
            .push((camera.quaternion, camera.position, cube.rotation.y));
        Ok(())
    }
}

/// Input source fed directly by the test
#[derive(Default)]
struct QueueSource {
    queue: VecDeque<InputEvent<()>>,
}

impl InputSource for QueueSource {
    type Element = ();

    fn element(&self) -> Self::Element {}

    fn attach(&mut self, _listener: Listener) {}

    fn detach(&mut self, _listener: Listener) {}

    fn poll_event(&mut self) -> Option<InputEvent<()>> {
        self.queue.pop_front()
    }

    fn request_pointer_lock(&mut self) {
        self.queue.push_back(InputEvent::PointerLockChange(Some(())));
    }

    fn exit_pointer_lock(&mut self) {
        self.queue.push_back(InputEvent::PointerLockChange(None));
    }
}

#[test]
fn test_resize_updates_renderer_and_projection() {
    let mut demo = CubeDemo::new(800, 600);
    let mut renderer = MockRenderer::default();
    let before = demo.camera().projection_matrix();

    demo.resize(&mut renderer, 1024, 512);

    assert_eq!(renderer.size(), (1024, 512));
    assert_eq!(demo.camera().aspect, 2.0);
    assert_ne!(demo.camera().projection_matrix(), before);
}

#[test]
fn test_resize_to_zero_height_keeps_finite_aspect() {
    let mut demo = CubeDemo::new(800, 600);
    let mut renderer = MockRenderer::default();

    demo.resize(&mut renderer, 640, 0);

    assert!(demo.camera().aspect.is_finite());
    assert!(demo.camera().projection_matrix().is_finite());
}

#[test]
fn test_frame_animates_then_renders() {
    let mut demo = CubeDemo::new(800, 600);
    let mut renderer = MockRenderer::default();

    demo.frame(&mut renderer, 0.0).unwrap();
    demo.frame(&mut renderer, 500.0).unwrap();

    assert_eq!(renderer.frames.len(), 2);
    assert_eq!(renderer.frames[0].2, 0.0);
    assert_eq!(renderer.frames[1].2, 0.5);
    assert_eq!(demo.cube().rotation.x, 0.25);
}

#[test]
fn test_render_error_propagates() {
    let mut demo = CubeDemo::new(800, 600);
    let mut renderer = MockRenderer {
        fail: true,
        ..Default::default()
    };

    assert!(demo.frame(&mut renderer, 16.0).is_err());
}

#[test]
fn test_config_shapes_scene() {
    let config = DemoConfig::from_json(r#"{ "camera_distance": 3.0, "cube_size": 1.0 }"#).unwrap();
    let demo = CubeDemo::from_config(&config, 800, 600);

    assert_eq!(demo.camera().position, Vec3::new(0.0, 0.0, 3.0));
    assert_eq!(demo.cube().geometry.half_extents(), Vec3::splat(0.5));
}

#[test]
fn test_look_controls_drive_rendered_camera() {
    let mut demo = CubeDemo::new(800, 600)
        .with_camera_rig(|camera| PointerLockControls::new(camera, QueueSource::default()));
    let mut renderer = MockRenderer::default();

    let controls = demo.rig_mut();
    controls.lock();
    controls
        .source_mut()
        .queue
        .push_back(InputEvent::MouseMove(MouseMovement::new(100.0, 0.0)));
    assert_eq!(controls.pump_events(), 2);

    demo.frame(&mut renderer, 16.0).unwrap();

    let (orientation, position, _) = renderer.frames[0];
    assert_ne!(orientation, Quat::IDENTITY);
    assert_eq!(orientation, demo.rig().camera().quaternion);
    assert_eq!(position, Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn test_resize_reaches_rig_camera() {
    let mut demo = CubeDemo::new(800, 600)
        .with_camera_rig(|camera| PointerLockControls::new(camera, QueueSource::default()));
    let mut renderer = MockRenderer::default();

    demo.resize(&mut renderer, 300, 300);

    assert_eq!(demo.rig().camera().aspect, 1.0);
}
