use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use pointer_look::cli::Cli;
use pointer_look::config::DemoConfig;
use pointer_look::controls::{ControlsEvent, PointerLockControls};
use pointer_look::core::{Button, Controller, FpsCounter, WinitInputSource};
use pointer_look::demo::{renderer_options, CubeDemo};
use pointer_look::frame::AnimationLoop;
use pointer_look::renderer::Renderer;

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;

type LookControls = PointerLockControls<WinitInputSource>;

/// The demo either runs with a fixed camera or hands it to mouse look
enum Stage {
    Fixed(CubeDemo),
    Look(CubeDemo<LookControls>),
}

impl Stage {
    fn resize(&mut self, renderer: &mut Renderer, width: u32, height: u32) {
        match self {
            Stage::Fixed(demo) => demo.resize(renderer, width, height),
            Stage::Look(demo) => demo.resize(renderer, width, height),
        }
    }

    fn frame(&mut self, renderer: &mut Renderer, time_ms: f64) -> Result<()> {
        match self {
            Stage::Fixed(demo) => demo.frame(renderer, time_ms),
            Stage::Look(demo) => demo.frame(renderer, time_ms),
        }
    }

    fn controls(&mut self) -> Option<&mut LookControls> {
        match self {
            Stage::Fixed(_) => None,
            Stage::Look(demo) => Some(demo.rig_mut()),
        }
    }
}

struct App {
    cli: Cli,
    config: DemoConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    stage: Option<Stage>,
    animation: AnimationLoop,
    fps: FpsCounter,
}

impl App {
    fn new(cli: Cli, config: DemoConfig) -> Self {
        Self {
            cli,
            config,
            window: None,
            renderer: None,
            stage: None,
            animation: AnimationLoop::new(),
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
        }
    }

    fn build_stage(&self, window: &Arc<Window>) -> Stage {
        let size = window.inner_size();
        let demo = CubeDemo::from_config(&self.config, size.width, size.height);

        if !self.cli.controls {
            return Stage::Fixed(demo);
        }

        let sensitivity = self.config.look_sensitivity;
        let source = WinitInputSource::new(window.clone());
        let mut demo = demo.with_camera_rig(|camera| {
            PointerLockControls::new(camera, source).with_sensitivity(sensitivity)
        });

        let controls = demo.rig_mut();
        controls.add_event_listener(ControlsEvent::Change, |_| log::trace!("Camera turned"));
        controls.add_event_listener(ControlsEvent::Lock, |_| log::info!("Pointer locked"));
        controls.add_event_listener(ControlsEvent::Unlock, |_| log::info!("Pointer unlocked"));
        Stage::Look(demo)
    }

    /// Pump queued input and walk the camera with WASD
    fn update_controls(&mut self, delta: f32) {
        let speed = self.config.move_speed;
        let Some(controls) = self.stage.as_mut().and_then(Stage::controls) else {
            return;
        };

        controls.pump_events();
        if !controls.is_locked() {
            return;
        }

        let source = controls.source();
        let forward = source.axis(Button::KeyW, Button::KeyS);
        let right = source.axis(Button::KeyD, Button::KeyA);
        controls.move_forward(forward * speed * delta);
        controls.move_right(right * speed * delta);
    }

    fn redraw(&mut self) {
        let Some(frame) = self.animation.next_frame() else {
            return;
        };

        if let Some(fps) = self.fps.frame(frame.delta) {
            log::debug!("FPS: {:.1}", fps);
        }

        self.update_controls(frame.delta);

        if let (Some(stage), Some(renderer)) = (&mut self.stage, &mut self.renderer) {
            if let Err(e) = stage.frame(renderer, frame.time_ms) {
                log::error!("Render error: {:#}", e);
            }
        }
    }

    fn on_button(&mut self, event_loop: &ActiveEventLoop, button: Button) {
        let controls = self.stage.as_mut().and_then(Stage::controls);
        match (button, controls) {
            (Button::MouseLeft, Some(controls)) => controls.lock(),
            (Button::Escape, Some(controls)) if controls.is_locked() => controls.unlock(),
            (Button::Escape, _) => event_loop.exit(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Pointer Look")
                .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let options = renderer_options(&self.config);
        let renderer = match pollster::block_on(Renderer::new(window.clone(), options)) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        self.stage = Some(self.build_stage(&window));
        self.renderer = Some(renderer);
        self.window = Some(window);
        self.animation.start();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Feed the input source first so button state is current below
        let pressed = self.stage.as_mut().and_then(Stage::controls).map(|controls| {
            let source = controls.source_mut();
            let before = source.get_down_keys().to_vec();
            source.process_window_event(&event);
            source
                .get_down_keys()
                .iter()
                .copied()
                .filter(|button| !before.contains(button))
                .collect::<Vec<_>>()
        });

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let (Some(stage), Some(renderer)) = (&mut self.stage, &mut self.renderer) {
                    stage.resize(renderer, size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: winit::keyboard::PhysicalKey::Code(
                            winit::keyboard::KeyCode::Escape,
                        ),
                        repeat: false,
                        ..
                    },
                ..
            } if pressed.is_none() => event_loop.exit(),
            _ => {}
        }

        for button in pressed.into_iter().flatten() {
            self.on_button(event_loop, button);
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(controls) = self.stage.as_mut().and_then(Stage::controls) {
            controls.source_mut().process_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.animation.is_running() {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, config);

    if app.cli.controls {
        log::info!("Pointer Look - Click to capture the mouse, WASD to move, Escape to release");
    }
    event_loop.run_app(&mut app)?;

    Ok(())
}
