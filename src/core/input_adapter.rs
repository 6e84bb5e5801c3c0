use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::sync::Arc;

use anyhow::Result;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use super::controller::{Button, Controller};
use crate::controls::{InputEvent, InputSource, Listener, MouseMovement};

/// Window capable of capturing the cursor
pub trait CursorHost {
    type Id: PartialEq + Debug + Copy;

    fn id(&self) -> Self::Id;

    /// Lock (or at least confine) and hide the cursor
    fn grab_cursor(&self) -> Result<()>;

    /// Undo [`grab_cursor`](CursorHost::grab_cursor)
    fn release_cursor(&self);
}

impl CursorHost for Arc<Window> {
    type Id = WindowId;

    fn id(&self) -> WindowId {
        Window::id(self)
    }

    fn grab_cursor(&self) -> Result<()> {
        // Not every platform supports Locked; Confined plus raw motion is close enough
        self.set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.set_cursor_grab(CursorGrabMode::Confined))?;
        self.set_cursor_visible(false);
        Ok(())
    }

    fn release_cursor(&self) {
        if let Err(e) = self.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Failed to release cursor grab: {e}");
        }
        self.set_cursor_visible(true);
    }
}

/// Adapter that bridges Winit events to the pointer-lock [`InputSource`]
/// and the [`Controller`] trait
///
/// Lock requests are resolved immediately against the window but reported
/// through the event queue, like any other lifecycle change.
#[derive(Debug)]
pub struct WinitInputSource<H: CursorHost = Arc<Window>> {
    host: H,
    attached: HashSet<Listener>,
    pending: VecDeque<InputEvent<H::Id>>,
    locked: bool,
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
}

impl<H: CursorHost> WinitInputSource<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            attached: HashSet::new(),
            pending: VecDeque::new(),
            locked: false,
            pressed_keys: HashSet::new(),
            pressed_vec: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Whether this source currently holds the cursor
    pub fn is_pointer_locked(&self) -> bool {
        self.locked
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.set_button(button, event.state);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    self.set_button(btn, *state);
                }
            }
            WindowEvent::Focused(false) => {
                self.pressed_keys.clear();
                self.pressed_vec.clear();
                if self.locked {
                    log::debug!("Focus lost, releasing pointer lock");
                    self.release();
                }
            }
            _ => {}
        }
    }

    /// Process a Winit DeviceEvent; raw motion keeps flowing while the cursor is grabbed
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let movement = MouseMovement::new(delta.0 as f32, delta.1 as f32);
            self.queue(InputEvent::MouseMove(movement));
        }
    }

    fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                }
            }
            ElementState::Released => {
                if self.pressed_keys.remove(&button) {
                    self.pressed_vec.retain(|&b| b != button);
                }
            }
        }
    }

    fn queue(&mut self, event: InputEvent<H::Id>) {
        if self.attached.contains(&event.listener()) {
            self.pending.push_back(event);
        }
    }

    fn release(&mut self) {
        self.host.release_cursor();
        self.locked = false;
        self.queue(InputEvent::PointerLockChange(None));
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(Button::KeyW),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(Button::KeyA),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(Button::KeyS),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(Button::KeyD),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    /// Map Winit MouseButton to Button
    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            _ => None,
        }
    }
}

impl<H: CursorHost> InputSource for WinitInputSource<H> {
    type Element = H::Id;

    fn element(&self) -> H::Id {
        self.host.id()
    }

    fn attach(&mut self, listener: Listener) {
        self.attached.insert(listener);
    }

    fn detach(&mut self, listener: Listener) {
        self.attached.remove(&listener);
        self.pending.retain(|event| event.listener() != listener);
    }

    fn poll_event(&mut self) -> Option<InputEvent<H::Id>> {
        self.pending.pop_front()
    }

    fn request_pointer_lock(&mut self) {
        if self.locked {
            return;
        }
        match self.host.grab_cursor() {
            Ok(()) => {
                self.locked = true;
                let id = self.host.id();
                self.queue(InputEvent::PointerLockChange(Some(id)));
            }
            Err(e) => {
                log::debug!("Cursor grab failed: {e:#}");
                self.queue(InputEvent::PointerLockError);
            }
        }
    }

    fn exit_pointer_lock(&mut self) {
        if self.locked {
            self.release();
        }
    }
}

impl<H: CursorHost> Controller for WinitInputSource<H> {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    // Note: Winit keyboard events carry platform fields that are not publicly
    // constructible, so key tracking is exercised through set_button directly

    #[derive(Debug, Default)]
    struct FakeWindow {
        refuse_grab: bool,
        grabbed: Cell<bool>,
    }

    impl CursorHost for FakeWindow {
        type Id = u32;

        fn id(&self) -> u32 {
            1
        }

        fn grab_cursor(&self) -> Result<()> {
            if self.refuse_grab {
                return Err(anyhow!("grab not supported"));
            }
            self.grabbed.set(true);
            Ok(())
        }

        fn release_cursor(&self) {
            self.grabbed.set(false);
        }
    }

    fn attached_source(host: FakeWindow) -> WinitInputSource<FakeWindow> {
        let mut source = WinitInputSource::new(host);
        for listener in Listener::ALL {
            source.attach(listener);
        }
        source
    }

    #[test]
    fn test_events_dropped_without_listener() {
        let mut source = WinitInputSource::new(FakeWindow::default());
        source.process_device_event(&DeviceEvent::MouseMotion { delta: (3.0, 4.0) });
        source.request_pointer_lock();

        assert_eq!(source.poll_event(), None);
        assert!(source.is_pointer_locked());
    }

    #[test]
    fn test_mouse_motion_becomes_mouse_move() {
        let mut source = attached_source(FakeWindow::default());
        source.process_device_event(&DeviceEvent::MouseMotion { delta: (3.0, -4.0) });

        assert_eq!(
            source.poll_event(),
            Some(InputEvent::MouseMove(MouseMovement::new(3.0, -4.0)))
        );
    }

    #[test]
    fn test_lock_request_reports_through_queue() {
        let mut source = attached_source(FakeWindow::default());
        source.request_pointer_lock();

        assert!(source.host().grabbed.get());
        assert_eq!(source.poll_event(), Some(InputEvent::PointerLockChange(Some(1))));

        source.exit_pointer_lock();
        assert!(!source.host().grabbed.get());
        assert_eq!(source.poll_event(), Some(InputEvent::PointerLockChange(None)));
    }

    #[test]
    fn test_refused_grab_reports_error() {
        let mut source = attached_source(FakeWindow {
            refuse_grab: true,
            ..Default::default()
        });
        source.request_pointer_lock();

        assert!(!source.is_pointer_locked());
        assert_eq!(source.poll_event(), Some(InputEvent::PointerLockError));
    }

    #[test]
    fn test_exit_without_lock_is_silent() {
        let mut source = attached_source(FakeWindow::default());
        source.exit_pointer_lock();
        assert_eq!(source.poll_event(), None);
    }

    #[test]
    fn test_focus_loss_releases_lock() {
        let mut source = attached_source(FakeWindow::default());
        source.request_pointer_lock();
        let _ = source.poll_event();
        source.set_button(Button::KeyW, ElementState::Pressed);

        source.process_window_event(&WindowEvent::Focused(false));

        assert!(!source.is_pointer_locked());
        assert!(!source.is_down(Button::KeyW));
        assert_eq!(source.poll_event(), Some(InputEvent::PointerLockChange(None)));
    }

    #[test]
    fn test_detach_discards_pending_events() {
        let mut source = attached_source(FakeWindow::default());
        source.process_device_event(&DeviceEvent::MouseMotion { delta: (1.0, 1.0) });
        source.detach(Listener::MouseMove);

        assert_eq!(source.poll_event(), None);
    }

    #[test]
    fn test_button_tracking() {
        let mut source = WinitInputSource::new(FakeWindow::default());
        source.set_button(Button::KeyW, ElementState::Pressed);
        source.set_button(Button::KeyW, ElementState::Pressed);
        source.set_button(Button::KeyD, ElementState::Pressed);

        assert_eq!(source.get_down_keys(), &[Button::KeyW, Button::KeyD]);

        source.set_button(Button::KeyW, ElementState::Released);
        assert_eq!(source.get_down_keys(), &[Button::KeyD]);
        assert_eq!(source.axis(Button::KeyD, Button::KeyA), 1.0);
    }

    #[test]
    fn test_key_mapping() {
        type Source = WinitInputSource<FakeWindow>;
        assert_eq!(Source::keycode_to_button(KeyCode::KeyW), Some(Button::KeyW));
        assert_eq!(Source::keycode_to_button(KeyCode::ArrowLeft), Some(Button::KeyA));
        assert_eq!(Source::keycode_to_button(KeyCode::KeyQ), None);
        assert_eq!(Source::mouse_button_to_button(MouseButton::Right), None);
    }
}
