//! First-person mouse-look driven by pointer lock
//!
//! [`PointerLockControls`] wraps a [`PerspectiveCamera`] and an [`InputSource`].
//! While the source reports that the bound element holds the pointer lock,
//! relative mouse movement turns the camera: horizontal movement changes yaw
//! without bound, vertical movement changes pitch clamped to straight up/down.

mod events;
mod source;

use std::f32::consts::FRAC_PI_2;

use glam::Quat;

use crate::camera::PerspectiveCamera;
use crate::math::{Euler, EulerOrder};

pub use events::{ControlsEvent, EventDispatcher, ListenerId};
pub use source::{InputEvent, InputSource, Listener, MouseMovement};

/// Radians of rotation per pixel of mouse movement
pub const LOOK_SENSITIVITY: f32 = 0.002;

pub struct PointerLockControls<S: InputSource> {
    camera: PerspectiveCamera,
    source: S,
    events: EventDispatcher<ControlsEvent>,
    /// Yaw/pitch accumulator, always in YXZ order
    euler: Euler,
    /// Orientation last written to the camera
    written: Option<Quat>,
    is_locked: bool,
    connected: bool,
    sensitivity: f32,
}

impl<S: InputSource> PointerLockControls<S> {
    /// Bind `camera` to `source` and start listening
    pub fn new(camera: PerspectiveCamera, source: S) -> Self {
        let mut controls = Self {
            camera,
            source,
            events: EventDispatcher::new(),
            euler: Euler::new(0.0, 0.0, 0.0, EulerOrder::Yxz),
            written: None,
            is_locked: false,
            connected: false,
            sensitivity: LOOK_SENSITIVITY,
        };
        controls.connect();
        controls
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Attach all listeners; does nothing if already connected
    pub fn connect(&mut self) {
        if self.connected {
            return;
        }
        for listener in Listener::ALL {
            self.source.attach(listener);
        }
        self.connected = true;
    }

    /// Detach all listeners; does nothing if not connected
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        for listener in Listener::ALL {
            self.source.detach(listener);
        }
        self.connected = false;
    }

    pub fn dispose(&mut self) {
        self.disconnect();
    }

    /// Ask the source for pointer lock. The outcome arrives as a later event.
    pub fn lock(&mut self) {
        self.source.request_pointer_lock();
    }

    /// Ask the source to release pointer lock. The outcome arrives as a later event.
    pub fn unlock(&mut self) {
        self.source.exit_pointer_lock();
    }

    /// Handle every event the source has queued, returning how many there were
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.source.poll_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: InputEvent<S::Element>) {
        if !self.connected {
            return;
        }
        match event {
            InputEvent::MouseMove(movement) => self.on_mouse_move(movement),
            InputEvent::PointerLockChange(element) => self.on_pointer_lock_change(element),
            InputEvent::PointerLockError => self.on_pointer_lock_error(),
        }
    }

    fn on_mouse_move(&mut self, movement: MouseMovement) {
        if !self.is_locked {
            return;
        }

        let movement_x = movement.movement_x.unwrap_or(0.0);
        let movement_y = movement.movement_y.unwrap_or(0.0);

        // Resync only when someone else rotated the camera, so yaw keeps accumulating
        if self.written != Some(self.camera.quaternion) {
            self.euler.set_from_quat(self.camera.quaternion);
        }

        self.euler.y -= movement_x * self.sensitivity;
        self.euler.x -= movement_y * self.sensitivity;
        self.euler.x = self.euler.x.clamp(-FRAC_PI_2, FRAC_PI_2);

        let orientation = self.euler.to_quat();
        self.camera.quaternion = orientation;
        self.written = Some(orientation);

        self.events.dispatch_event(ControlsEvent::Change);
    }

    fn on_pointer_lock_change(&mut self, element: Option<S::Element>) {
        let locked = element.as_ref() == Some(&self.source.element());
        if locked == self.is_locked {
            return;
        }

        self.is_locked = locked;
        if locked {
            log::debug!("pointer locked to {:?}", self.source.element());
            self.events.dispatch_event(ControlsEvent::Lock);
        } else {
            log::debug!("pointer lock released");
            self.events.dispatch_event(ControlsEvent::Unlock);
        }
    }

    fn on_pointer_lock_error(&mut self) {
        log::error!("PointerLockControls: unable to use pointer lock");
    }

    /// Move along the horizontal forward direction; negative moves backward
    pub fn move_forward(&mut self, distance: f32) {
        let forward = self.camera.up.cross(self.camera.right());
        self.camera.position += forward * distance;
    }

    /// Move along the camera's local right axis; negative moves left
    pub fn move_right(&mut self, distance: f32) {
        let right = self.camera.right();
        self.camera.position += right * distance;
    }

    pub fn add_event_listener(
        &mut self,
        kind: ControlsEvent,
        callback: impl FnMut(ControlsEvent) + 'static,
    ) -> ListenerId {
        self.events.add_event_listener(kind, callback)
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_event_listener(id)
    }

    pub fn has_event_listener(&self, kind: ControlsEvent) -> bool {
        self.events.has_event_listener(kind)
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Orientation accumulator as last written to the camera
    pub fn euler(&self) -> Euler {
        self.euler
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: InputSource> AsRef<PerspectiveCamera> for PointerLockControls<S> {
    fn as_ref(&self) -> &PerspectiveCamera {
        &self.camera
    }
}

impl<S: InputSource> AsMut<PerspectiveCamera> for PointerLockControls<S> {
    fn as_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::collections::{HashSet, VecDeque};

    const ELEMENT: u8 = 7;

    #[derive(Default)]
    struct MockSource {
        attached: HashSet<Listener>,
        queue: VecDeque<InputEvent<u8>>,
        lock_requests: usize,
    }

    impl InputSource for MockSource {
        type Element = u8;

        fn element(&self) -> u8 {
            ELEMENT
        }

        fn attach(&mut self, listener: Listener) {
            self.attached.insert(listener);
        }

        fn detach(&mut self, listener: Listener) {
            self.attached.remove(&listener);
        }

        fn poll_event(&mut self) -> Option<InputEvent<u8>> {
            self.queue.pop_front()
        }

        fn request_pointer_lock(&mut self) {
            self.lock_requests += 1;
        }

        fn exit_pointer_lock(&mut self) {}
    }

    fn locked_controls() -> PointerLockControls<MockSource> {
        let mut controls = PointerLockControls::new(PerspectiveCamera::default(), MockSource::default());
        controls.handle_event(InputEvent::PointerLockChange(Some(ELEMENT)));
        controls
    }

    #[test]
    fn test_new_connects_all_listeners() {
        let controls = PointerLockControls::new(PerspectiveCamera::default(), MockSource::default());
        assert!(controls.is_connected());
        assert_eq!(controls.source().attached.len(), 3);
        assert!(!controls.is_locked());
        assert_eq!(controls.sensitivity(), LOOK_SENSITIVITY);
    }

    #[test]
    fn test_lock_only_requests() {
        let mut controls = PointerLockControls::new(PerspectiveCamera::default(), MockSource::default());
        controls.lock();
        assert_eq!(controls.source().lock_requests, 1);
        assert!(!controls.is_locked());
    }

    #[test]
    fn test_pump_drains_queue_in_order() {
        let mut controls = PointerLockControls::new(PerspectiveCamera::default(), MockSource::default());
        controls.source_mut().queue.extend([
            InputEvent::PointerLockChange(Some(ELEMENT)),
            InputEvent::MouseMove(MouseMovement::new(50.0, 0.0)),
        ]);

        assert_eq!(controls.pump_events(), 2);
        assert!(controls.is_locked());
        assert!((controls.euler().yaw() - -0.1).abs() < 1e-6);
    }

    #[test]
    fn test_lock_change_for_other_element_is_not_a_lock() {
        let mut controls = PointerLockControls::new(PerspectiveCamera::default(), MockSource::default());
        controls.handle_event(InputEvent::PointerLockChange(Some(ELEMENT + 1)));
        assert!(!controls.is_locked());
    }

    #[test]
    fn test_missing_axes_default_to_zero() {
        let mut controls = locked_controls();
        controls.handle_event(InputEvent::MouseMove(MouseMovement {
            movement_x: None,
            movement_y: Some(-100.0),
        }));

        assert!(controls.euler().yaw().abs() < 1e-6);
        assert!((controls.euler().pitch() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_external_rotation_is_picked_up() {
        let mut controls = locked_controls();
        controls.camera_mut().quaternion = Quat::from_rotation_y(1.0);

        controls.handle_event(InputEvent::MouseMove(MouseMovement::new(100.0, 0.0)));
        assert!((controls.euler().yaw() - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_move_forward_ignores_pitch() {
        let mut controls = locked_controls();
        controls.handle_event(InputEvent::MouseMove(MouseMovement::new(0.0, -300.0)));

        controls.move_forward(1.0);
        assert!(controls.camera().position.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_move_right_follows_local_x() {
        let mut controls = PointerLockControls::new(PerspectiveCamera::default(), MockSource::default());
        controls.move_right(2.0);
        assert!(controls.camera().position.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
    }
}
