use std::fmt::Debug;

/// Listener slots a controller can attach to an [`InputSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    MouseMove,
    PointerLockChange,
    PointerLockError,
}

impl Listener {
    pub const ALL: [Listener; 3] = [
        Listener::MouseMove,
        Listener::PointerLockChange,
        Listener::PointerLockError,
    ];
}

/// Relative pointer displacement in pixels
///
/// Either axis may be missing; consumers treat a missing axis as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseMovement {
    pub movement_x: Option<f32>,
    pub movement_y: Option<f32>,
}

impl MouseMovement {
    pub fn new(movement_x: f32, movement_y: f32) -> Self {
        Self {
            movement_x: Some(movement_x),
            movement_y: Some(movement_y),
        }
    }
}

/// Event delivered by an [`InputSource`] to an attached listener
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent<E> {
    MouseMove(MouseMovement),
    /// Lock state changed; carries the element now holding the lock, if any
    PointerLockChange(Option<E>),
    PointerLockError,
}

impl<E> InputEvent<E> {
    /// Listener slot that receives this event
    pub fn listener(&self) -> Listener {
        match self {
            InputEvent::MouseMove(_) => Listener::MouseMove,
            InputEvent::PointerLockChange(_) => Listener::PointerLockChange,
            InputEvent::PointerLockError => Listener::PointerLockError,
        }
    }
}

/// Host capability the pointer-lock controller is bound to
///
/// Lock requests complete asynchronously: their outcome arrives later as a
/// [`InputEvent::PointerLockChange`] or [`InputEvent::PointerLockError`] from
/// [`poll_event`](InputSource::poll_event), never as a return value.
pub trait InputSource {
    /// Identity of an element that can hold the pointer lock
    type Element: PartialEq + Debug;

    /// Element lock requests are made for
    fn element(&self) -> Self::Element;

    /// Start delivering events for `listener`
    fn attach(&mut self, listener: Listener);

    /// Stop delivering events for `listener`
    fn detach(&mut self, listener: Listener);

    /// Next pending event for an attached listener
    fn poll_event(&mut self) -> Option<InputEvent<Self::Element>>;

    fn request_pointer_lock(&mut self);

    fn exit_pointer_lock(&mut self);
}
