/// Notifications emitted by [`PointerLockControls`](super::PointerLockControls)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlsEvent {
    /// Camera orientation changed
    Change,
    /// Pointer lock acquired
    Lock,
    /// Pointer lock released
    Unlock,
}

/// Handle returned by [`EventDispatcher::add_event_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration<E> {
    id: ListenerId,
    kind: E,
    callback: Box<dyn FnMut(E)>,
}

/// Typed publish/subscribe registry keyed by event kind
pub struct EventDispatcher<E> {
    listeners: Vec<Registration<E>>,
    next_id: u64,
}

impl<E: Copy + PartialEq> EventDispatcher<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribe `callback` to events equal to `kind`
    pub fn add_event_listener(&mut self, kind: E, callback: impl FnMut(E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Registration {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns false if `id` was not registered
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|registration| registration.id != id);
        self.listeners.len() != before
    }

    pub fn has_event_listener(&self, kind: E) -> bool {
        self.listeners.iter().any(|registration| registration.kind == kind)
    }

    /// Invoke every listener of `event`'s kind in registration order
    pub fn dispatch_event(&mut self, event: E) {
        for registration in self.listeners.iter_mut().filter(|r| r.kind == event) {
            (registration.callback)(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E: Copy + PartialEq> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
