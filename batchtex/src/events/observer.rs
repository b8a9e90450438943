//! Lifecycle events and the observer trait.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::texture::{TextureFormat, TextureId};

/// A texture lifecycle notification.
///
/// `N` is the backend's native handle type. Both variants carry the
/// handle so a mirror of the registry (a renderer holding bind groups, a
/// debug overlay) can update itself without calling back into the
/// registry.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureEvent<N> {
    /// A texture was created. Fired before `create_texture` returns.
    Created {
        id: TextureId,
        width: u32,
        height: u32,
        format: TextureFormat,
        native: N,
    },
    /// A texture was destroyed. Its metadata is already gone from the
    /// registry; the native handle is released right after dispatch.
    Destroyed { id: TextureId, native: N },
}

impl<N> TextureEvent<N> {
    /// The texture this event is about.
    pub fn id(&self) -> TextureId {
        match self {
            TextureEvent::Created { id, .. } | TextureEvent::Destroyed { id, .. } => *id,
        }
    }

    /// The native handle carried by the event.
    pub fn native(&self) -> &N {
        match self {
            TextureEvent::Created { native, .. } | TextureEvent::Destroyed { native, .. } => {
                native
            }
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, TextureEvent::Created { .. })
    }
}

/// Receives texture lifecycle events from a registry.
///
/// Handlers run synchronously on the thread that mutates the registry,
/// in subscription order. They get a shared reference to the event only,
/// so they cannot reach back into the registry while it is dispatching.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a registry can be moved to,
/// or shared with, a dedicated render thread.
pub trait TextureObserver<N>: Send + Sync {
    /// Handle one event.
    fn on_texture_event(&self, event: &TextureEvent<N>);
}

impl<N, F> TextureObserver<N> for F
where
    F: Fn(&TextureEvent<N>) + Send + Sync,
{
    fn on_texture_event(&self, event: &TextureEvent<N>) {
        self(event)
    }
}

/// Shared observer handle as stored by the event channel.
pub type SharedTextureObserver<N> = Arc<dyn TextureObserver<N>>;

/// Observer that records every event it sees.
///
/// Handy for diagnostics and tests. Clone the `Arc` before subscribing to
/// keep a handle for reading the log.
#[derive(Debug)]
pub struct EventLog<N> {
    events: Mutex<Vec<TextureEvent<N>>>,
}

impl<N> Default for EventLog<N> {
    fn default() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

impl<N: Clone> EventLog<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events, oldest first.
    pub fn events(&self) -> Vec<TextureEvent<N>> {
        self.events.lock().clone()
    }

    /// Remove and return all recorded events.
    pub fn drain(&self) -> Vec<TextureEvent<N>> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl<N: Clone + Send + Sync> TextureObserver<N> for EventLog<N> {
    fn on_texture_event(&self, event: &TextureEvent<N>) {
        self.events.lock().push(event.clone());
    }
}
