//! Channel-backed observer.

use tokio::sync::mpsc;
use tracing::warn;

use super::{TextureEvent, TextureObserver};

/// Forwards events into an unbounded tokio channel.
///
/// Sending never blocks, so the registry's synchronous dispatch is not
/// held up by a slow consumer, and channel order matches dispatch order.
/// Consumers drain the receiver on their own schedule (an async task, or
/// `try_recv` once per frame).
///
/// # Example
///
/// ```
/// use batchtex::events::EventForwarder;
/// use batchtex::texture::{SoftwareBackend, SurfaceHandle, TextureFormat, TextureRegistry};
/// use std::sync::Arc;
///
/// let mut registry = TextureRegistry::new(SoftwareBackend::new());
/// let (forwarder, mut rx) = EventForwarder::<SurfaceHandle>::channel();
/// registry.subscribe(Arc::new(forwarder));
///
/// let id = registry.create_texture(4, 4, TextureFormat::Rgba8).unwrap();
/// let event = rx.try_recv().unwrap();
/// assert_eq!(event.id(), id);
/// ```
#[derive(Debug)]
pub struct EventForwarder<N> {
    tx: mpsc::UnboundedSender<TextureEvent<N>>,
}

impl<N> EventForwarder<N> {
    pub fn new(tx: mpsc::UnboundedSender<TextureEvent<N>>) -> Self {
        Self { tx }
    }

    /// Create a forwarder together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TextureEvent<N>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Whether the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<N: Clone + Send + Sync> TextureObserver<N> for EventForwarder<N> {
    fn on_texture_event(&self, event: &TextureEvent<N>) {
        if self.tx.send(event.clone()).is_err() {
            warn!(id = %event.id(), "Texture event receiver dropped, event discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{TextureFormat, TextureId};

    fn destroyed(raw: u32) -> TextureEvent<u32> {
        TextureEvent::Destroyed {
            id: TextureId::from_raw(raw),
            native: raw * 10,
        }
    }

    #[test]
    fn test_forwarder_preserves_order() {
        let (forwarder, mut rx) = EventForwarder::<u32>::channel();
        forwarder.on_texture_event(&TextureEvent::Created {
            id: TextureId::from_raw(1),
            width: 2,
            height: 2,
            format: TextureFormat::Rgba8,
            native: 10,
        });
        forwarder.on_texture_event(&destroyed(1));

        assert!(rx.try_recv().unwrap().is_created());
        assert_eq!(rx.try_recv().unwrap(), destroyed(1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forwarder_survives_dropped_receiver() {
        let (forwarder, rx) = EventForwarder::<u32>::channel();
        drop(rx);
        assert!(forwarder.is_closed());
        forwarder.on_texture_event(&destroyed(2));
    }
}
