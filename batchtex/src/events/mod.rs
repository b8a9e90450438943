//! Texture lifecycle event channel.
//!
//! The registry announces every creation and destruction through an
//! [`EventChannel`]. Delivery is synchronous and ordered:
//!
//! - `Created` reaches every observer before `create_texture` returns, so
//!   it precedes any upload or destruction of that id.
//! - `Destroyed` is dispatched after the registry has dropped the
//!   texture's metadata but before the backend frees the native handle,
//!   which the event carries.
//!
//! ```text
//! TextureRegistry ──► EventChannel ──┬──► renderer mirror (Fn closure)
//!                     (observer list) ├──► EventLog (diagnostics)
//!                                     └──► EventForwarder ──► mpsc receiver
//! ```
//!
//! Observers receive `&TextureEvent` while the registry is mutably
//! borrowed, so they cannot subscribe, unsubscribe or touch the registry
//! from inside a handler.

mod forwarder;
mod observer;

pub use forwarder::EventForwarder;
pub use observer::{EventLog, SharedTextureObserver, TextureEvent, TextureObserver};

use std::fmt;

use tracing::trace;

/// Token returned by [`EventChannel::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of observers.
pub struct EventChannel<N> {
    observers: Vec<(SubscriptionId, SharedTextureObserver<N>)>,
    next_subscription: u64,
}

impl<N> EventChannel<N> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Attach an observer. It receives events in subscription order.
    pub fn subscribe(&mut self, observer: SharedTextureObserver<N>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Detach an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver an event to every observer, in order.
    pub fn publish(&self, event: &TextureEvent<N>) {
        trace!(
            id = %event.id(),
            created = event.is_created(),
            observers = self.observers.len(),
            "dispatching texture event"
        );
        for (_, observer) in &self.observers {
            observer.on_texture_event(event);
        }
    }
}

impl<N> Default for EventChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for EventChannel<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureId;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn destroyed(raw: u32) -> TextureEvent<()> {
        TextureEvent::Destroyed {
            id: TextureId::from_raw(raw),
            native: (),
        }
    }

    #[test]
    fn test_publish_reaches_all_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut channel: EventChannel<()> = EventChannel::new();

        for tag in ["first", "second"] {
            let order = Arc::clone(&order);
            channel.subscribe(Arc::new(move |_: &TextureEvent<()>| {
                order.lock().push(tag);
            }));
        }

        channel.publish(&destroyed(1));
        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let log: Arc<EventLog<()>> = Arc::new(EventLog::new());
        let mut channel: EventChannel<()> = EventChannel::new();
        let sub = channel.subscribe(log.clone());
        assert_eq!(channel.subscriber_count(), 1);

        assert!(channel.unsubscribe(sub));
        assert!(!channel.unsubscribe(sub));
        channel.publish(&destroyed(1));
        assert!(log.is_empty());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let channel: EventChannel<()> = EventChannel::default();
        channel.publish(&destroyed(1));
        assert_eq!(channel.subscriber_count(), 0);
    }
}
