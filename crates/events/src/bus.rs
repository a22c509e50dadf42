//! Topic-keyed publish/subscribe registry with deterministic delivery order.

use std::cmp::Reverse;
use std::collections::HashMap;

use anyhow::Result;

/// Handle identifying a single registration on an [`EventBus`].
///
/// Returned by [`EventBus::subscribe`] and consumed by
/// [`EventBus::unsubscribe`]. Ids are unique per bus instance, so a callback
/// registered twice yields two distinct handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration<E: ?Sized> {
    id: ListenerId,
    priority: i32,
    callback: Box<dyn FnMut(&E) -> Result<()>>,
}

/// Priority-ordered publish/subscribe registry keyed by string topic names.
///
/// One bus carries one payload type `E`; producers and consumers that share a
/// bus agree on the payload shape at compile time. For heterogeneous legacy
/// payloads see [`AnyEventBus`](crate::AnyEventBus).
///
/// Delivery is synchronous and single-threaded: `dispatch` runs every
/// listener on the calling thread before returning. Listeners run in
/// descending priority order; equal priorities run in registration order.
pub struct EventBus<E: ?Sized> {
    topics: HashMap<String, Vec<Registration<E>>>,
    next_id: u64,
}

impl<E: ?Sized> EventBus<E> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register `listener` under `topic` with the given priority.
    ///
    /// Higher priorities run first. There is no uniqueness constraint:
    /// subscribing an equivalent callback twice produces two registrations,
    /// each invoked once per dispatch. The topic's listener list is re-sorted
    /// eagerly here; the sort is stable, so registration order breaks ties
    /// among equal priorities.
    pub fn subscribe(
        &mut self,
        topic: impl Into<String>,
        priority: i32,
        listener: impl FnMut(&E) -> Result<()> + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        let registrations = self.topics.entry(topic.into()).or_default();
        registrations.push(Registration {
            id,
            priority,
            callback: Box::new(listener),
        });
        registrations.sort_by_key(|registration| Reverse(registration.priority));
        id
    }

    /// Register `listener` under `topic` at the default priority (0).
    pub fn subscribe_default(
        &mut self,
        topic: impl Into<String>,
        listener: impl FnMut(&E) -> Result<()> + 'static,
    ) -> ListenerId {
        self.subscribe(topic, 0, listener)
    }

    /// Remove the registration identified by `id` under `topic`.
    ///
    /// Silent no-op when the topic or the id is unknown. Removing the last
    /// listener drops the topic key entirely, so `has_listeners` flips to
    /// `false` immediately.
    pub fn unsubscribe(&mut self, topic: &str, id: ListenerId) {
        if let Some(registrations) = self.topics.get_mut(topic) {
            registrations.retain(|registration| registration.id != id);
            if registrations.is_empty() {
                self.topics.remove(topic);
            }
        }
    }

    /// Deliver `event` to every listener registered under `topic`.
    ///
    /// Listeners run in descending priority order. A listener returning an
    /// error is logged and skipped over; it never aborts delivery to the
    /// remaining listeners and never propagates to the dispatching caller.
    /// Dispatching to a topic with no listeners is a no-op.
    pub fn dispatch(&mut self, topic: &str, event: &E) {
        let Some(registrations) = self.topics.get_mut(topic) else {
            return;
        };
        tracing::trace!(topic, listeners = registrations.len(), "dispatching event");
        for registration in registrations.iter_mut() {
            if let Err(err) = (registration.callback)(event) {
                tracing::error!(
                    topic,
                    listener = registration.id.0,
                    error = %err,
                    "event listener failed; continuing dispatch"
                );
            }
        }
    }

    /// Whether any listener is registered under `topic`.
    pub fn has_listeners(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Number of registrations under `topic` (0 for unknown topics).
    pub fn listener_count(&self, topic: &str) -> usize {
        self.topics
            .get(topic)
            .map(|registrations| registrations.len())
            .unwrap_or(0)
    }

    /// Iterate over topic names that currently have at least one listener.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    /// Drop every registration under `topic`.
    pub fn clear_topic(&mut self, topic: &str) {
        self.topics.remove(topic);
    }

    /// Drop every registration on the bus.
    pub fn clear(&mut self) {
        self.topics.clear();
    }
}

impl<E: ?Sized> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
