//! Untyped event payloads for legacy-style integrations.

use std::any::Any;

use crate::EventBus;

/// Event bus carrying untyped payloads.
///
/// Listeners receive `&dyn Any` and downcast to the shape they expect for
/// their topic; there is no compile-time guarantee that producers and
/// consumers of a topic agree. This mirrors the permissive contract of older
/// mod-loader event registries and exists for compatibility with them — new
/// code should prefer a typed [`EventBus`] per payload type.
///
/// ```
/// use modkit_events::AnyEventBus;
///
/// let mut bus = AnyEventBus::new();
/// bus.subscribe_default("chat", |payload| {
///     if let Some(message) = payload.downcast_ref::<String>() {
///         println!("{message}");
///     }
///     Ok(())
/// });
/// bus.dispatch("chat", &"hello".to_string());
/// ```
pub type AnyEventBus = EventBus<dyn Any>;
