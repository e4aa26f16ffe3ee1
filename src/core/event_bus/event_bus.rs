//=========================================================================
// Event Bus
//=========================================================================
//
// Type-safe synchronous broadcast for inter-module notifications.
//
// Architecture:
//   Observers → subscribe<E>() → HashMap<TypeId, Handlers<E>>
//                                        ↓
//   Module ─────→ fire<E>(&event) → every handler, in subscription order
//
// Unlike a queued bus, firing runs each handler immediately on the
// caller's stack, so observers see the emitting module mid-operation.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use super::handler_list::{HandlerList, Handlers};

//=== Public API ==========================================================

/// Marker trait for types that can be fired through the EventBus.
///
/// Automatically implemented for all `'static` types.
pub trait Event: 'static {}

// Blanket implementation
impl<T: 'static> Event for T {}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[cfg(test)]
    pub(super) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

//=========================================================================

/// Synchronous broadcast bus keyed by event type.
///
/// # Example
///
/// ```rust
/// use aetheric_framework::core::event_bus::EventBus;
///
/// struct LevelCleared(u32);
///
/// let mut bus = EventBus::new();
/// bus.subscribe(|e: &LevelCleared| println!("cleared level {}", e.0));
/// assert_eq!(bus.fire(&LevelCleared(3)), 1);
/// ```
pub struct EventBus {
    handlers: HashMap<TypeId, Box<dyn HandlerList>>,
    next_id: u64,
}

impl EventBus {
    /// Creates a new bus with no subscribers.
    pub fn new() -> Self {
        EventBus {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Registers a handler for events of type `E`.
    pub fn subscribe<E, F>(&mut self, handler: F) -> SubscriptionId
    where
        E: Event,
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.handlers_mut::<E>().entries.push((id, Box::new(handler)));
        id
    }

    /// Removes a handler previously returned by `subscribe::<E>`.
    ///
    /// Returns `false` if no such handler is subscribed for `E`.
    pub fn unsubscribe<E: Event>(&mut self, id: SubscriptionId) -> bool {
        let Some(handlers) = self.handlers_ref_mut::<E>() else {
            return false;
        };

        let before = handlers.entries.len();
        handlers.entries.retain(|(entry_id, _)| *entry_id != id);
        before != handlers.entries.len()
    }

    //--- Broadcast --------------------------------------------------------

    /// Invokes every handler subscribed to `E`, in subscription order.
    ///
    /// Returns the number of handlers invoked.
    pub fn fire<E: Event>(&mut self, event: &E) -> usize {
        let Some(handlers) = self.handlers_ref_mut::<E>() else {
            return 0;
        };

        for (_, handler) in handlers.entries.iter_mut() {
            handler(event);
        }

        handlers.entries.len()
    }

    //--- Query API --------------------------------------------------------

    /// Returns the number of handlers subscribed to `E`.
    pub fn handler_count<E: Event>(&self) -> usize {
        self.handlers
            .get(&TypeId::of::<E>())
            .map(|list| list.len())
            .unwrap_or(0)
    }

    /// Returns true if at least one handler is subscribed to `E`.
    pub fn has_subscribers<E: Event>(&self) -> bool {
        self.handler_count::<E>() > 0
    }

    //--- Cleanup ----------------------------------------------------------

    /// Drops every handler subscribed to `E`.
    pub fn clear<E: Event>(&mut self) {
        if let Some(list) = self.handlers.get_mut(&TypeId::of::<E>()) {
            list.clear_handlers();
        }
    }

    /// Drops every handler for every event type.
    pub fn clear_all(&mut self) {
        let dropped: usize = self.handlers.values().map(|list| list.len()).sum();
        for list in self.handlers.values_mut() {
            list.clear_handlers();
        }
        debug!("Event bus cleared ({} handlers dropped)", dropped);
    }

    //--- Internal Helpers -------------------------------------------------

    fn handlers_mut<E: Event>(&mut self) -> &mut Handlers<E> {
        self.handlers
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Handlers::<E>::new()))
            .as_any_mut()
            .downcast_mut::<Handlers<E>>()
            .expect("Type mismatch in EventBus handler list")
    }

    fn handlers_ref_mut<E: Event>(&mut self) -> Option<&mut Handlers<E>> {
        self.handlers
            .get_mut(&TypeId::of::<E>())
            .and_then(|list| list.as_any_mut().downcast_mut::<Handlers<E>>())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
