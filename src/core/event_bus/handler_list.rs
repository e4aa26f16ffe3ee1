//=========================================================================
// Handler List Trait
//=========================================================================
//
// Type-erased trait for per-event handler lists, allowing storage in a
// HashMap keyed by TypeId without knowing the concrete event type.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::event_bus::{Event, SubscriptionId};

//=========================================================================

/// Boxed handler for events of type `E`.
pub(super) type Handler<E> = Box<dyn FnMut(&E)>;

/// Subscribed handlers for one event type, in subscription order.
pub(super) struct Handlers<E: Event> {
    pub(super) entries: Vec<(SubscriptionId, Handler<E>)>,
}

impl<E: Event> Handlers<E> {
    pub(super) fn new() -> Self {
        Self { entries: Vec::new() }
    }
}

//=========================================================================

/// Type-erased operations on a handler list.
pub(super) trait HandlerList {
    /// Drops every handler while keeping the allocation.
    fn clear_handlers(&mut self);

    /// Returns the number of subscribed handlers.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Downcasts to `&dyn Any` for type-specific operations.
    fn as_any(&self) -> &dyn Any;

    /// Downcasts to `&mut dyn Any` for type-specific operations.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> HandlerList for Handlers<E> {
    fn clear_handlers(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;

    #[test]
    fn clear_handlers_via_trait() {
        let mut handlers = Handlers::<Ping>::new();
        handlers.entries.push((SubscriptionId::from_raw(1), Box::new(|_: &Ping| {})));
        handlers.entries.push((SubscriptionId::from_raw(2), Box::new(|_: &Ping| {})));

        let list: &mut dyn HandlerList = &mut handlers;
        assert_eq!(list.len(), 2);
        list.clear_handlers();
        assert!(list.is_empty());
    }

    #[test]
    fn downcast_recovers_concrete_list() {
        let mut handlers = Handlers::<Ping>::new();
        let list: &mut dyn HandlerList = &mut handlers;

        assert!(list.as_any().downcast_ref::<Handlers<Ping>>().is_some());
        assert!(list.as_any().downcast_ref::<Handlers<u32>>().is_none());

        let concrete = list.as_any_mut().downcast_mut::<Handlers<Ping>>();
        assert!(concrete.is_some());
    }
}
