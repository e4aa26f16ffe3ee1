//=========================================================================
// Event Bus
//=========================================================================
//
// Synchronous, type-keyed broadcast between framework modules and their
// observers.
//
// Components:
// - `event_bus`:    the bus itself (subscribe / fire / unsubscribe)
// - `handler_list`: type-erased storage of handlers per event type
//
//=========================================================================

//=== Module Declarations =================================================

mod event_bus;
mod handler_list;

//=== Public API ==========================================================

pub use event_bus::{Event, EventBus, SubscriptionId};
