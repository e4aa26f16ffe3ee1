//=========================================================================
// Core Systems
//=========================================================================
//
// Framework subsystems, all driven from the caller's thread.
//
// Architecture:
//   ModuleHost
//     └─ UiManager (FrameworkModule)
//          ├─ UiGroup stacks + PanelRegistry
//          ├─ CommandQueue  (deferred requests from panel hooks)
//          └─ EventBus      (PanelOpened / PanelClosed)
//
// Nothing here spawns threads; the host application calls
// `ModuleHost::update` once per frame.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_bus;
pub mod module;
pub mod ui;

//=== Public API ==========================================================

pub use event_bus::{Event, EventBus, SubscriptionId};
pub use module::{FrameworkModule, ModuleHost};
