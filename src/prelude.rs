//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_framework::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// UI panels
pub use crate::core::ui::{
    CommandSender, HeadlessHost, Panel, PanelContext, PanelError, PanelKey, PanelState, UiError,
    UiManager, UiManagerBuilder, UserData, VisualHost, DEFAULT_GROUP,
};

// Notifications
pub use crate::core::event_bus::EventBus;
pub use crate::core::ui::{PanelClosed, PanelOpened};

// Modules
pub use crate::core::module::{FrameworkModule, ModuleHost};
