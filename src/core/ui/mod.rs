//=========================================================================
// UI System
//=========================================================================
//
// Stack-based UI panel management.
//
// Architecture:
//   UiManager
//     ├─ registry:   PanelRegistry<K>            (key → panel + state)
//     ├─ groups:     HashMap<String, UiGroup>    (name → ordered stack)
//     ├─ membership: HashMap<K, String>          (key → owning group)
//     ├─ commands:   CommandQueue<K>             (deferred hook requests)
//     └─ events:     EventBus                    (open/close notifications)
//
// Flow:
//   open/close/refocus → UiGroup stack mutation → UiGroup::refresh()
//     → pause/cover hooks → PanelOpened / PanelClosed
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;

//=== Module Declarations =================================================

mod builder;
mod command_queue;
mod error;
mod events;
mod group;
mod host;
mod panel_state;
mod registry;
mod ui_manager;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use builder::{GroupSpec, UiManagerBuilder};
pub use command_queue::{CommandSender, PanelCommand};
pub(crate) use command_queue::CommandQueue;
pub use error::{PanelError, UiError};
pub use events::{PanelClosed, PanelOpened};
pub use group::UiGroup;
pub use host::{HeadlessHost, VisualHost};
pub use panel_state::{PanelHook, PanelState};
pub use registry::PanelRegistry;
pub use ui_manager::{UiManager, DEFAULT_GROUP};

//=== Panel Key Trait =====================================================

/// Marker trait for panel identifiers.
///
/// A key names exactly one live panel within a manager. Typically
/// implemented by a game-specific enum.
pub trait PanelKey: Clone + Copy + Eq + Hash + Debug + 'static {}

/// Opaque caller data forwarded to `on_init`, `on_open` and `on_refocus`.
pub type UserData<'a> = Option<&'a dyn Any>;

//=== Panel Context =======================================================

/// Read-only view handed to every panel hook.
///
/// Hooks cannot reach the manager directly; stack changes requested from
/// a hook go through [`PanelContext::commands`] and are applied at the
/// next tick boundary.
pub struct PanelContext<'a, K: PanelKey> {
    key: K,
    group: &'a str,
    commands: &'a CommandSender<K>,
}

impl<'a, K: PanelKey> PanelContext<'a, K> {
    pub(crate) fn new(key: K, group: &'a str, commands: &'a CommandSender<K>) -> Self {
        Self { key, group, commands }
    }

    /// Key of the panel receiving the hook.
    pub fn key(&self) -> K {
        self.key
    }

    /// Name of the group the panel is (or was just) stacked in.
    pub fn group(&self) -> &str {
        self.group
    }

    /// Command sender for deferred stack changes.
    pub fn commands(&self) -> &CommandSender<K> {
        self.commands
    }

    /// Queues a request to close the panel receiving this hook.
    pub fn close_self(&self) {
        self.commands.close(self.key);
    }
}

//=== Panel Trait =========================================================

/// A stackable UI unit driven entirely through lifecycle hooks.
///
/// Panels hold no stacking logic and no stacking flags; the manager keeps
/// each panel's [`PanelState`] and decides which hooks to invoke.
///
/// # Minimal Implementation
///
/// Every hook has a default empty body:
///
/// ```rust
/// # use aetheric_framework::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Pause }
/// # impl PanelKey for Screen {}
/// struct PauseMenu;
///
/// impl Panel<Screen> for PauseMenu {}
/// ```
///
/// # Hook Order
///
/// Opening: `on_init` → `on_open` → `on_resume` → `on_reveal`.
/// Closing: `on_cover` → `on_pause` → `on_close` → `on_release`.
pub trait Panel<K: PanelKey> {
    /// Called before the panel is pushed onto its group's stack.
    fn on_init(&mut self, _ctx: &PanelContext<'_, K>, _user_data: UserData<'_>) -> Result<(), PanelError> {
        Ok(())
    }

    /// Called after the panel was pushed; the panel becomes visible.
    fn on_open(&mut self, _ctx: &PanelContext<'_, K>, _user_data: UserData<'_>) -> Result<(), PanelError> {
        Ok(())
    }

    /// Called after the panel left its group; the panel becomes hidden.
    fn on_close(&mut self, _ctx: &PanelContext<'_, K>) {}

    /// Called last on close, after observers saw the close notification.
    fn on_release(&mut self, _ctx: &PanelContext<'_, K>) {}

    /// A blocking panel was stacked above this one.
    fn on_pause(&mut self, _ctx: &PanelContext<'_, K>) {}

    /// No blocking panel remains above this one.
    fn on_resume(&mut self, _ctx: &PanelContext<'_, K>) {}

    /// Another panel was stacked above this one.
    fn on_cover(&mut self, _ctx: &PanelContext<'_, K>) {}

    /// This panel is the top of its group again.
    fn on_reveal(&mut self, _ctx: &PanelContext<'_, K>) {}

    /// Opened again while already stacked; the panel moved to the top.
    fn on_refocus(&mut self, _ctx: &PanelContext<'_, K>, _user_data: UserData<'_>) {}

    /// Called every module tick while the panel is stacked and not paused.
    fn on_update(&mut self, _ctx: &PanelContext<'_, K>, _delta_time: f32) {}

    /// Whether panels below this one are paused.
    ///
    /// HUD-style overlays return `false` so the panels underneath keep
    /// ticking.
    fn blocks_lower(&self) -> bool {
        true
    }

    /// Whether pausing hides the panel (and resuming shows it again).
    fn hides_when_paused(&self) -> bool {
        true
    }
}
