//=========================================================================
// Visual Host
//=========================================================================
//
// Boundary between the panel-stack core and whatever actually displays
// panels (a retained-mode UI tree, an immediate-mode renderer, a TUI...).
//
// The core only ever toggles visibility, reparents panels under a group's
// root, raises a panel to the top of render order, and asks whether the
// displayed object still exists.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;

//=== Internal Dependencies ===============================================

use super::PanelKey;

//=== VisualHost Trait ====================================================

/// Display backend driven by the UI manager.
pub trait VisualHost<K: PanelKey> {
    /// Handle of a group's visual layer.
    type Root: Clone + Debug + 'static;

    /// Shows or hides the panel's displayable object.
    fn set_active(&mut self, panel: K, active: bool);

    /// Moves the panel under the given group root.
    ///
    /// `root` is `None` when the group was registered without one.
    fn reparent(&mut self, panel: K, root: Option<&Self::Root>);

    /// Raises the panel to the top of its root's render order.
    fn move_to_top(&mut self, panel: K);

    /// Whether the displayable object behind `panel` has been destroyed.
    ///
    /// Destroyed panels are pruned from their stack on the next refresh.
    fn is_destroyed(&self, _panel: K) -> bool {
        false
    }

    /// Creates the visual layer for a new group.
    ///
    /// Used by [`super::UiManagerBuilder::build`] and
    /// [`super::UiManager::create_group`]. Hosts without a notion of
    /// layers keep the default and return `None`.
    fn create_group_root(&mut self, _name: &str, _depth: i32) -> Option<Self::Root> {
        None
    }
}

//=== HeadlessHost ========================================================

/// Host that displays nothing.
///
/// Useful for driving panel logic on a server or in tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessHost;

impl<K: PanelKey> VisualHost<K> for HeadlessHost {
    type Root = ();

    fn set_active(&mut self, _panel: K, _active: bool) {}

    fn reparent(&mut self, _panel: K, _root: Option<&Self::Root>) {}

    fn move_to_top(&mut self, _panel: K) {}
}
