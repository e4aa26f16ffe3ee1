//=========================================================================
// UI Notifications
//=========================================================================
//
// Events broadcast synchronously on the manager's EventBus.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::PanelKey;

//=== Events ==============================================================

/// Fired after a panel was opened and its group refreshed.
///
/// Not fired for refocus, nor when an open fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOpened<K: PanelKey> {
    pub key: K,
    pub group: String,
}

/// Fired after a panel left its group and was hidden.
///
/// The panel is still registered while observers run; its `on_release`
/// hook is invoked only after every observer returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelClosed<K: PanelKey> {
    pub key: K,
    pub group: String,
}
