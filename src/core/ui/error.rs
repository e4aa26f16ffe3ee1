//=========================================================================
// UI Errors
//=========================================================================
//
// Error types surfaced by the panel-stack manager.
//
//   PanelError: raised by a panel's own fallible hooks (init/open)
//   UiError:    returned to callers of UiManager::open_panel
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== PanelError ==========================================================

/// Failure reported by a panel from one of its fallible lifecycle hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelError {
    message: String,
}

impl PanelError {
    /// Creates a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Returns the message supplied by the panel.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PanelError {}

//=== UiError =============================================================

/// Errors returned when opening a panel.
///
/// `UnknownGroup` and `UnregisteredPanel` are recoverable lookups that
/// leave every stack untouched. `Lifecycle` means a panel hook failed
/// part-way through opening; the panel has been rolled back out of its
/// group before the error is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// No group is registered under this name.
    UnknownGroup(String),

    /// No panel is registered under this key.
    UnregisteredPanel(String),

    /// A panel hook failed while the panel was being opened.
    Lifecycle {
        panel: String,
        hook: &'static str,
        source: PanelError,
    },
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGroup(name) => write!(f, "UI group '{}' does not exist", name),
            Self::UnregisteredPanel(key) => write!(f, "UI panel {} is not registered", key),
            Self::Lifecycle { panel, hook, source } => {
                write!(f, "UI panel {} failed in {}: {}", panel, hook, source)
            }
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lifecycle { source, .. } => Some(source),
            _ => None,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
