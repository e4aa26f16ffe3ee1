//=========================================================================
// Panel Registry
//=========================================================================
//
// Maps each panel key to its single live instance and that instance's
// stacking flags.
//
// Being registered ("cached") is independent of being stacked: a panel is
// registered once by its host and then opened and closed any number of
// times.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Panel, PanelContext, PanelHook, PanelKey, PanelState, VisualHost};

//=== PanelEntry ==========================================================

/// A registered panel together with its manager-owned state.
pub(crate) struct PanelEntry<K: PanelKey> {
    pub(crate) panel: Box<dyn Panel<K>>,
    pub(crate) state: PanelState,
}

impl<K: PanelKey> PanelEntry<K> {
    fn new(panel: Box<dyn Panel<K>>) -> Self {
        Self {
            panel,
            state: PanelState::CACHED,
        }
    }

    /// Updates the visible flag, touching the host only on change.
    pub(crate) fn set_visible<H: VisualHost<K>>(&mut self, key: K, visible: bool, host: &mut H) {
        if self.state.visible == visible {
            return;
        }

        self.state.visible = visible;
        host.set_active(key, visible);
    }

    /// Moves the flags to `target`, firing each implied hook once.
    pub(crate) fn transition_to<H: VisualHost<K>>(
        &mut self,
        target: PanelState,
        ctx: &PanelContext<'_, K>,
        host: &mut H,
    ) {
        let hooks: Vec<PanelHook> = PanelState::transitions(self.state, target).collect();
        for hook in hooks {
            self.fire(hook, ctx, host);
        }
    }

    fn fire<H: VisualHost<K>>(&mut self, hook: PanelHook, ctx: &PanelContext<'_, K>, host: &mut H) {
        let key = ctx.key();
        match hook {
            PanelHook::Pause => {
                self.state.paused = true;
                self.panel.on_pause(ctx);
                if self.panel.hides_when_paused() {
                    self.set_visible(key, false, host);
                }
            }
            PanelHook::Resume => {
                self.state.paused = false;
                self.panel.on_resume(ctx);
                if self.panel.hides_when_paused() {
                    self.set_visible(key, true, host);
                }
            }
            PanelHook::Cover => {
                self.state.covered = true;
                self.panel.on_cover(ctx);
            }
            PanelHook::Reveal => {
                self.state.covered = false;
                self.panel.on_reveal(ctx);
            }
        }
    }
}

//=== PanelRegistry =======================================================

/// Key-indexed store of every panel known to a manager.
pub struct PanelRegistry<K: PanelKey> {
    panels: HashMap<K, PanelEntry<K>>,
}

impl<K: PanelKey> PanelRegistry<K> {
    pub fn new() -> Self {
        Self {
            panels: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Adds a panel under `key`.
    ///
    /// Returns `false` and keeps the existing instance if `key` is already
    /// registered; the rejected panel is dropped.
    pub fn register(&mut self, key: K, panel: Box<dyn Panel<K>>) -> bool {
        if self.panels.contains_key(&key) {
            warn!("Panel {:?} is already registered, keeping the existing instance", key);
            return false;
        }

        debug!("Registered panel {:?}", key);
        self.panels.insert(key, PanelEntry::new(panel));
        true
    }

    /// Removes the panel under `key`, returning it with its last state.
    ///
    /// Unregistering an unknown key is a no-op.
    pub fn unregister(&mut self, key: K) -> Option<(Box<dyn Panel<K>>, PanelState)> {
        let entry = self.panels.remove(&key)?;
        debug!("Unregistered panel {:?}", key);
        Some((entry.panel, entry.state))
    }

    //--- Queries ----------------------------------------------------------

    pub fn contains(&self, key: K) -> bool {
        self.panels.contains_key(&key)
    }

    /// Returns the cached panel for `key`.
    pub fn get(&self, key: K) -> Option<&dyn Panel<K>> {
        self.panels.get(&key).map(|entry| entry.panel.as_ref())
    }

    /// Returns the cached panel for `key` mutably.
    ///
    /// Only the panel is exposed; its stacking flags stay manager-owned.
    pub fn get_mut(&mut self, key: K) -> Option<&mut (dyn Panel<K> + 'static)> {
        self.panels.get_mut(&key).map(|entry| entry.panel.as_mut())
    }

    pub fn state(&self, key: K) -> Option<PanelState> {
        self.panels.get(&key).map(|entry| entry.state)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub(crate) fn entry_mut(&mut self, key: K) -> Option<&mut PanelEntry<K>> {
        self.panels.get_mut(&key)
    }

    pub(crate) fn clear(&mut self) {
        self.panels.clear();
    }
}

impl<K: PanelKey> Default for PanelRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
