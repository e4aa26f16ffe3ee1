//=========================================================================
// UI Group
//=========================================================================
//
// An ordered stack of panels sharing one visual layer.
//
// The stack is a Vec of keys, bottom to top; the last element is the
// topmost panel. Panels themselves live in the PanelRegistry, so a group
// only ever needs the registry (and the host) while it mutates flags.
//
// Refresh walks the stack top-down:
//
//   pause_below = false, cover_below = false
//   for panel in stack.rev():
//       paused  ← pause_below          (pause/resume on change)
//       pause_below |= blocks_lower
//       covered ← cover_below          (cover/reveal on change)
//       cover_below = true
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{CommandSender, PanelContext, PanelKey, PanelRegistry, VisualHost};

//=== UiGroup =============================================================

/// A named, depth-ordered stack of panels.
///
/// Groups are created through [`super::UiManager::add_group`] and only the
/// manager mutates their stacks.
pub struct UiGroup<K: PanelKey, R> {
    name: String,
    depth: i32,
    root: Option<R>,
    panels: Vec<K>,
}

impl<K: PanelKey, R> UiGroup<K, R> {
    pub(crate) fn new(name: impl Into<String>, depth: i32, root: Option<R>) -> Self {
        Self {
            name: name.into(),
            depth,
            root,
            panels: Vec::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Layer order of the group (not of panels within it).
    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn root(&self) -> Option<&R> {
        self.root.as_ref()
    }

    /// Stacked panels, bottom to top.
    pub fn panels(&self) -> &[K] {
        &self.panels
    }

    /// The topmost panel, if any.
    pub fn top(&self) -> Option<K> {
        self.panels.last().copied()
    }

    pub fn contains(&self, key: K) -> bool {
        self.panels.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub(crate) fn bind_root(&mut self, root: R) {
        self.root = Some(root);
    }

    //--- Stack Operations -------------------------------------------------

    /// Pushes `key` on top of the stack.
    ///
    /// Already-stacked panels are left where they are.
    pub(crate) fn add_panel<H>(&mut self, key: K, host: &mut H)
    where
        H: VisualHost<K, Root = R>,
    {
        if self.panels.contains(&key) {
            warn!("UI group '{}' already contains panel {:?}", self.name, key);
            return;
        }

        debug!("Pushing panel {:?} onto group '{}'", key, self.name);
        self.panels.push(key);
        host.reparent(key, self.root.as_ref());
        host.move_to_top(key);
    }

    /// Removes `key` from the stack, covering and pausing it first.
    ///
    /// Returns `false` if the panel was not stacked here.
    pub(crate) fn remove_panel<H>(
        &mut self,
        key: K,
        registry: &mut PanelRegistry<K>,
        host: &mut H,
        commands: &CommandSender<K>,
    ) -> bool
    where
        H: VisualHost<K, Root = R>,
    {
        let Some(pos) = self.panels.iter().position(|&k| k == key) else {
            debug!("Panel {:?} not found in group '{}', skipping removal", key, self.name);
            return false;
        };

        if let Some(entry) = registry.entry_mut(key) {
            let ctx = PanelContext::new(key, &self.name, commands);
            let covered = entry.state.with_covered(true);
            entry.transition_to(covered, &ctx, host);
            let paused = entry.state.with_paused(true);
            entry.transition_to(paused, &ctx, host);
        }

        debug!("Removing panel {:?} from group '{}' at position {}", key, self.name, pos);
        self.panels.remove(pos);
        true
    }

    /// Moves `key` to the top of the stack, appending it if absent.
    pub(crate) fn refocus_panel<H>(&mut self, key: K, host: &mut H)
    where
        H: VisualHost<K, Root = R>,
    {
        if let Some(pos) = self.panels.iter().position(|&k| k == key) {
            self.panels.remove(pos);
        }

        debug!("Refocusing panel {:?} in group '{}'", key, self.name);
        self.panels.push(key);
        host.move_to_top(key);
    }

    /// Recomputes every stacked panel's pause and cover flags.
    ///
    /// Panels that are no longer registered, or whose displayable object
    /// the host reports destroyed, are pruned from the stack. Their keys
    /// are returned so the caller can drop them from its own indexes.
    pub(crate) fn refresh<H>(
        &mut self,
        registry: &mut PanelRegistry<K>,
        host: &mut H,
        commands: &CommandSender<K>,
    ) -> Vec<K>
    where
        H: VisualHost<K, Root = R>,
    {
        let mut pruned = Vec::new();
        let mut pause_below = false;
        let mut cover_below = false;

        for index in (0..self.panels.len()).rev() {
            let key = self.panels[index];
            let alive = !host.is_destroyed(key);

            let entry = match registry.entry_mut(key) {
                Some(entry) if alive => entry,
                _ => {
                    debug!("Pruning dead panel {:?} from group '{}'", key, self.name);
                    self.panels.remove(index);
                    pruned.push(key);
                    continue;
                }
            };

            let ctx = PanelContext::new(key, &self.name, commands);

            let paused = entry.state.with_paused(pause_below);
            entry.transition_to(paused, &ctx, host);
            if entry.panel.blocks_lower() {
                pause_below = true;
            }

            let covered = entry.state.with_covered(cover_below);
            entry.transition_to(covered, &ctx, host);
            cover_below = true;
        }

        pruned
    }

    /// Empties the stack without firing any hooks.
    pub(crate) fn dispose(&mut self) {
        self.panels.clear();
    }
}

//=========================================================================
// Tests
//=========================================================================
