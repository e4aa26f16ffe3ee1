//=========================================================================
// UI Manager
//=========================================================================
//
// Owns the panel registry, the groups and the panel → group index, and is
// the only component allowed to mutate a group's stack.
//
// Every open/close/refocus ends with the affected group's refresh pass,
// so pause and cover flags always reflect the current stack order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::HashMap;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::{
    CommandQueue, CommandSender, Panel, PanelClosed, PanelCommand, PanelContext, PanelError,
    PanelKey, PanelOpened, PanelRegistry, PanelState, UiError, UiGroup, UiManagerBuilder,
    UserData, VisualHost,
};
use crate::core::event_bus::EventBus;
use crate::core::module::FrameworkModule;

/// Name of the group panels open into unless told otherwise.
pub const DEFAULT_GROUP: &str = "Default";

//=== UiManager ===========================================================

/// Stack manager for UI panels.
///
/// Panels are registered once under a key and then opened into, closed
/// from, or refocused within named groups. A key is a singleton across the
/// whole manager: a panel is stacked in at most one group at a time.
///
/// # Example
///
/// ```rust
/// # use aetheric_framework::prelude::*;
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Screen { Hud, Pause }
/// impl PanelKey for Screen {}
///
/// struct Hud;
/// impl Panel<Screen> for Hud {}
///
/// struct PauseMenu;
/// impl Panel<Screen> for PauseMenu {}
///
/// let mut ui = UiManager::new(HeadlessHost);
/// ui.register_panel(Screen::Hud, Hud);
/// ui.register_panel(Screen::Pause, PauseMenu);
///
/// ui.open(Screen::Hud).unwrap();
/// ui.open(Screen::Pause).unwrap();
/// assert!(ui.panel_state(Screen::Hud).unwrap().covered);
///
/// ui.close_panel(Screen::Pause);
/// assert!(!ui.panel_state(Screen::Hud).unwrap().covered);
/// ```
pub struct UiManager<K: PanelKey, H: VisualHost<K>> {
    host: H,
    groups: HashMap<String, UiGroup<K, H::Root>>,
    registry: PanelRegistry<K>,
    membership: HashMap<K, String>,
    commands: CommandQueue<K>,
    events: EventBus,
    priority: i32,
    max_commands_per_tick: usize,
}

impl<K: PanelKey, H: VisualHost<K>> UiManager<K, H> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with the default configuration (a single
    /// `"Default"` group at depth 0).
    pub fn new(host: H) -> Self {
        UiManagerBuilder::new().build(host)
    }

    pub(crate) fn with_settings(host: H, priority: i32, max_commands_per_tick: usize) -> Self {
        Self {
            host,
            groups: HashMap::new(),
            registry: PanelRegistry::new(),
            membership: HashMap::new(),
            commands: CommandQueue::new(),
            events: EventBus::new(),
            priority,
            max_commands_per_tick,
        }
    }

    //--- Groups -----------------------------------------------------------

    /// Registers a group, or rebinds an existing one.
    ///
    /// Re-adding an existing group never resets its stack; it only binds
    /// `root` if the group had none, and sweeps index entries whose panel
    /// is gone.
    pub fn add_group(&mut self, name: &str, depth: i32, root: Option<H::Root>) {
        if let Some(group) = self.groups.get_mut(name) {
            if group.root().is_none() {
                if let Some(root) = root {
                    debug!("Binding root {:?} to UI group '{}'", root, name);
                    group.bind_root(root);
                }
            }

            self.sweep_membership();
            return;
        }

        debug!("Adding UI group '{}' at depth {}", name, depth);
        self.groups.insert(name.to_string(), UiGroup::new(name, depth, root));
    }

    /// Registers a group whose root is created by the visual host.
    pub fn create_group(&mut self, name: &str, depth: i32) {
        let needs_root = self.groups.get(name).map_or(true, |group| group.root().is_none());
        let root = if needs_root {
            self.host.create_group_root(name, depth)
        } else {
            None
        };

        self.add_group(name, depth, root);
    }

    pub fn group(&self, name: &str) -> Option<&UiGroup<K, H::Root>> {
        self.groups.get(name)
    }

    /// Group names, lowest depth first.
    pub fn group_names(&self) -> Vec<&str> {
        sorted_groups(&self.groups).into_iter().map(|group| group.name()).collect()
    }

    //--- Registration -----------------------------------------------------

    /// Caches a panel under `key`; the panel starts hidden.
    ///
    /// Returns `false` if `key` already names a live panel, in which case
    /// the existing panel is kept and `panel` is dropped.
    pub fn register_panel<P>(&mut self, key: K, panel: P) -> bool
    where
        P: Panel<K> + 'static,
    {
        if !self.registry.register(key, Box::new(panel)) {
            return false;
        }

        self.host.set_active(key, false);
        true
    }

    /// Forgets the panel under `key`, typically because its displayable
    /// object is being destroyed.
    ///
    /// A stacked panel is dropped from its group without further hooks and
    /// the group is refreshed. Unregistering an unknown key is a no-op.
    pub fn unregister_panel(&mut self, key: K) {
        if self.registry.unregister(key).is_none() {
            return;
        }

        self.host.set_active(key, false);

        if let Some(group_name) = self.membership.remove(&key) {
            debug!("Unregistered panel {:?} was stacked in '{}', dropping it", key, group_name);
            self.refresh_group(&group_name);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_registered(&self, key: K) -> bool {
        self.registry.contains(key)
    }

    /// Whether the panel is currently stacked in some group.
    pub fn has_panel(&self, key: K) -> bool {
        self.membership.contains_key(&key)
    }

    /// Name of the group the panel is stacked in.
    pub fn panel_group(&self, key: K) -> Option<&str> {
        self.membership.get(&key).map(String::as_str)
    }

    pub fn cached_panel(&self, key: K) -> Option<&dyn Panel<K>> {
        self.registry.get(key)
    }

    pub fn cached_panel_mut(&mut self, key: K) -> Option<&mut (dyn Panel<K> + 'static)> {
        self.registry.get_mut(key)
    }

    pub fn panel_state(&self, key: K) -> Option<PanelState> {
        self.registry.state(key)
    }

    /// Every stacked panel, highest group depth first and, within a group,
    /// top of the stack first.
    pub fn open_panels(&self) -> Vec<K> {
        sorted_groups(&self.groups)
            .into_iter()
            .rev()
            .flat_map(|group| group.panels().iter().rev().copied())
            .collect()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Bus carrying [`PanelOpened`] and [`PanelClosed`].
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Sender for deferred commands, e.g. for input callbacks.
    pub fn command_sender(&self) -> CommandSender<K> {
        self.commands.sender().clone()
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    //--- Stack Operations -------------------------------------------------

    /// Opens `key` in [`DEFAULT_GROUP`] without user data.
    pub fn open(&mut self, key: K) -> Result<K, UiError> {
        self.open_panel(key, DEFAULT_GROUP, None)
    }

    /// Opens the panel under `key` on top of `group_name`.
    ///
    /// A panel that is already stacked is refocused in the group it is in,
    /// even if `group_name` names a different group.
    ///
    /// # Errors
    ///
    /// - [`UiError::UnknownGroup`] / [`UiError::UnregisteredPanel`] when a
    ///   lookup fails. A panel whose displayable object was destroyed is
    ///   unregistered and reported as [`UiError::UnregisteredPanel`].
    /// - [`UiError::Lifecycle`] when `on_init` or `on_open` fails; the panel
    ///   is rolled back out of the group before returning.
    pub fn open_panel(&mut self, key: K, group_name: &str, user_data: UserData<'_>) -> Result<K, UiError> {
        if !self.groups.contains_key(group_name) {
            error!("UI group '{}' does not exist", group_name);
            return Err(UiError::UnknownGroup(group_name.to_string()));
        }

        if !self.registry.contains(key) {
            error!("UI panel {:?} is not registered", key);
            return Err(UiError::UnregisteredPanel(format!("{:?}", key)));
        }

        if self.host.is_destroyed(key) {
            error!("UI panel {:?} was destroyed by its host", key);
            self.unregister_panel(key);
            return Err(UiError::UnregisteredPanel(format!("{:?}", key)));
        }

        if let Some(current) = self.membership.get(&key) {
            if current != group_name {
                warn!(
                    "Panel {:?} is already open in group '{}', refocusing it there instead of '{}'",
                    key, current, group_name
                );
            }

            let current = current.clone();
            self.refocus_in_group(key, &current, user_data);
            return Ok(key);
        }

        self.attach_to_group(key, group_name);
        self.open_in_group(key, group_name, user_data)?;
        Ok(key)
    }

    /// Closes a stacked panel.
    ///
    /// Hook order: `on_cover`/`on_pause` (if needed) → `on_close` →
    /// [`PanelClosed`] → `on_release`. Closing a panel that is not stacked
    /// logs an error and does nothing.
    pub fn close_panel(&mut self, key: K) {
        let Some(group_name) = self.membership.remove(&key) else {
            error!("Closing panel {:?} that is not managed by any group", key);
            return;
        };

        let sender = self.commands.sender();
        let ctx = PanelContext::new(key, &group_name, sender);

        let Some(group) = self.groups.get_mut(&group_name) else {
            warn!("Panel {:?} was indexed under missing group '{}'", key, group_name);
            return;
        };

        group.remove_panel(key, &mut self.registry, &mut self.host, sender);

        if let Some(entry) = self.registry.entry_mut(key) {
            entry.panel.on_close(&ctx);
            entry.set_visible(key, false, &mut self.host);
        }

        let pruned = group.refresh(&mut self.registry, &mut self.host, sender);
        debug!("Closed panel {:?} in group '{}'", key, group_name);

        self.events.fire(&PanelClosed {
            key,
            group: group_name.clone(),
        });

        if let Some(entry) = self.registry.entry_mut(key) {
            entry.panel.on_release(&ctx);
        }

        self.settle_pruned(pruned);
    }

    /// Closes every stacked panel, in [`UiManager::open_panels`] order.
    pub fn close_all_panels(&mut self) {
        let snapshot = self.open_panels();
        debug!("Closing all {} open panels", snapshot.len());

        for key in snapshot {
            if self.membership.contains_key(&key) {
                self.close_panel(key);
            }
        }
    }

    /// Moves a stacked panel to the top of its group and calls
    /// `on_refocus`. Unstacked panels are ignored with a warning.
    pub fn refocus_panel(&mut self, key: K, user_data: UserData<'_>) {
        let Some(group_name) = self.membership.get(&key).cloned() else {
            warn!("Refocusing panel {:?} that is not managed by any group", key);
            return;
        };

        self.refocus_in_group(key, &group_name, user_data);
    }

    //--- Tick -------------------------------------------------------------

    /// Ticks unpaused panels, then applies queued commands.
    pub fn update(&mut self, delta_time: f32) {
        self.tick_panels(delta_time);
        self.process_commands();
    }

    /// Applies queued commands, up to the per-tick budget.
    ///
    /// Returns the number of commands applied. Commands queued while these
    /// are applied are processed in the same call if the budget allows.
    pub fn process_commands(&mut self) -> usize {
        let mut processed = 0;

        while processed < self.max_commands_per_tick {
            let Some(command) = self.commands.next() else {
                break;
            };

            self.apply_command(command);
            processed += 1;
        }

        if !self.commands.is_empty() {
            warn!(
                "Panel command backlog: {} commands deferred to the next tick",
                self.commands.len()
            );
        }

        processed
    }

    /// Closes every panel and drops all groups, panels and subscriptions.
    pub fn dispose(&mut self) {
        info!("Disposing UI manager ({} open panels)", self.membership.len());

        self.close_all_panels();
        for group in self.groups.values_mut() {
            group.dispose();
        }

        self.groups.clear();
        self.registry.clear();
        self.membership.clear();

        let dropped = self.commands.clear();
        if dropped > 0 {
            debug!("Dropped {} pending panel commands", dropped);
        }

        self.events.clear_all();
    }

    //--- Internal Helpers -------------------------------------------------

    fn attach_to_group(&mut self, key: K, group_name: &str) {
        let mut stale = Vec::new();

        for (name, group) in self.groups.iter_mut() {
            if name != group_name && group.contains(key) {
                warn!("Panel {:?} was still stacked in group '{}', detaching it", key, name);
                group.remove_panel(key, &mut self.registry, &mut self.host, self.commands.sender());
                stale.push(name.clone());
            }
        }

        for name in stale {
            self.refresh_group(&name);
        }

        self.membership.insert(key, group_name.to_string());
    }

    fn open_in_group(&mut self, key: K, group_name: &str, user_data: UserData<'_>) -> Result<(), UiError> {
        let sender = self.commands.sender();
        let ctx = PanelContext::new(key, group_name, sender);

        let (Some(group), Some(entry)) = (self.groups.get_mut(group_name), self.registry.entry_mut(key)) else {
            return Ok(());
        };

        if let Err(source) = entry.panel.on_init(&ctx, user_data) {
            return Err(self.rollback_open(key, group_name, "on_init", source));
        }

        group.add_panel(key, &mut self.host);

        if let Err(source) = entry.panel.on_open(&ctx, user_data) {
            return Err(self.rollback_open(key, group_name, "on_open", source));
        }

        entry.set_visible(key, true, &mut self.host);

        let pruned = group.refresh(&mut self.registry, &mut self.host, sender);
        let dropped = pruned.contains(&key);
        self.settle_pruned(pruned);

        if dropped {
            error!("Panel {:?} was pruned from group '{}' while opening", key, group_name);
            return Err(UiError::UnregisteredPanel(format!("{:?}", key)));
        }

        debug!("Opened panel {:?} in group '{}'", key, group_name);
        self.events.fire(&PanelOpened {
            key,
            group: group_name.to_string(),
        });

        Ok(())
    }

    fn rollback_open(&mut self, key: K, group_name: &str, hook: &'static str, source: PanelError) -> UiError {
        error!("Opening panel {:?} in group '{}' failed in {}: {}", key, group_name, hook, source);

        if let Some(group) = self.groups.get_mut(group_name) {
            group.remove_panel(key, &mut self.registry, &mut self.host, self.commands.sender());
        }

        self.membership.remove(&key);
        if let Some(entry) = self.registry.entry_mut(key) {
            entry.set_visible(key, false, &mut self.host);
        }

        self.refresh_group(group_name);

        UiError::Lifecycle {
            panel: format!("{:?}", key),
            hook,
            source,
        }
    }

    fn refocus_in_group(&mut self, key: K, group_name: &str, user_data: UserData<'_>) {
        let sender = self.commands.sender();
        let ctx = PanelContext::new(key, group_name, sender);

        let Some(group) = self.groups.get_mut(group_name) else {
            return;
        };

        group.refocus_panel(key, &mut self.host);
        if let Some(entry) = self.registry.entry_mut(key) {
            entry.panel.on_refocus(&ctx, user_data);
        }

        let pruned = group.refresh(&mut self.registry, &mut self.host, sender);
        self.settle_pruned(pruned);
    }

    fn refresh_group(&mut self, group_name: &str) {
        let Some(group) = self.groups.get_mut(group_name) else {
            return;
        };

        let pruned = group.refresh(&mut self.registry, &mut self.host, self.commands.sender());
        self.settle_pruned(pruned);
    }

    /// Drops pruned panels from the index; destroyed ones are unregistered.
    fn settle_pruned(&mut self, pruned: Vec<K>) {
        for key in pruned {
            self.membership.remove(&key);

            if self.host.is_destroyed(key) && self.registry.unregister(key).is_some() {
                debug!("Panel {:?} was destroyed by its host and has been unregistered", key);
            }
        }
    }

    /// Prunes dead panels from every stack, then removes index entries
    /// whose panel is gone or no longer stacked.
    fn sweep_membership(&mut self) {
        let stale: Vec<String> = self
            .groups
            .values()
            .filter(|group| {
                group
                    .panels()
                    .iter()
                    .any(|&key| !self.registry.contains(key) || self.host.is_destroyed(key))
            })
            .map(|group| group.name().to_string())
            .collect();

        for name in stale {
            self.refresh_group(&name);
        }

        let registry = &self.registry;
        let host = &self.host;
        let groups = &self.groups;
        let before = self.membership.len();

        self.membership.retain(|&key, group_name| {
            registry.contains(key)
                && !host.is_destroyed(key)
                && groups.get(group_name.as_str()).map_or(false, |group| group.contains(key))
        });

        let swept = before - self.membership.len();
        if swept > 0 {
            warn!("Swept {} stale entries from the panel index", swept);
        }
    }

    fn tick_panels(&mut self, delta_time: f32) {
        let sender = self.commands.sender();

        for group in sorted_groups(&self.groups) {
            for &key in group.panels() {
                if self.host.is_destroyed(key) {
                    continue;
                }

                let Some(entry) = self.registry.entry_mut(key) else {
                    continue;
                };

                if entry.state.paused {
                    continue;
                }

                let ctx = PanelContext::new(key, group.name(), sender);
                entry.panel.on_update(&ctx, delta_time);
            }
        }
    }

    fn apply_command(&mut self, command: PanelCommand<K>) {
        debug!("Applying panel command {:?}", command);

        match command {
            PanelCommand::Open { key, group, user_data } => {
                if let Err(e) = self.open_panel(key, &group, user_data.as_deref()) {
                    warn!("Deferred open of panel {:?} failed: {}", key, e);
                }
            }
            PanelCommand::Close(key) => self.close_panel(key),
            PanelCommand::Refocus { key, user_data } => self.refocus_panel(key, user_data.as_deref()),
            PanelCommand::CloseAll => self.close_all_panels(),
        }
    }
}

//=== FrameworkModule =====================================================

impl<K, H> FrameworkModule for UiManager<K, H>
where
    K: PanelKey,
    H: VisualHost<K> + 'static,
{
    fn name(&self) -> &str {
        "UiManager"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn on_update(&mut self, delta_time: f32) {
        self.update(delta_time);
    }

    fn shutdown(&mut self) {
        self.dispose();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Helpers =============================================================

/// Groups ordered by depth, then name.
fn sorted_groups<K: PanelKey, R>(groups: &HashMap<String, UiGroup<K, R>>) -> Vec<&UiGroup<K, R>> {
    let mut sorted: Vec<&UiGroup<K, R>> = groups.values().collect();
    sorted.sort_by(|a, b| a.depth().cmp(&b.depth()).then_with(|| a.name().cmp(b.name())));
    sorted
}

//=========================================================================
// Unit Tests
//=========================================================================
