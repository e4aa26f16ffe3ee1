//=========================================================================
// UI Manager Builder
//=========================================================================
//
// Fluent configuration for a UiManager.
//
// ```text
//   UiManagerBuilder ──build(host)──> UiManager
//       │
//       ├─ with_group() / with_groups()
//       ├─ with_priority()
//       └─ with_max_commands_per_tick()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;

use log::info;

//=== Internal Dependencies ===============================================

use super::{PanelKey, UiManager, VisualHost, DEFAULT_GROUP};

//=== GroupSpec ===========================================================

/// Name and depth of a group created at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    pub name: String,
    pub depth: i32,
}

impl GroupSpec {
    pub fn new(name: impl Into<String>, depth: i32) -> Self {
        Self {
            name: name.into(),
            depth,
        }
    }
}

//=== UiManagerBuilder ====================================================

/// Builder for configuring and constructing a [`UiManager`].
///
/// # Default Values
///
/// - Groups: a single `"Default"` group at depth 0
/// - Module priority: 0
/// - Commands applied per tick: 64
///
/// # Example
///
/// ```rust
/// # use aetheric_framework::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Hud }
/// # impl PanelKey for Screen {}
/// let ui = UiManagerBuilder::<Screen, HeadlessHost>::new()
///     .with_group("Popup", 10)
///     .with_priority(100)
///     .build(HeadlessHost);
///
/// assert_eq!(ui.group_names(), vec!["Default", "Popup"]);
/// ```
pub struct UiManagerBuilder<K: PanelKey, H: VisualHost<K>> {
    groups: Vec<GroupSpec>,
    priority: i32,
    max_commands_per_tick: usize,
    _phantom: PhantomData<(K, H)>,
}

impl<K: PanelKey, H: VisualHost<K>> UiManagerBuilder<K, H> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            groups: vec![GroupSpec::new(DEFAULT_GROUP, 0)],
            priority: 0,
            max_commands_per_tick: 64,
            _phantom: PhantomData,
        }
    }

    /// Adds a group to create at build time.
    pub fn with_group(mut self, name: impl Into<String>, depth: i32) -> Self {
        self.groups.push(GroupSpec::new(name, depth));
        self
    }

    /// Replaces the build-time groups, including the default one.
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = GroupSpec>) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }

    /// Sets the priority the manager reports as a framework module.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets how many deferred commands are applied per tick.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero.
    pub fn with_max_commands_per_tick(mut self, max: usize) -> Self {
        assert!(max > 0, "Command budget must be positive");
        self.max_commands_per_tick = max;
        self
    }

    /// Builds the manager, asking `host` for a root per group.
    pub fn build(self, host: H) -> UiManager<K, H> {
        info!(
            "Building UI manager ({} groups, priority: {}, commands/tick: {})",
            self.groups.len(),
            self.priority,
            self.max_commands_per_tick
        );

        let mut manager = UiManager::with_settings(host, self.priority, self.max_commands_per_tick);
        for spec in &self.groups {
            manager.create_group(&spec.name, spec.depth);
        }

        manager
    }
}

impl<K: PanelKey, H: VisualHost<K>> Default for UiManagerBuilder<K, H> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
