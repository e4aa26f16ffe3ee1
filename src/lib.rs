//=========================================================================
// Aetheric Framework: Library Root
//
// Stack-based UI panel management for games, plus the small module host
// it plugs into.
//
// Responsibilities:
// - Expose the panel stack manager (`UiManager`) and its builder
// - Expose the module host that ticks framework modules each frame
// - Keep display concerns behind the `VisualHost` trait
//
// Typical usage:
// ```no_run
// use aetheric_framework::prelude::*;
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum Screen { Title }
// impl PanelKey for Screen {}
//
// struct Title;
// impl Panel<Screen> for Title {}
//
// let mut ui = UiManager::new(HeadlessHost);
// ui.register_panel(Screen::Title, Title);
// ui.open(Screen::Title).unwrap();
//
// let mut modules = ModuleHost::new();
// modules.register(ui);
// modules.update(1.0 / 60.0);
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every subsystem. Most applications only need the prelude.
//
pub mod core;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::core::module::ModuleHost;
pub use crate::core::ui::{UiManager, UiManagerBuilder};
