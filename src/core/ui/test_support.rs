//=========================================================================
// Test Support
//=========================================================================
//
// Recording doubles shared by the UI unit tests.
//
//=========================================================================

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::{Panel, PanelContext, PanelError, PanelKey, UserData, VisualHost};

//=== Logging =============================================================

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

//=== Keys ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Screen {
    Hud,
    Menu,
    Dialog,
    Inventory,
}

impl PanelKey for Screen {}

//=== Hook Log ============================================================

/// Shared, ordered record of every hook invocation.
#[derive(Clone, Default)]
pub(crate) struct HookLog(Rc<RefCell<Vec<(Screen, &'static str)>>>);

impl HookLog {
    pub(crate) fn push(&self, key: Screen, hook: &'static str) {
        self.0.borrow_mut().push((key, hook));
    }

    /// Returns every recorded entry and clears the log.
    pub(crate) fn take(&self) -> Vec<(Screen, &'static str)> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Hook names recorded for one panel, without clearing.
    pub(crate) fn hooks_of(&self, key: Screen) -> Vec<&'static str> {
        self.0
            .borrow()
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, hook)| *hook)
            .collect()
    }
}

pub(crate) fn hook_log() -> HookLog {
    init_logger();
    HookLog::default()
}

//=== RecordingPanel ======================================================

/// Panel that records each hook it receives.
pub(crate) struct RecordingPanel {
    log: HookLog,
    blocks_lower: bool,
    hides_when_paused: bool,
    fail_in: Option<&'static str>,
    close_self_on_open: bool,
    last_user_data: Rc<RefCell<Option<u32>>>,
}

impl RecordingPanel {
    pub(crate) fn new(log: &HookLog) -> Self {
        Self {
            log: log.clone(),
            blocks_lower: true,
            hides_when_paused: true,
            fail_in: None,
            close_self_on_open: false,
            last_user_data: Rc::default(),
        }
    }

    pub(crate) fn non_blocking(mut self) -> Self {
        self.blocks_lower = false;
        self
    }

    pub(crate) fn visible_when_paused(mut self) -> Self {
        self.hides_when_paused = false;
        self
    }

    /// Makes `on_init` or `on_open` return an error.
    pub(crate) fn failing_in(mut self, hook: &'static str) -> Self {
        self.fail_in = Some(hook);
        self
    }

    pub(crate) fn closing_self_on_open(mut self) -> Self {
        self.close_self_on_open = true;
        self
    }

    /// Slot receiving the last `u32` user data seen by the panel.
    pub(crate) fn user_data_slot(&self) -> Rc<RefCell<Option<u32>>> {
        self.last_user_data.clone()
    }

    fn record_user_data(&self, user_data: UserData<'_>) {
        if let Some(value) = user_data.and_then(|d| d.downcast_ref::<u32>()) {
            *self.last_user_data.borrow_mut() = Some(*value);
        }
    }

    fn fallible(&self, hook: &'static str) -> Result<(), PanelError> {
        if self.fail_in == Some(hook) {
            Err(PanelError::new(format!("{} refused", hook)))
        } else {
            Ok(())
        }
    }
}

impl Panel<Screen> for RecordingPanel {
    fn on_init(&mut self, ctx: &PanelContext<'_, Screen>, user_data: UserData<'_>) -> Result<(), PanelError> {
        self.log.push(ctx.key(), "on_init");
        self.record_user_data(user_data);
        self.fallible("on_init")
    }

    fn on_open(&mut self, ctx: &PanelContext<'_, Screen>, user_data: UserData<'_>) -> Result<(), PanelError> {
        self.log.push(ctx.key(), "on_open");
        self.record_user_data(user_data);
        if self.close_self_on_open {
            ctx.close_self();
        }
        self.fallible("on_open")
    }

    fn on_close(&mut self, ctx: &PanelContext<'_, Screen>) {
        self.log.push(ctx.key(), "on_close");
    }

    fn on_release(&mut self, ctx: &PanelContext<'_, Screen>) {
        self.log.push(ctx.key(), "on_release");
    }

    fn on_pause(&mut self, ctx: &PanelContext<'_, Screen>) {
        self.log.push(ctx.key(), "on_pause");
    }

    fn on_resume(&mut self, ctx: &PanelContext<'_, Screen>) {
        self.log.push(ctx.key(), "on_resume");
    }

    fn on_cover(&mut self, ctx: &PanelContext<'_, Screen>) {
        self.log.push(ctx.key(), "on_cover");
    }

    fn on_reveal(&mut self, ctx: &PanelContext<'_, Screen>) {
        self.log.push(ctx.key(), "on_reveal");
    }

    fn on_refocus(&mut self, ctx: &PanelContext<'_, Screen>, user_data: UserData<'_>) {
        self.log.push(ctx.key(), "on_refocus");
        self.record_user_data(user_data);
    }

    fn on_update(&mut self, ctx: &PanelContext<'_, Screen>, _delta_time: f32) {
        self.log.push(ctx.key(), "on_update");
    }

    fn blocks_lower(&self) -> bool {
        self.blocks_lower
    }

    fn hides_when_paused(&self) -> bool {
        self.hides_when_paused
    }
}

//=== RecordingHost =======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostCall {
    SetActive(Screen, bool),
    Reparent(Screen, Option<String>),
    MoveToTop(Screen),
}

/// Visual host that records calls and lets tests destroy panels.
#[derive(Default)]
pub(crate) struct RecordingHost {
    calls: Vec<HostCall>,
    active: HashMap<Screen, bool>,
    destroyed: HashSet<Screen>,
    roots: Vec<(String, i32)>,
}

impl RecordingHost {
    pub(crate) fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub(crate) fn is_active(&self, key: Screen) -> bool {
        self.active.get(&key).copied().unwrap_or(false)
    }

    pub(crate) fn destroy(&mut self, key: Screen) {
        self.destroyed.insert(key);
    }

    /// Group roots created so far, as `(name, depth)`.
    pub(crate) fn roots(&self) -> &[(String, i32)] {
        &self.roots
    }
}

impl VisualHost<Screen> for RecordingHost {
    type Root = String;

    fn set_active(&mut self, panel: Screen, active: bool) {
        self.calls.push(HostCall::SetActive(panel, active));
        self.active.insert(panel, active);
    }

    fn reparent(&mut self, panel: Screen, root: Option<&String>) {
        self.calls.push(HostCall::Reparent(panel, root.cloned()));
    }

    fn move_to_top(&mut self, panel: Screen) {
        self.calls.push(HostCall::MoveToTop(panel));
    }

    fn is_destroyed(&self, panel: Screen) -> bool {
        self.destroyed.contains(&panel)
    }

    fn create_group_root(&mut self, name: &str, depth: i32) -> Option<String> {
        self.roots.push((name.to_string(), depth));
        Some(format!("root/{}", name))
    }
}
