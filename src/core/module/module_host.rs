//=========================================================================
// Module Host
//=========================================================================
//
// Owns every framework module and dispatches per-frame updates to them in
// priority order.
//
// There is one host per application; it is an ordinary value owned by
// the caller, not process-wide state.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::FrameworkModule;

//=== ModuleHost ==========================================================

/// Priority-ordered container of framework modules.
///
/// Modules are kept sorted by descending priority. Modules sharing a
/// priority keep their registration order.
pub struct ModuleHost {
    modules: Vec<Box<dyn FrameworkModule>>,
}

impl ModuleHost {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self { modules: Vec::new() }
    }

    //--- Registration -----------------------------------------------------

    /// Registers and initializes a module.
    ///
    /// Only one module per concrete type is allowed; a second registration
    /// is rejected with a warning and returns `false`.
    pub fn register<M: FrameworkModule>(&mut self, module: M) -> bool {
        if self.contains::<M>() {
            warn!("Module '{}' is already registered, skipping", module.name());
            return false;
        }

        let mut module: Box<dyn FrameworkModule> = Box::new(module);
        module.initialize();

        let priority = module.priority();
        let pos = self
            .modules
            .iter()
            .position(|existing| priority > existing.priority())
            .unwrap_or(self.modules.len());

        debug!("Registered module '{}' (priority {}) at slot {}", module.name(), priority, pos);
        self.modules.insert(pos, module);
        true
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the registered module of type `M`.
    pub fn get<M: FrameworkModule>(&self) -> Option<&M> {
        self.modules
            .iter()
            .find_map(|module| module.as_any().downcast_ref::<M>())
    }

    /// Returns the registered module of type `M` mutably.
    pub fn get_mut<M: FrameworkModule>(&mut self) -> Option<&mut M> {
        self.modules
            .iter_mut()
            .find_map(|module| module.as_any_mut().downcast_mut::<M>())
    }

    pub fn contains<M: FrameworkModule>(&self) -> bool {
        self.modules.iter().any(|module| module.as_any().is::<M>())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Module names in update order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|module| module.name()).collect()
    }

    //--- Update Loop ------------------------------------------------------

    /// Ticks every module, highest priority first.
    pub fn update(&mut self, delta_time: f32) {
        for module in self.modules.iter_mut() {
            module.on_update(delta_time);
        }
    }

    /// Shuts modules down in reverse update order and empties the host.
    pub fn shutdown(&mut self) {
        info!("Shutting down {} modules", self.modules.len());

        while let Some(mut module) = self.modules.pop() {
            debug!("Shutting down module '{}'", module.name());
            module.shutdown();
        }
    }
}

impl Default for ModuleHost {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Trace = Rc<RefCell<Vec<String>>>;

    struct Probe<const N: usize> {
        priority: i32,
        trace: Trace,
        ticks: u32,
    }

    impl<const N: usize> Probe<N> {
        fn new(priority: i32, trace: &Trace) -> Self {
            Self { priority, trace: trace.clone(), ticks: 0 }
        }
    }

    impl<const N: usize> FrameworkModule for Probe<N> {
        fn name(&self) -> &str {
            ["zero", "one", "two", "three"][N]
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn initialize(&mut self) {
            self.trace.borrow_mut().push(format!("init {}", self.name()));
        }

        fn on_update(&mut self, _delta_time: f32) {
            self.ticks += 1;
            self.trace.borrow_mut().push(format!("update {}", self.name()));
        }

        fn shutdown(&mut self) {
            self.trace.borrow_mut().push(format!("shutdown {}", self.name()));
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn higher_priority_is_updated_first() {
        let trace = Trace::default();
        let mut host = ModuleHost::new();
        host.register(Probe::<0>::new(0, &trace));
        host.register(Probe::<1>::new(10, &trace));
        host.register(Probe::<2>::new(5, &trace));

        assert_eq!(host.module_names(), vec!["one", "two", "zero"]);
    }

    #[test]
    fn equal_priority_keeps_registration_order() {
        let trace = Trace::default();
        let mut host = ModuleHost::new();
        host.register(Probe::<0>::new(1, &trace));
        host.register(Probe::<1>::new(1, &trace));
        host.register(Probe::<2>::new(1, &trace));

        assert_eq!(host.module_names(), vec!["zero", "one", "two"]);
    }

    #[test]
    fn duplicate_type_is_rejected() {
        let trace = Trace::default();
        let mut host = ModuleHost::new();

        assert!(host.register(Probe::<0>::new(0, &trace)));
        assert!(!host.register(Probe::<0>::new(99, &trace)));
        assert_eq!(host.len(), 1);
        assert_eq!(host.get::<Probe<0>>().map(|p| p.priority), Some(0));
    }

    #[test]
    fn register_initializes_and_update_ticks() {
        let trace = Trace::default();
        let mut host = ModuleHost::new();
        host.register(Probe::<0>::new(0, &trace));

        host.update(0.016);
        host.update(0.016);

        assert_eq!(host.get::<Probe<0>>().map(|p| p.ticks), Some(2));
        assert_eq!(trace.borrow()[0], "init zero");
    }

    #[test]
    fn get_mut_reaches_concrete_module() {
        let trace = Trace::default();
        let mut host = ModuleHost::new();
        host.register(Probe::<3>::new(0, &trace));

        if let Some(probe) = host.get_mut::<Probe<3>>() {
            probe.ticks = 7;
        }

        assert_eq!(host.get::<Probe<3>>().map(|p| p.ticks), Some(7));
        assert!(host.get::<Probe<1>>().is_none());
    }

    #[test]
    fn shutdown_runs_in_reverse_order_and_empties() {
        let trace = Trace::default();
        let mut host = ModuleHost::new();
        host.register(Probe::<0>::new(0, &trace));
        host.register(Probe::<1>::new(10, &trace));
        trace.borrow_mut().clear();

        host.shutdown();

        assert_eq!(*trace.borrow(), vec!["shutdown zero", "shutdown one"]);
        assert!(host.is_empty());
    }
}
