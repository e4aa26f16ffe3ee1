//=========================================================================
// Framework Modules
//=========================================================================
//
// Pluggable subsystems ticked by a shared, priority-ordered host.
//
// Architecture:
//   ModuleHost
//     └─ modules: Vec<Box<dyn FrameworkModule>>   (highest priority first)
//
// Flow:
//   update(dt)  → on_update(dt) for each module, front to back
//   shutdown()  → shutdown() for each module, back to front
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Module Declarations =================================================

mod module_host;

//=== Public API ==========================================================

pub use module_host::ModuleHost;

//=== FrameworkModule Trait ===============================================

/// A subsystem driven by the [`ModuleHost`].
///
/// # Minimal Implementation
///
/// ```rust
/// # use std::any::Any;
/// # use aetheric_framework::core::module::FrameworkModule;
/// struct Clock {
///     elapsed: f32,
/// }
///
/// impl FrameworkModule for Clock {
///     fn name(&self) -> &str {
///         "Clock"
///     }
///
///     fn on_update(&mut self, delta_time: f32) {
///         self.elapsed += delta_time;
///     }
///
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
/// ```
pub trait FrameworkModule: Any {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Modules with a higher priority are ticked earlier and shut down
    /// later.
    fn priority(&self) -> i32 {
        0
    }

    /// Called once when the module is registered with a host.
    fn initialize(&mut self) {}

    /// Called once per host update.
    fn on_update(&mut self, _delta_time: f32) {}

    /// Called once when the host shuts down.
    fn shutdown(&mut self) {}

    /// Downcasts to `&dyn Any` for typed lookup.
    fn as_any(&self) -> &dyn Any;

    /// Downcasts to `&mut dyn Any` for typed lookup.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
