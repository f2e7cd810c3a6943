//! Library installer: wires a module registry into a freshly created
//! interpreter state.
//!
//! Eager modules are installed immediately, in declared order; lazy modules
//! are registered in the preload table without being invoked. Installation is
//! not transactional: a failure leaves earlier modules installed and the host
//! is expected to discard the whole state.

use tracing::{debug, info};

use crate::errors::InstallError;
use crate::registry::{stdlib_registry, ModuleRegistry};
use crate::state::{InterpreterState, Value};

/// Well-known registry slot consulted by the module resolver for
/// not-yet-materialized modules. This subsystem only writes it.
pub const PRELOAD_KEY: &str = "_PRELOAD";

/// Install the standard library for this build configuration.
///
/// Call exactly once per freshly created state. A second call on the same
/// state is unsupported: eager modules may install global bindings that
/// conflict on re-creation.
pub fn install_standard_library(state: &mut InterpreterState) -> Result<(), InstallError> {
    install_modules(state, &stdlib_registry())
}

/// Install an explicit module registry.
///
/// Runs synchronously on the caller's stack; the first eager failure
/// propagates immediately with no rollback of already-installed modules.
pub fn install_modules(
    state: &mut InterpreterState,
    registry: &ModuleRegistry,
) -> Result<(), InstallError> {
    debug_assert!(registry.validate().is_ok(), "invalid module registry");

    for module in registry.eager() {
        debug!(module = module.display_name(), "installing eager module");
        // Entry points receive the module name as their single argument;
        // whatever they return is discarded.
        (module.entry)(state, &[Value::from(module.name)]).map_err(|source| {
            InstallError::ModuleInstall {
                name: module.display_name().to_string(),
                source,
            }
        })?;
    }

    let lazy_count = registry.lazy().count();
    let preload = state.registry_table(PRELOAD_KEY, lazy_count)?;
    for module in registry.lazy() {
        debug!(module = module.name, "registering preload entry");
        preload
            .borrow_mut()
            .set(module.name, Value::NativeFn(module.entry));
    }

    info!(
        eager = registry.eager().count(),
        lazy = lazy_count,
        "standard library installed"
    );
    Ok(())
}
