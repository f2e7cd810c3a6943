//! Lunora core: the bootstrap layer of an embeddable scripting runtime.
//!
//! The host creates an [`InterpreterState`], calls
//! [`install_standard_library`] exactly once, and from then on eager modules
//! are live globals while lazy modules sit in the `"_PRELOAD"` registry table
//! waiting for first demand.
//!
//! ```
//! use lunora_core::{install_standard_library, InterpreterState};
//!
//! let mut state = InterpreterState::new();
//! install_standard_library(&mut state).expect("interpreter failed to initialize");
//! ```

pub mod errors;
pub mod installer;
pub mod registry;
pub mod state;
pub mod stdlib;

pub use errors::{ConfigurationError, InstallError, RegistryError, RuntimeError};
pub use installer::{install_modules, install_standard_library, PRELOAD_KEY};
pub use registry::{stdlib_registry, ModuleDescriptor, ModuleKind, ModuleRegistry};
pub use state::{InterpreterState, NativeFn, Table, TableRef, Value};
