//! Module registry: the compile-time-configurable list of standard-library
//! modules present in this build.
//!
//! Which descriptors exist is decided by cargo features, one per module; a
//! disabled feature removes both the descriptor and the module's code from
//! the build. [`stdlib_registry`] is a pure function of that configuration
//! and performs no interpreter interaction.

use std::fmt;

use serde::Serialize;

use crate::errors::ConfigurationError;
use crate::state::NativeFn;

/// Installation strategy for one module.
///
/// A single descriptor list tagged per module replaces separate eager and
/// preload lists; each name has exactly one kind by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Installed unconditionally at interpreter initialization.
    Eager,
    /// Entry point registered in the preload table, invoked on first demand.
    Lazy,
}

/// Static description of one standard-library module.
///
/// An empty name marks the base module, installed without a namespace.
#[derive(Clone, Copy)]
pub struct ModuleDescriptor {
    pub name: &'static str,
    pub kind: ModuleKind,
    pub entry: NativeFn,
}

impl ModuleDescriptor {
    /// Human-readable name; the unnamed base module reports as `"base"`.
    pub fn display_name(&self) -> &'static str {
        if self.name.is_empty() {
            "base"
        } else {
            self.name
        }
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Ordered list of module descriptors for one build configuration.
///
/// Order matters among eager modules: later entries may observe globals
/// installed by earlier ones.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn from_descriptors(modules: Vec<ModuleDescriptor>) -> Self {
        ModuleRegistry { modules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter()
    }

    pub fn eager(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules
            .iter()
            .filter(|m| m.kind == ModuleKind::Eager)
    }

    pub fn lazy(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter().filter(|m| m.kind == ModuleKind::Lazy)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Check for configuration mistakes in an embedder-supplied registry.
    ///
    /// A duplicate name is a programming error in the embedding host's
    /// configuration, not a recoverable runtime condition; the installer
    /// debug-asserts this.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (i, module) in self.modules.iter().enumerate() {
            if self.modules[..i].iter().any(|m| m.name == module.name) {
                return Err(ConfigurationError::DuplicateName(
                    module.display_name().to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// The standard-library registry for this build configuration.
///
/// Deterministic and side-effect-free. Eager order follows the reference
/// layout: base first (unnamed), then the package machinery before the
/// modules that register themselves as loadable units.
pub fn stdlib_registry() -> ModuleRegistry {
    #[allow(unused_mut)]
    let mut modules: Vec<ModuleDescriptor> = Vec::new();

    #[cfg(feature = "lib-base")]
    modules.push(ModuleDescriptor {
        name: "",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::base::open,
    });
    #[cfg(feature = "lib-package")]
    modules.push(ModuleDescriptor {
        name: "package",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::package::open,
    });
    #[cfg(feature = "lib-table")]
    modules.push(ModuleDescriptor {
        name: "table",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::table::open,
    });
    #[cfg(feature = "lib-io")]
    modules.push(ModuleDescriptor {
        name: "io",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::io::open,
    });
    #[cfg(feature = "lib-os")]
    modules.push(ModuleDescriptor {
        name: "os",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::os::open,
    });
    #[cfg(feature = "lib-string")]
    modules.push(ModuleDescriptor {
        name: "string",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::string::open,
    });
    #[cfg(feature = "lib-math")]
    modules.push(ModuleDescriptor {
        name: "math",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::math::open,
    });
    #[cfg(feature = "lib-debug")]
    modules.push(ModuleDescriptor {
        name: "debug",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::debug::open,
    });
    #[cfg(feature = "lib-bit")]
    modules.push(ModuleDescriptor {
        name: "bit",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::bit::open,
    });
    #[cfg(feature = "lib-jit")]
    modules.push(ModuleDescriptor {
        name: "jit",
        kind: ModuleKind::Eager,
        entry: crate::stdlib::jit::open,
    });

    // FFI is preloaded, not installed: present only when both the feature
    // and the target architecture support it, absent otherwise.
    #[cfg(all(
        feature = "lib-ffi",
        any(target_arch = "x86_64", target_arch = "aarch64")
    ))]
    modules.push(ModuleDescriptor {
        name: "ffi",
        kind: ModuleKind::Lazy,
        entry: crate::stdlib::ffi::open,
    });

    ModuleRegistry { modules }
}
