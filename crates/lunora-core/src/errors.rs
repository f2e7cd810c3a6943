use thiserror::Error;

/// Error raised by a native function during execution.
///
/// This is what a module entry point surfaces when installation of its
/// bindings fails; for installed bindings it is the ordinary runtime error
/// channel.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0}")]
    Raised(String),

    #[error("bad argument #{arg} to '{func}' ({expected} expected, got {got})")]
    BadArgument {
        func: &'static str,
        arg: usize,
        expected: &'static str,
        got: &'static str,
    },

    #[error("attempt to call a {0} value")]
    NotCallable(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error manipulating a well-known interpreter registry slot.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry slot '{key}' holds a {found} value, expected a table")]
    SlotOccupied { key: String, found: &'static str },
}

/// Programming error in an embedder-supplied module registry.
///
/// Detectable at build/integration time via [`crate::ModuleRegistry::validate`];
/// never a recoverable runtime condition.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("duplicate module name '{0}' in module registry")]
    DuplicateName(String),
}

/// Error surfaced by the library installer.
///
/// Installation is not transactional: modules installed before the failure
/// remain installed, and the host is expected to discard the interpreter
/// state as a whole.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to install module '{name}'")]
    ModuleInstall {
        name: String,
        #[source]
        source: RuntimeError,
    },

    #[error("failed to create preload table")]
    PreloadTable(#[from] RegistryError),
}
