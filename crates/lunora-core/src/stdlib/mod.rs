//! Standard-library modules. Each module is gated by its cargo feature;
//! disabling a feature removes the module's code from the build entirely.

#[cfg(feature = "lib-base")]
pub mod base;
#[cfg(feature = "lib-bit")]
pub mod bit;
#[cfg(feature = "lib-debug")]
pub mod debug;
#[cfg(all(
    feature = "lib-ffi",
    any(target_arch = "x86_64", target_arch = "aarch64")
))]
pub mod ffi;
#[cfg(feature = "lib-io")]
pub mod io;
#[cfg(feature = "lib-jit")]
pub mod jit;
#[cfg(feature = "lib-math")]
pub mod math;
#[cfg(feature = "lib-os")]
pub mod os;
#[cfg(feature = "lib-package")]
pub mod package;
#[cfg(feature = "lib-string")]
pub mod string;
#[cfg(feature = "lib-table")]
pub mod table;

use std::rc::Rc;

use crate::errors::RuntimeError;
use crate::state::{InterpreterState, TableRef, Value};

/// Runtime version string, reported by `_VERSION` and `jit.version`.
pub const VERSION: &str = "Lunora 0.1";

/// Registry slot mirroring `package.loaded`; maintained even when the
/// package module itself is stripped from the build.
pub(crate) const LOADED_KEY: &str = "_LOADED";

/// Publish a named module: set the global and record it in the loaded table.
#[allow(dead_code)]
pub(crate) fn register_module(
    state: &mut InterpreterState,
    name: &str,
    module: TableRef,
) -> Result<(), RuntimeError> {
    state.set_global(name, Value::Table(module.clone()));
    let loaded = state
        .registry_table(LOADED_KEY, 0)
        .map_err(|e| RuntimeError::Raised(e.to_string()))?;
    loaded.borrow_mut().set(name, Value::Table(module));
    Ok(())
}

/// Argument checkers. `arg` is the 1-based argument position, as reported in
/// the error message.
#[allow(dead_code)]
pub(crate) fn check_str(
    func: &'static str,
    args: &[Value],
    arg: usize,
) -> Result<Rc<str>, RuntimeError> {
    match args.get(arg - 1) {
        Some(Value::Str(s)) => Ok(s.clone()),
        other => Err(bad_argument(func, arg, "string", other)),
    }
}

#[allow(dead_code)]
pub(crate) fn check_number(
    func: &'static str,
    args: &[Value],
    arg: usize,
) -> Result<f64, RuntimeError> {
    match args.get(arg - 1) {
        Some(Value::Number(n)) => Ok(*n),
        other => Err(bad_argument(func, arg, "number", other)),
    }
}

#[allow(dead_code)]
pub(crate) fn check_table(
    func: &'static str,
    args: &[Value],
    arg: usize,
) -> Result<TableRef, RuntimeError> {
    match args.get(arg - 1) {
        Some(Value::Table(t)) => Ok(t.clone()),
        other => Err(bad_argument(func, arg, "table", other)),
    }
}

#[allow(dead_code)]
pub(crate) fn opt_number(
    func: &'static str,
    args: &[Value],
    arg: usize,
    default: f64,
) -> Result<f64, RuntimeError> {
    match args.get(arg - 1) {
        None | Some(Value::Nil) => Ok(default),
        Some(Value::Number(n)) => Ok(*n),
        other => Err(bad_argument(func, arg, "number", other)),
    }
}

#[allow(dead_code)]
pub(crate) fn opt_str(
    func: &'static str,
    args: &[Value],
    arg: usize,
    default: &str,
) -> Result<Rc<str>, RuntimeError> {
    match args.get(arg - 1) {
        None | Some(Value::Nil) => Ok(Rc::from(default)),
        Some(Value::Str(s)) => Ok(s.clone()),
        other => Err(bad_argument(func, arg, "string", other)),
    }
}

#[allow(dead_code)]
fn bad_argument(
    func: &'static str,
    arg: usize,
    expected: &'static str,
    got: Option<&Value>,
) -> RuntimeError {
    RuntimeError::BadArgument {
        func,
        arg,
        expected,
        got: got.map_or("no value", Value::type_name),
    }
}
