//! Package machinery. Installed before the modules that register themselves
//! as loadable units, so `package.loaded` exists when they do.

use crate::errors::RuntimeError;
use crate::installer::PRELOAD_KEY;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::{register_module, LOADED_KEY};

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let loaded = state
        .registry_table(LOADED_KEY, 0)
        .map_err(|e| RuntimeError::Raised(e.to_string()))?;
    let preload = state
        .registry_table(PRELOAD_KEY, 0)
        .map_err(|e| RuntimeError::Raised(e.to_string()))?;

    let module = TableRef::new(Table::with_capacity(2));
    {
        let mut m = module.borrow_mut();
        m.set("loaded", Value::Table(loaded));
        m.set("preload", Value::Table(preload));
    }
    register_module(state, "package", module.clone())?;
    Ok(vec![Value::Table(module)])
}
