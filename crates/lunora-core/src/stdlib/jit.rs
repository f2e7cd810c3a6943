//! Build introspection module. This runtime has no compiler, so `status`
//! always reports the interpreter.

use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::register_module;

pub const VERSION_NUM: f64 = 10000.0;

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let module = TableRef::new(Table::with_capacity(3));
    {
        let mut m = module.borrow_mut();
        m.set("status", Value::NativeFn(status));
        m.set("version", Value::from(crate::stdlib::VERSION));
        m.set("version_num", Value::Number(VERSION_NUM));
    }
    register_module(state, "jit", module.clone())?;
    Ok(vec![Value::Table(module)])
}

fn status(_state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    Ok(vec![Value::Boolean(false), Value::from("interpreter")])
}
