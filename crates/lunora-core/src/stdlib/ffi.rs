//! Foreign-function interface surface. Preloaded rather than installed: this
//! entry point only runs when the resolver first materializes `ffi`.
//!
//! Compiled only on targets the FFI backend supports.

use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::{check_str, register_module};

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let module = TableRef::new(Table::with_capacity(2));
    {
        let mut m = module.borrow_mut();
        m.set("abi", Value::NativeFn(abi));
        m.set("sizeof", Value::NativeFn(sizeof));
    }
    register_module(state, "ffi", module.clone())?;
    Ok(vec![Value::Table(module)])
}

fn abi(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let param = check_str("abi", args, 1)?;
    let supported = match &*param {
        "64bit" => cfg!(target_pointer_width = "64"),
        "32bit" => cfg!(target_pointer_width = "32"),
        "le" => cfg!(target_endian = "little"),
        "be" => cfg!(target_endian = "big"),
        "win" => cfg!(windows),
        _ => false,
    };
    Ok(vec![Value::Boolean(supported)])
}

fn sizeof(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let type_name = check_str("sizeof", args, 1)?;
    let size = match &*type_name {
        "bool" | "int8_t" | "uint8_t" | "char" => 1,
        "int16_t" | "uint16_t" | "short" => 2,
        "int32_t" | "uint32_t" | "int" | "float" => 4,
        "int64_t" | "uint64_t" | "double" => 8,
        "void*" | "intptr_t" | "size_t" => std::mem::size_of::<usize>(),
        _ => {
            return Err(RuntimeError::Raised(format!(
                "undeclared or implicit type '{type_name}'"
            )))
        }
    };
    Ok(vec![Value::Number(size as f64)])
}
