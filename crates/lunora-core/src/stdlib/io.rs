use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::register_module;

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let module = TableRef::new(Table::with_capacity(2));
    {
        let mut m = module.borrow_mut();
        m.set("write", Value::NativeFn(write));
        m.set("lines", Value::NativeFn(lines));
    }
    register_module(state, "io", module.clone())?;
    Ok(vec![Value::Table(module)])
}

/// `io.write(...)` writes strings and numbers verbatim, no separator, no
/// trailing newline.
fn write(state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    for (i, arg) in args.iter().enumerate() {
        match arg {
            Value::Str(_) | Value::Number(_) => {
                write!(state.stdout(), "{arg}")?;
            }
            other => {
                return Err(RuntimeError::BadArgument {
                    func: "write",
                    arg: i + 1,
                    expected: "string",
                    got: other.type_name(),
                })
            }
        }
    }
    Ok(vec![])
}

// TODO: back this with a real file handle once the runtime grows one; for
// now the capability surface exists but yields nothing.
fn lines(_state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    Ok(vec![Value::Nil])
}
