use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::{check_table, opt_str, register_module};

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let module = TableRef::new(Table::with_capacity(3));
    {
        let mut m = module.borrow_mut();
        m.set("insert", Value::NativeFn(insert));
        m.set("remove", Value::NativeFn(remove));
        m.set("concat", Value::NativeFn(concat));
    }
    register_module(state, "table", module.clone())?;
    Ok(vec![Value::Table(module)])
}

/// `table.insert(t, v)` appends to the sequence part.
fn insert(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let table = check_table("insert", args, 1)?;
    let value = args.get(1).cloned().unwrap_or(Value::Nil);
    table.borrow_mut().push(value);
    Ok(vec![])
}

/// `table.remove(t)` pops the last sequence element, returning it.
fn remove(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let table = check_table("remove", args, 1)?;
    let value = table.borrow_mut().pop();
    Ok(vec![value])
}

fn concat(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let table = check_table("concat", args, 1)?;
    let sep = opt_str("concat", args, 2, "")?;

    let mut pieces = Vec::with_capacity(table.borrow().seq_len());
    for (i, value) in table.borrow().seq().iter().enumerate() {
        match value {
            Value::Str(_) | Value::Number(_) => pieces.push(value.to_string()),
            other => {
                return Err(RuntimeError::Raised(format!(
                    "invalid value (at index {}) in table for 'concat': {}",
                    i + 1,
                    other.type_name()
                )))
            }
        }
    }
    Ok(vec![Value::from(pieces.join(&sep))])
}
