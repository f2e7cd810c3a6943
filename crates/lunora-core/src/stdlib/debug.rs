use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::{opt_str, register_module};

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let module = TableRef::new(Table::with_capacity(2));
    {
        let mut m = module.borrow_mut();
        m.set("traceback", Value::NativeFn(traceback));
        m.set("getinfo", Value::NativeFn(getinfo));
    }
    register_module(state, "debug", module.clone())?;
    Ok(vec![Value::Table(module)])
}

fn traceback(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let message = opt_str("traceback", args, 1, "")?;
    let text = if message.is_empty() {
        "stack traceback:".to_string()
    } else {
        format!("{message}\nstack traceback:")
    };
    Ok(vec![Value::from(text)])
}

/// Native frames carry no line information.
fn getinfo(_state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let info = TableRef::new(Table::with_capacity(3));
    {
        let mut t = info.borrow_mut();
        t.set("source", Value::from("=[native]"));
        t.set("what", Value::from("native"));
        t.set("currentline", Value::Number(-1.0));
    }
    Ok(vec![Value::Table(info)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traceback_prepends_message() {
        let mut state = InterpreterState::new();
        open(&mut state, &[Value::from("debug")]).unwrap();

        let module = state.global("debug").as_table().unwrap().clone();
        let traceback = module.borrow().get("traceback");
        let results = state.call(&traceback, &[Value::from("oops")]).unwrap();
        assert_eq!(results, vec![Value::from("oops\nstack traceback:")]);
    }
}
