use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::{check_str, register_module};

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let module = TableRef::new(Table::with_capacity(3));
    {
        let mut m = module.borrow_mut();
        m.set("time", Value::NativeFn(time));
        m.set("clock", Value::NativeFn(clock));
        m.set("getenv", Value::NativeFn(getenv));
    }
    register_module(state, "os", module.clone())?;
    Ok(vec![Value::Table(module)])
}

fn time(_state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| RuntimeError::Raised(e.to_string()))?;
    Ok(vec![Value::Number(now.as_secs() as f64)])
}

/// Seconds since the interpreter state was created.
fn clock(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    Ok(vec![Value::Number(state.uptime())])
}

fn getenv(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let name = check_str("getenv", args, 1)?;
    let value = std::env::var(&*name).map_or(Value::Nil, Value::from);
    Ok(vec![value])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_is_positive() {
        let mut state = InterpreterState::new();
        open(&mut state, &[Value::from("os")]).unwrap();

        let os = state.global("os").as_table().unwrap().clone();
        let time = os.borrow().get("time");
        let results = state.call(&time, &[]).unwrap();
        assert!(results[0].as_number().unwrap() > 0.0);
    }

    #[test]
    fn test_getenv_missing_is_nil() {
        let mut state = InterpreterState::new();
        open(&mut state, &[Value::from("os")]).unwrap();

        let os = state.global("os").as_table().unwrap().clone();
        let getenv = os.borrow().get("getenv");
        let results = state
            .call(&getenv, &[Value::from("LUNORA_DEFINITELY_UNSET")])
            .unwrap();
        assert_eq!(results, vec![Value::Nil]);
    }
}
