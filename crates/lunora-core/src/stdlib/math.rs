use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::{check_number, register_module};

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let module = TableRef::new(Table::with_capacity(8));
    {
        let mut m = module.borrow_mut();
        m.set("abs", Value::NativeFn(abs));
        m.set("floor", Value::NativeFn(floor));
        m.set("ceil", Value::NativeFn(ceil));
        m.set("sqrt", Value::NativeFn(sqrt));
        m.set("max", Value::NativeFn(max));
        m.set("min", Value::NativeFn(min));
        m.set("pi", Value::Number(std::f64::consts::PI));
        m.set("huge", Value::Number(f64::INFINITY));
    }
    register_module(state, "math", module.clone())?;
    Ok(vec![Value::Table(module)])
}

fn abs(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    Ok(vec![Value::Number(check_number("abs", args, 1)?.abs())])
}

fn floor(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    Ok(vec![Value::Number(check_number("floor", args, 1)?.floor())])
}

fn ceil(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    Ok(vec![Value::Number(check_number("ceil", args, 1)?.ceil())])
}

fn sqrt(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    Ok(vec![Value::Number(check_number("sqrt", args, 1)?.sqrt())])
}

fn max(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    fold("max", args, f64::max)
}

fn min(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    fold("min", args, f64::min)
}

fn fold(
    func: &'static str,
    args: &[Value],
    pick: fn(f64, f64) -> f64,
) -> Result<Vec<Value>, RuntimeError> {
    let mut acc = check_number(func, args, 1)?;
    for arg in 2..=args.len() {
        acc = pick(acc, check_number(func, args, arg)?);
    }
    Ok(vec![Value::Number(acc)])
}
