//! 32-bit bitwise operations over the number type.
//!
//! Numbers are normalized to 32 bits with wrap-around, and results come back
//! as signed 32-bit values.

use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::{check_number, register_module};

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let module = TableRef::new(Table::with_capacity(6));
    {
        let mut m = module.borrow_mut();
        m.set("band", Value::NativeFn(band));
        m.set("bor", Value::NativeFn(bor));
        m.set("bxor", Value::NativeFn(bxor));
        m.set("bnot", Value::NativeFn(bnot));
        m.set("lshift", Value::NativeFn(lshift));
        m.set("rshift", Value::NativeFn(rshift));
    }
    register_module(state, "bit", module.clone())?;
    Ok(vec![Value::Table(module)])
}

fn to_u32(n: f64) -> u32 {
    (n as i64 & 0xffff_ffff) as u32
}

fn from_u32(x: u32) -> Value {
    Value::Number(x as i32 as f64)
}

fn band(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    fold("band", args, |a, b| a & b)
}

fn bor(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    fold("bor", args, |a, b| a | b)
}

fn bxor(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    fold("bxor", args, |a, b| a ^ b)
}

fn fold(
    func: &'static str,
    args: &[Value],
    op: fn(u32, u32) -> u32,
) -> Result<Vec<Value>, RuntimeError> {
    let mut acc = to_u32(check_number(func, args, 1)?);
    for arg in 2..=args.len() {
        acc = op(acc, to_u32(check_number(func, args, arg)?));
    }
    Ok(vec![from_u32(acc)])
}

fn bnot(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    Ok(vec![from_u32(!to_u32(check_number("bnot", args, 1)?))])
}

fn lshift(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let a = to_u32(check_number("lshift", args, 1)?);
    let n = to_u32(check_number("lshift", args, 2)?) & 31;
    Ok(vec![from_u32(a << n)])
}

fn rshift(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let a = to_u32(check_number("rshift", args, 1)?);
    let n = to_u32(check_number("rshift", args, 2)?) & 31;
    Ok(vec![from_u32(a >> n)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit_module(state: &mut InterpreterState) -> TableRef {
        open(state, &[Value::from("bit")]).unwrap();
        state.global("bit").as_table().unwrap().clone()
    }

    #[test]
    fn test_band_bor() {
        let mut state = InterpreterState::new();
        let module = bit_module(&mut state);

        let band = module.borrow().get("band");
        assert_eq!(
            state
                .call(&band, &[Value::Number(0b1100 as f64), Value::Number(0b1010 as f64)])
                .unwrap(),
            vec![Value::Number(0b1000 as f64)]
        );

        let bor = module.borrow().get("bor");
        assert_eq!(
            state
                .call(&bor, &[Value::Number(0b1100 as f64), Value::Number(0b1010 as f64)])
                .unwrap(),
            vec![Value::Number(0b1110 as f64)]
        );
    }

    #[test]
    fn test_bnot_is_signed() {
        let mut state = InterpreterState::new();
        let module = bit_module(&mut state);
        let bnot = module.borrow().get("bnot");
        assert_eq!(
            state.call(&bnot, &[Value::Number(0.0)]).unwrap(),
            vec![Value::Number(-1.0)]
        );
    }

    #[test]
    fn test_shifts_mask_count() {
        let mut state = InterpreterState::new();
        let module = bit_module(&mut state);
        let lshift = module.borrow().get("lshift");
        assert_eq!(
            state
                .call(&lshift, &[Value::Number(1.0), Value::Number(33.0)])
                .unwrap(),
            vec![Value::Number(2.0)]
        );
    }
}
