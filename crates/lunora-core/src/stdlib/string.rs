use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Table, TableRef, Value};
use crate::stdlib::{check_number, check_str, opt_number, register_module};

pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let module = TableRef::new(Table::with_capacity(5));
    {
        let mut m = module.borrow_mut();
        m.set("len", Value::NativeFn(len));
        m.set("upper", Value::NativeFn(upper));
        m.set("lower", Value::NativeFn(lower));
        m.set("sub", Value::NativeFn(sub));
        m.set("rep", Value::NativeFn(rep));
    }
    register_module(state, "string", module.clone())?;
    Ok(vec![Value::Table(module)])
}

fn len(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let s = check_str("len", args, 1)?;
    Ok(vec![Value::Number(s.len() as f64)])
}

fn upper(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let s = check_str("upper", args, 1)?;
    Ok(vec![Value::from(s.to_uppercase())])
}

fn lower(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let s = check_str("lower", args, 1)?;
    Ok(vec![Value::from(s.to_lowercase())])
}

/// 1-based inclusive range over bytes, as in the reference runtime; negative
/// indices count from the end. A slice that splits a multi-byte character
/// yields replacement characters rather than failing.
fn sub(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let s = check_str("sub", args, 1)?;
    let i = check_number("sub", args, 2)? as i64;
    let j = opt_number("sub", args, 3, -1.0)? as i64;

    let len = s.len() as i64;
    let start = resolve_index(i, len).max(1);
    let end = resolve_index(j, len).min(len);
    if start > end {
        return Ok(vec![Value::from("")]);
    }
    let bytes = &s.as_bytes()[(start - 1) as usize..end as usize];
    Ok(vec![Value::from(
        String::from_utf8_lossy(bytes).into_owned(),
    )])
}

fn resolve_index(i: i64, len: i64) -> i64 {
    if i < 0 {
        len + i + 1
    } else {
        i
    }
}

fn rep(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let s = check_str("rep", args, 1)?;
    let n = check_number("rep", args, 2)?;
    let count = if n.is_sign_negative() { 0 } else { n as usize };
    Ok(vec![Value::from(s.repeat(count))])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_module(state: &mut InterpreterState) -> TableRef {
        open(state, &[Value::from("string")]).unwrap();
        state.global("string").as_table().unwrap().clone()
    }

    #[test]
    fn test_len_and_case() {
        let mut state = InterpreterState::new();
        let module = string_module(&mut state);

        let len = module.borrow().get("len");
        assert_eq!(
            state.call(&len, &[Value::from("hello")]).unwrap(),
            vec![Value::Number(5.0)]
        );

        let upper = module.borrow().get("upper");
        assert_eq!(
            state.call(&upper, &[Value::from("hello")]).unwrap(),
            vec![Value::from("HELLO")]
        );
    }

    #[test]
    fn test_sub_positive_and_negative_indices() {
        let mut state = InterpreterState::new();
        let module = string_module(&mut state);
        let sub = module.borrow().get("sub");

        let hello = Value::from("hello");
        assert_eq!(
            state
                .call(&sub, &[hello.clone(), Value::Number(2.0), Value::Number(4.0)])
                .unwrap(),
            vec![Value::from("ell")]
        );
        assert_eq!(
            state
                .call(&sub, &[hello.clone(), Value::Number(-3.0)])
                .unwrap(),
            vec![Value::from("llo")]
        );
        assert_eq!(
            state
                .call(&sub, &[hello, Value::Number(4.0), Value::Number(2.0)])
                .unwrap(),
            vec![Value::from("")]
        );
    }

    #[test]
    fn test_sub_is_byte_indexed() {
        let mut state = InterpreterState::new();
        let module = string_module(&mut state);
        let sub = module.borrow().get("sub");

        // "héllo" is six bytes: the accented character spans bytes 2-3.
        let word = Value::from("héllo");
        assert_eq!(
            state
                .call(&sub, &[word.clone(), Value::Number(2.0), Value::Number(3.0)])
                .unwrap(),
            vec![Value::from("é")]
        );
        // Splitting the character must not panic; the torn byte is replaced.
        assert_eq!(
            state
                .call(&sub, &[word, Value::Number(2.0), Value::Number(2.0)])
                .unwrap(),
            vec![Value::from("\u{FFFD}")]
        );
    }

    #[test]
    fn test_rep() {
        let mut state = InterpreterState::new();
        let module = string_module(&mut state);
        let rep = module.borrow().get("rep");
        assert_eq!(
            state
                .call(&rep, &[Value::from("ab"), Value::Number(3.0)])
                .unwrap(),
            vec![Value::from("ababab")]
        );
    }

    #[test]
    fn test_len_rejects_non_string() {
        let mut state = InterpreterState::new();
        let module = string_module(&mut state);
        let len = module.borrow().get("len");
        let err = state.call(&len, &[Value::Number(1.0)]).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::BadArgument { func: "len", arg: 1, .. }
        ));
    }
}
