//! Base module: installed without a namespace, straight into globals.

use crate::errors::RuntimeError;
use crate::state::{InterpreterState, Value};
use crate::stdlib::{check_table, VERSION};

/// Entry point. The name argument is empty for the base module and ignored.
pub fn open(state: &mut InterpreterState, _args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let globals = state.globals().clone();
    {
        let mut g = globals.borrow_mut();
        g.set("print", Value::NativeFn(print));
        g.set("type", Value::NativeFn(type_of));
        g.set("tostring", Value::NativeFn(tostring));
        g.set("tonumber", Value::NativeFn(tonumber));
        g.set("assert", Value::NativeFn(assert_fn));
        g.set("rawget", Value::NativeFn(rawget));
        g.set("rawset", Value::NativeFn(rawset));
        g.set("_VERSION", Value::from(VERSION));
        // The environment refers to itself.
        g.set("_G", Value::Table(globals.clone()));
    }
    Ok(vec![Value::Table(globals)])
}

fn print(state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let line = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(state.stdout(), "{line}")?;
    Ok(vec![])
}

fn type_of(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    match args.first() {
        Some(value) => Ok(vec![Value::from(value.type_name())]),
        None => Err(RuntimeError::BadArgument {
            func: "type",
            arg: 1,
            expected: "value",
            got: "no value",
        }),
    }
}

fn tostring(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let value = args.first().cloned().unwrap_or(Value::Nil);
    Ok(vec![Value::from(value.to_string())])
}

fn tonumber(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let result = match args.first() {
        Some(Value::Number(n)) => Value::Number(*n),
        Some(Value::Str(s)) => s
            .trim()
            .parse::<f64>()
            .map_or(Value::Nil, Value::Number),
        _ => Value::Nil,
    };
    Ok(vec![result])
}

fn assert_fn(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    match args.first() {
        Some(value) if value.truthy() => Ok(args.to_vec()),
        _ => {
            let message = match args.get(1) {
                Some(Value::Str(s)) => s.to_string(),
                _ => "assertion failed!".to_string(),
            };
            Err(RuntimeError::Raised(message))
        }
    }
}

fn rawget(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let table = check_table("rawget", args, 1)?;
    let key = crate::stdlib::check_str("rawget", args, 2)?;
    let value = table.borrow().get(&key);
    Ok(vec![value])
}

fn rawset(_state: &mut InterpreterState, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let table = check_table("rawset", args, 1)?;
    let key = crate::stdlib::check_str("rawset", args, 2)?;
    let value = args.get(2).cloned().unwrap_or(Value::Nil);
    table.borrow_mut().set(key.to_string(), value);
    Ok(vec![Value::Table(table)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CaptureBuf(Rc<RefCell<Vec<u8>>>);

    impl io::Write for CaptureBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn open_base() -> InterpreterState {
        let mut state = InterpreterState::new();
        open(&mut state, &[Value::from("")]).unwrap();
        state
    }

    #[test]
    fn test_open_installs_into_globals() {
        let state = open_base();
        assert_eq!(state.global("print").type_name(), "function");
        assert_eq!(state.global("_VERSION"), Value::from(VERSION));

        // _G is the globals table itself.
        let g = state.global("_G");
        assert!(g.as_table().unwrap().ptr_eq(state.globals()));
    }

    #[test]
    fn test_print_joins_with_tabs() {
        let mut state = open_base();
        let buf = CaptureBuf::default();
        state.set_stdout(Box::new(buf.clone()));

        let print = state.global("print");
        state
            .call(&print, &[Value::from("a"), Value::Number(1.0)])
            .unwrap();
        assert_eq!(String::from_utf8(buf.0.borrow().clone()).unwrap(), "a\t1\n");
    }

    #[test]
    fn test_type_of() {
        let mut state = open_base();
        let type_fn = state.global("type");
        let results = state.call(&type_fn, &[Value::Nil]).unwrap();
        assert_eq!(results, vec![Value::from("nil")]);
    }

    #[test]
    fn test_tonumber() {
        let mut state = open_base();
        let tonumber = state.global("tonumber");
        assert_eq!(
            state.call(&tonumber, &[Value::from(" 42 ")]).unwrap(),
            vec![Value::Number(42.0)]
        );
        assert_eq!(
            state.call(&tonumber, &[Value::from("pear")]).unwrap(),
            vec![Value::Nil]
        );
    }

    #[test]
    fn test_rawget_rawset_roundtrip() {
        use crate::state::TableRef;

        let mut state = open_base();
        let rawset = state.global("rawset");
        let rawget = state.global("rawget");

        let t = Value::Table(TableRef::default());
        state
            .call(&rawset, &[t.clone(), Value::from("k"), Value::Number(9.0)])
            .unwrap();
        let results = state.call(&rawget, &[t, Value::from("k")]).unwrap();
        assert_eq!(results, vec![Value::Number(9.0)]);
    }

    #[test]
    fn test_assert_raises_on_falsey() {
        let mut state = open_base();
        let assert_fn = state.global("assert");
        let err = state
            .call(&assert_fn, &[Value::Boolean(false), Value::from("boom")])
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Raised(m) if m == "boom"));
    }
}
