//! Interpreter state and value representation.
//!
//! The state is the opaque per-instance handle the host owns: it holds the
//! globals table and the registry (non-global keyed storage for well-known
//! slots such as `"_PRELOAD"`). The installer borrows it mutably for the
//! duration of one call and never stores it.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Instant;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::errors::{RegistryError, RuntimeError};

/// Native function signature shared by installed bindings and module entry
/// points. Entry points receive the module name as their single argument.
pub type NativeFn = fn(&mut InterpreterState, &[Value]) -> Result<Vec<Value>, RuntimeError>;

/// A runtime value. Deliberately minimal: just enough representation for
/// standard-library bindings to be installed and observed.
#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(f64),
    Str(Rc<str>),
    Table(TableRef),
    NativeFn(NativeFn),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Table(_) => "table",
            Value::NativeFn(_) => "function",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Only `nil` and `false` are falsey.
    pub fn truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    pub fn as_table(&self) -> Option<&TableRef> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a.ptr_eq(b),
            (Value::NativeFn(a), Value::NativeFn(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
            Value::Table(t) => write!(f, "table: {:p}", Rc::as_ptr(&t.0)),
            Value::NativeFn(func) => write!(f, "function: 0x{:x}", *func as usize),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

/// A table: insertion-ordered string-keyed entries plus a sequence part.
#[derive(Default)]
pub struct Table {
    seq: Vec<Value>,
    entries: IndexMap<String, Value>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// `capacity` is a sizing hint for the keyed part, not a hard limit.
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            seq: Vec::new(),
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Returns `Nil` for an absent key.
    pub fn get(&self, key: &str) -> Value {
        self.entries.get(key).cloned().unwrap_or(Value::Nil)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Sequence part accessors, used by the `table` module bindings.
    pub fn push(&mut self, value: Value) {
        self.seq.push(value);
    }

    pub fn pop(&mut self) -> Value {
        self.seq.pop().unwrap_or(Value::Nil)
    }

    pub fn seq(&self) -> &[Value] {
        &self.seq
    }

    pub fn seq_len(&self) -> usize {
        self.seq.len()
    }
}

/// Shared handle to a table. Single-threaded by design (`Rc`), mirroring the
/// interpreter's no-concurrent-access contract.
#[derive(Clone)]
pub struct TableRef(Rc<RefCell<Table>>);

impl TableRef {
    pub fn new(table: Table) -> Self {
        TableRef(Rc::new(RefCell::new(table)))
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TableRef::new(Table::with_capacity(capacity))
    }

    pub fn borrow(&self) -> Ref<'_, Table> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Table> {
        self.0.borrow_mut()
    }

    pub fn ptr_eq(&self, other: &TableRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for TableRef {
    fn default() -> Self {
        TableRef::new(Table::new())
    }
}

// Identity only: tables can contain themselves (`_G`), so a structural
// Debug would recurse.
impl fmt::Debug for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table: {:p}", Rc::as_ptr(&self.0))
    }
}

/// One interpreter instance: globals, registry, output sink.
///
/// Not reentrant-safe; the exclusive borrow taken by every operation is the
/// serialization the embedding contract requires.
pub struct InterpreterState {
    globals: TableRef,
    registry: FxHashMap<String, Value>,
    stdout: Box<dyn Write>,
    started: Instant,
}

impl InterpreterState {
    /// Freshly created state: empty globals, empty registry, stdout output.
    pub fn new() -> Self {
        InterpreterState {
            globals: TableRef::default(),
            registry: FxHashMap::default(),
            stdout: Box::new(io::stdout()),
            started: Instant::now(),
        }
    }

    /// Redirect `print`/`io.write` output, e.g. to a capture buffer in tests.
    pub fn set_stdout(&mut self, writer: Box<dyn Write>) {
        self.stdout = writer;
    }

    pub fn stdout(&mut self) -> &mut dyn Write {
        &mut *self.stdout
    }

    pub fn globals(&self) -> &TableRef {
        &self.globals
    }

    pub fn global(&self, name: &str) -> Value {
        self.globals.borrow().get(name)
    }

    pub fn set_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.borrow_mut().set(name, value);
    }

    pub fn registry_get(&self, key: &str) -> Value {
        self.registry.get(key).cloned().unwrap_or(Value::Nil)
    }

    /// Find-or-create a table-valued registry slot.
    ///
    /// Returns the existing table if the slot already holds one; creates a
    /// table sized to `capacity` if the slot is empty; fails if the slot is
    /// occupied by a non-table value. The returned handle is a borrow of the
    /// registry's table, not a transfer of ownership.
    pub fn registry_table(
        &mut self,
        key: &str,
        capacity: usize,
    ) -> Result<TableRef, RegistryError> {
        match self.registry.get(key) {
            Some(Value::Table(t)) => Ok(t.clone()),
            Some(other) => Err(RegistryError::SlotOccupied {
                key: key.to_string(),
                found: other.type_name(),
            }),
            None => {
                let table = TableRef::with_capacity(capacity);
                self.registry
                    .insert(key.to_string(), Value::Table(table.clone()));
                Ok(table)
            }
        }
    }

    /// Invoke a callable value with the given arguments, synchronously, on
    /// the caller's stack.
    pub fn call(&mut self, func: &Value, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
        match func {
            Value::NativeFn(f) => f(self, args),
            other => Err(RuntimeError::NotCallable(other.type_name())),
        }
    }

    /// Seconds since this state was created; backs `os.clock`.
    pub fn uptime(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

impl Default for InterpreterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_globals_roundtrip() {
        let mut state = InterpreterState::new();
        assert!(state.global("answer").is_nil());

        state.set_global("answer", Value::Number(42.0));
        assert_eq!(state.global("answer"), Value::Number(42.0));
    }

    #[test]
    fn test_registry_table_creates_once() {
        let mut state = InterpreterState::new();
        let first = state.registry_table("_PRELOAD", 4).unwrap();
        first.borrow_mut().set("ffi", Value::Boolean(true));

        let second = state.registry_table("_PRELOAD", 0).unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(second.borrow().get("ffi"), Value::Boolean(true));
    }

    #[test]
    fn test_registry_table_rejects_occupied_slot() {
        let mut state = InterpreterState::new();
        state
            .registry
            .insert("_PRELOAD".to_string(), Value::Number(1.0));

        let err = state.registry_table("_PRELOAD", 0).unwrap_err();
        let RegistryError::SlotOccupied { key, found } = err;
        assert_eq!(key, "_PRELOAD");
        assert_eq!(found, "number");
    }

    #[test]
    fn test_call_non_callable() {
        let mut state = InterpreterState::new();
        let err = state.call(&Value::Number(1.0), &[]).unwrap_err();
        assert!(matches!(err, RuntimeError::NotCallable("number")));
    }

    #[test]
    fn test_call_native() {
        fn double(
            _state: &mut InterpreterState,
            args: &[Value],
        ) -> Result<Vec<Value>, RuntimeError> {
            let n = args[0].as_number().unwrap_or(0.0);
            Ok(vec![Value::Number(n * 2.0)])
        }

        let mut state = InterpreterState::new();
        let results = state.call(&Value::NativeFn(double), &[Value::Number(21.0)]).unwrap();
        assert_eq!(results, vec![Value::Number(42.0)]);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(3.5).to_string(), "3.5");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn test_table_debug_is_identity_not_structure() {
        let table = TableRef::default();
        // Self-referencing tables must not recurse when formatted.
        table
            .borrow_mut()
            .set("self", Value::Table(table.clone()));
        let text = format!("{table:?}");
        assert!(text.starts_with("table: 0x"));
    }

    #[test]
    fn test_table_sequence_part() {
        let mut table = Table::new();
        table.push(Value::Number(1.0));
        table.push(Value::Number(2.0));
        assert_eq!(table.seq_len(), 2);
        assert_eq!(table.pop(), Value::Number(2.0));
        assert_eq!(table.seq_len(), 1);
    }
}
