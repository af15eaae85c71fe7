//! The universal dynamic value.
//!
//! # Heap Enforcement
//!
//! All composite payloads (string, list, map, extension objects, OS handles)
//! go through factory methods on `Value`. The `Heap<T>` wrapper has a
//! crate-private constructor, so host code cannot allocate payloads directly.
//!
//! # Aliasing Contract
//!
//! Cloning a `Value` that holds a composite or custom payload does NOT deep
//! copy the underlying container: both values alias the same storage, and a
//! mutation performed through one is visible through the other. This is a
//! contract, not an accident — hosts that need an independent copy must build
//! one element by element.
//!
//! ```
//! use skald_value::Value;
//!
//! let a = Value::empty_list();
//! a.push(Value::int(1)).unwrap();
//! let b = a.clone();
//! b.push(Value::int(2)).unwrap();
//! assert_eq!(a.size().unwrap(), 2); // mutation through `b` visible through `a`
//! ```
//!
//! # Thread Safety
//!
//! Payloads are `Arc`-counted and the mutable containers (list/map) sit
//! behind a `parking_lot::RwLock`, so values may be shared across threads.

mod heap;

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::process::Child;
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::custom::CustomValue;
use crate::errors::{kind_mismatch, not_callable, ValueError, ValueResult};
use crate::handles::{FileHandle, ProcessHandle, ThreadHandle};

pub use heap::Heap;

/// Host function signature for `Value::Function`.
pub type HostFn = fn(&[Value]) -> ValueResult;

/// Shared list payload.
pub type ListPayload = RwLock<Vec<Value>>;
/// Shared map payload. String-keyed, unordered.
pub type MapPayload = RwLock<FxHashMap<String, Value>>;

/// Universal dynamic value.
///
/// Exactly one kind is active at a time; the discriminant and the payload
/// are inseparable by construction.
#[derive(Clone)]
pub enum Value {
    /// Sentinel state with no payload.
    Undefined,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer value.
    Int(i64),
    /// 64-bit float value.
    Float(f64),
    /// String value (shared, immutable payload).
    Str(Heap<String>),
    /// Ordered list of values (shared, mutable payload).
    List(Heap<ListPayload>),
    /// String-keyed map of values (shared, mutable payload).
    Map(Heap<MapPayload>),
    /// Host-supplied extension object, independently reference-counted.
    Custom(Heap<dyn CustomValue>),
    /// Host function pointer with a display name.
    Function(HostFn, &'static str),
    /// Opaque file handle.
    File(Heap<FileHandle>),
    /// Opaque thread handle.
    Thread(Heap<ThreadHandle>),
    /// Opaque process handle.
    Process(Heap<ProcessHandle>),
}

// Factory Methods (the only way to construct composite payloads)

impl Value {
    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a float value.
    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a boolean value.
    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value from existing elements.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(RwLock::new(items)))
    }

    /// Create an empty list value.
    #[inline]
    pub fn empty_list() -> Self {
        Value::list(Vec::new())
    }

    /// Create a map value from existing entries.
    #[inline]
    pub fn map(entries: FxHashMap<String, Value>) -> Self {
        Value::Map(Heap::new(RwLock::new(entries)))
    }

    /// Create an empty map value.
    #[inline]
    pub fn empty_map() -> Self {
        Value::map(FxHashMap::default())
    }

    /// Create a list of string values from process-style arguments.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::list(args.into_iter().map(Value::string).collect())
    }

    /// Create a custom value from a host extension object.
    ///
    /// The extension carries its own reference count (the `Arc` inside the
    /// handle), released exactly once per owning `Value` dropped.
    pub fn custom<T: CustomValue + 'static>(ext: T) -> Self {
        let arc: Arc<dyn CustomValue> = Arc::new(ext);
        Value::Custom(Heap::from_arc(arc))
    }

    /// Create a host function value.
    #[inline]
    pub fn function(f: HostFn, name: &'static str) -> Self {
        Value::Function(f, name)
    }

    /// Create an opaque file handle value.
    pub fn file(file: File) -> Self {
        Value::File(Heap::new(FileHandle::new(file)))
    }

    /// Create an opaque thread handle value.
    pub fn thread(handle: JoinHandle<Value>) -> Self {
        Value::Thread(Heap::new(ThreadHandle::new(handle)))
    }

    /// Create an opaque process handle value.
    pub fn process(child: Child) -> Self {
        Value::Process(Heap::new(ProcessHandle::new(child)))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

// Introspection

impl Value {
    /// Whether this value holds anything at all.
    ///
    /// Reports on the kind tag alone; no payload is touched.
    #[inline]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Value::Undefined)
    }

    /// Human-readable kind tag.
    ///
    /// Custom values delegate to the extension's self-reported name.
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Value::Undefined => Cow::Borrowed("undefined"),
            Value::Bool(_) => Cow::Borrowed("bool"),
            Value::Int(_) => Cow::Borrowed("int"),
            Value::Float(_) => Cow::Borrowed("float"),
            Value::Str(_) => Cow::Borrowed("str"),
            Value::List(_) => Cow::Borrowed("list"),
            Value::Map(_) => Cow::Borrowed("map"),
            Value::Custom(ext) => Cow::Owned(ext.kind_name().to_string()),
            Value::Function(_, _) => Cow::Borrowed("function"),
            Value::File(_) => Cow::Borrowed("file"),
            Value::Thread(_) => Cow::Borrowed("thread"),
            Value::Process(_) => Cow::Borrowed("process"),
        }
    }
}

// Coercions
//
// The coercion table: each conversion either has a rule or fails with
// KindMismatch. Custom values delegate to the extension.

impl Value {
    /// Coerce to a boolean.
    ///
    /// Bool is itself; Int and Float are true when nonzero; Str is true when
    /// non-empty. No rule for the remaining kinds.
    pub fn to_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Int(n) => Ok(*n != 0),
            Value::Float(f) => Ok(*f != 0.0),
            Value::Str(s) => Ok(!s.is_empty()),
            Value::Custom(ext) => ext.to_bool(),
            other => Err(kind_mismatch("bool", &other.type_name())),
        }
    }

    /// Coerce to an integer.
    ///
    /// Float truncates toward zero; Str must parse as a decimal integer.
    pub fn to_int(&self) -> Result<i64, ValueError> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Float(f) => Ok(f.trunc() as i64),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| kind_mismatch("int", "str")),
            Value::Custom(ext) => ext.to_int(),
            other => Err(kind_mismatch("int", &other.type_name())),
        }
    }

    /// Coerce to a float.
    pub fn to_float(&self) -> Result<f64, ValueError> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(n) => Ok(*n as f64),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| kind_mismatch("float", "str")),
            Value::Custom(ext) => ext.to_float(),
            other => Err(kind_mismatch("float", &other.type_name())),
        }
    }

    /// Coerce to text.
    ///
    /// Lists join their elements' text with a single space. Maps have no
    /// text rule and fail with KindMismatch.
    pub fn to_text(&self) -> Result<String, ValueError> {
        match self {
            Value::Str(s) => Ok((**s).clone()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::List(items) => {
                let items = items.read();
                let mut parts = Vec::with_capacity(items.len());
                for item in items.iter() {
                    parts.push(item.to_text()?);
                }
                Ok(parts.join(" "))
            }
            Value::Custom(ext) => ext.to_text(),
            other => Err(kind_mismatch("str", &other.type_name())),
        }
    }
}

// Calls

impl Value {
    /// Invoke a function value with the given arguments.
    pub fn call(&self, args: &[Value]) -> ValueResult {
        match self {
            Value::Function(f, _) => f(args),
            other => Err(not_callable(&other.type_name())),
        }
    }
}

// Equality
//
// Same-kind structural equality, plus the Int/Float promotion pair.
// Extension objects and OS handles compare by payload identity.
// No ordering is defined here: ordering goes through the coercion engine,
// where ordering strings/lists/maps is an unsupported operation.

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) => (*a as f64) == *b,
            (Value::Float(a), Value::Int(b)) => *a == (*b as f64),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                if Heap::ptr_eq(a, b) {
                    return true;
                }
                let a = a.read();
                let b = b.read();
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Value::Map(a), Value::Map(b)) => {
                if Heap::ptr_eq(a, b) {
                    return true;
                }
                let a = a.read();
                let b = b.read();
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).is_some_and(|bv| v == bv))
            }
            (Value::Custom(a), Value::Custom(b)) => Heap::ptr_eq(a, b),
            (Value::Function(_, a), Value::Function(_, b)) => a == b,
            (Value::File(a), Value::File(b)) => Heap::ptr_eq(a, b),
            (Value::Thread(a), Value::Thread(b)) => Heap::ptr_eq(a, b),
            (Value::Process(a), Value::Process(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &*items.read()),
            Value::Map(map) => write!(f, "Map({:?})", &*map.read()),
            Value::Custom(ext) => write!(f, "Custom({ext:?})"),
            Value::Function(_, name) => write!(f, "Function({name})"),
            Value::File(h) => write!(f, "File({h:?})"),
            Value::Thread(h) => write!(f, "Thread({h:?})"),
            Value::Process(h) => write!(f, "Process({h:?})"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::List(items) => {
                let items = items.read();
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                let map = map.read();
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
            Value::Custom(ext) => write!(f, "<{}>", ext.kind_name()),
            Value::Function(_, name) => write!(f, "<function {name}>"),
            Value::File(_) => write!(f, "<file>"),
            Value::Thread(_) => write!(f, "<thread>"),
            Value::Process(_) => write!(f, "<process>"),
        }
    }
}

#[cfg(test)]
mod tests;
