//! The runtime value type.

use std::fmt;
use std::sync::Arc;

use crate::engine::Engine;
use crate::errors::EvalResult;
use crate::namespace::{Namespace, SharedNamespace, TO_STRING_KEY};

/// Signature of a host function.
///
/// Receives the running engine and the number of arguments the call site
/// passed. The arguments are on top of the engine's stack, last argument on
/// top; the function pops exactly `argc` of them and returns its result
/// (`Value::Null` for "no result").
pub type NativeFn = dyn Fn(&mut dyn Engine, u8) -> EvalResult + Send + Sync;

/// A host function value, compared by identity.
#[derive(Clone)]
pub struct Callable(Arc<NativeFn>);

impl Callable {
    pub fn new(f: impl Fn(&mut dyn Engine, u8) -> EvalResult + Send + Sync + 'static) -> Self {
        Callable(Arc::new(f))
    }

    /// Invoke with `argc` arguments already pushed.
    #[inline]
    pub fn call(&self, engine: &mut dyn Engine, argc: u8) -> EvalResult {
        (self.0)(engine, argc)
    }

    fn address(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function@0x{:08x}>", self.address())
    }
}

/// Opaque host payload carried by [`Value::Object`].
///
/// Rendered through its `Display` impl and compared by identity.
pub trait HostObject: fmt::Display + Send + Sync + 'static {}

impl<T: fmt::Display + Send + Sync + 'static> HostObject for T {}

/// Runtime value.
///
/// Values are immutable once built; cloning is cheap (strings and
/// containers are reference counted).
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(Arc<str>),
    Function(Callable),
    Map(SharedNamespace),
    Object(Arc<dyn HostObject>),
}

/// Kind of a value, for error messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Function,
    Map,
    Object,
}

impl ValueKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::String => "String",
            Self::Function => "Function",
            Self::Map => "Map",
            Self::Object => "Object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Build a function value.
    pub fn function(f: impl Fn(&mut dyn Engine, u8) -> EvalResult + Send + Sync + 'static) -> Self {
        Value::Function(Callable::new(f))
    }

    /// Build an object value.
    pub fn object(object: impl HostObject) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Build a string value.
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Arc::from(s.as_ref()))
    }

    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Function(_) => ValueKind::Function,
            Self::Map(_) => ValueKind::Map,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// `null` and `false` are falsy; every other value is truthy.
    #[inline]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean(false))
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&SharedNamespace> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Callable> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

/// Write a number the way templates show it: integral values without a
/// fractional part, very large or very small magnitudes in exponent form,
/// everything else as the shortest round-tripping decimal.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return write!(f, "{}", n as i64);
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        return write!(f, "{n:e}");
    }
    write!(f, "{n}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write_number(f, *n),
            Self::String(s) => f.write_str(s),
            Self::Function(func) => write!(f, "{func:?}"),
            Self::Map(map) => {
                // Release the lock before running the supplier.
                let custom = map.read().supplier(TO_STRING_KEY);
                match custom {
                    Some(supplier) => write!(f, "{}", supplier()),
                    None => f.write_str("<map>"),
                }
            }
            Self::Object(object) => write!(f, "{object}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Boolean(b) => write!(f, "Boolean({b})"),
            Self::Number(n) => write!(f, "Number({n})"),
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Function(func) => write!(f, "Function({func:?})"),
            Self::Map(map) => write!(f, "Map({:?})", map.read()),
            Self::Object(object) => write!(f, "Object({object})"),
        }
    }
}

// Conversions

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

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::String(s)
    }
}

impl From<Callable> for Value {
    fn from(f: Callable) -> Self {
        Value::Function(f)
    }
}

impl From<Namespace> for Value {
    fn from(map: Namespace) -> Self {
        Value::Map(map.into_shared())
    }
}

impl From<SharedNamespace> for Value {
    fn from(map: SharedNamespace) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
