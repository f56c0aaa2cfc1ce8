//! Runtime values.
//!
//! Scalars (`Int`, `Real`, `Bool`, `Nil`) are stored inline; everything
//! else lives behind a [`Heap`] handle, so copying a `Value` aliases the
//! underlying object. Mutation through one alias is visible through all
//! of them.
//!
//! Every value has exactly one owning class, obtained with
//! [`Value::class`]. Behavior (operators, conversions, indexing) is never
//! attached to the enum; it is looked up by name on that class.

mod dict_key;
mod heap;
mod object;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::builtins::builtins;
use crate::callable::Callable;
use crate::class::ClassRef;
use crate::errors::{attribute_not_found, EvalError, EvalResult};

pub use dict_key::DictKey;
pub use heap::Heap;
pub use object::{Object, Package};

/// Entries of a dictionary: hashed key to the original key and value.
pub type DictEntries = FxHashMap<DictKey, (Value, Value)>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// The `нуль` singleton.
    Nil,
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(Heap<String>),
    List(Heap<RwLock<Vec<Value>>>),
    Dict(Heap<RwLock<DictEntries>>),
    /// Method, function or lambda.
    Callable(Heap<Callable>),
    /// A class used as a value (construction, `тип(х)`, catch clauses).
    Class(ClassRef),
    Package(Heap<Package>),
    /// Instance of a user-defined class or of `Помилка`.
    Object(Heap<Object>),
}

impl Value {
    // Factories

    pub fn string(value: impl Into<String>) -> Self {
        Value::Str(Heap::new(value.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(RwLock::new(items)))
    }

    pub fn dict(entries: DictEntries) -> Self {
        Value::Dict(Heap::new(RwLock::new(entries)))
    }

    pub fn callable(callable: Callable) -> Self {
        Value::Callable(Heap::new(callable))
    }

    pub fn object(object: Object) -> Self {
        Value::Object(Heap::new(object))
    }

    pub fn package(package: Package) -> Self {
        Value::Package(Heap::new(package))
    }

    // Queries

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// The value's owning class.
    pub fn class(&self) -> ClassRef {
        let b = builtins();
        match self {
            Value::Nil => b.nil.clone(),
            Value::Int(_) => b.int.clone(),
            Value::Real(_) => b.real.clone(),
            Value::Bool(_) => b.bool.clone(),
            Value::Str(_) => b.string.clone(),
            Value::List(_) => b.list.clone(),
            Value::Dict(_) => b.dict.clone(),
            Value::Callable(c) => b.callable_class(c.kind).clone(),
            Value::Class(_) => b.type_.clone(),
            Value::Package(_) => b.package.clone(),
            Value::Object(o) => o.class().clone(),
        }
    }

    /// Name of the owning class.
    pub fn type_name(&self) -> String {
        self.class().name().to_owned()
    }

    /// Whether the value's class is `class` or derives from it.
    pub fn is_instance_of(&self, class: &ClassRef) -> bool {
        self.class().is_subclass_of(class)
    }

    /// Object identity for heap values, payload equality for scalars.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => Heap::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Heap::ptr_eq(a, b),
            (Value::Dict(a), Value::Dict(b)) => Heap::ptr_eq(a, b),
            (Value::Callable(a), Value::Callable(b)) => Heap::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Arc::ptr_eq(a, b),
            (Value::Package(a), Value::Package(b)) => Heap::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }

    // Attributes

    /// Resolve `name` on the value itself, then on its class chain.
    pub fn get_attribute(&self, name: &str) -> EvalResult {
        let found = match self {
            Value::Object(o) => o.get(name).or_else(|| o.class().lookup(name)),
            Value::Package(p) => p.get(name).or_else(|| self.class().lookup(name)),
            Value::Class(c) => c.lookup(name).or_else(|| self.class().lookup(name)),
            _ => self.class().lookup(name),
        };
        found.ok_or_else(|| attribute_not_found(&self.type_name(), name))
    }

    /// Write `name` into the value's own attributes.
    ///
    /// Only objects and packages carry their own attributes; classes are
    /// read-only once initialized.
    pub fn set_attribute(&self, name: &str, value: Value) -> Result<(), EvalError> {
        match self {
            Value::Object(o) => {
                o.set(name, value);
                Ok(())
            }
            Value::Package(p) => {
                p.set(name, value);
                Ok(())
            }
            _ => Err(attribute_not_found(&self.type_name(), name)),
        }
    }

    /// The class payload, if this is a class value.
    pub fn as_class(&self) -> Option<&ClassRef> {
        match self {
            Value::Class(c) => Some(c),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<ClassRef> for Value {
    fn from(class: ClassRef) -> Self {
        Value::Class(class)
    }
}

/// Structural equality for scalars, strings and containers; identity for
/// everything else. Host-side only: the language compares through `==`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => **a == **b,
            (Value::List(a), Value::List(b)) => {
                Heap::ptr_eq(a, b) || *a.read() == *b.read()
            }
            (Value::Dict(a), Value::Dict(b)) => {
                if Heap::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.read(), b.read());
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, (_, value))| b.get(key).is_some_and(|(_, v)| v == value))
            }
            _ => self.same(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("нуль"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v:?}"),
            Value::Bool(v) => write!(f, "{}", if *v { "істина" } else { "хиба" }),
            Value::Str(s) => write!(f, "{:?}", **s),
            Value::List(items) => f.debug_list().entries(items.read().iter()).finish(),
            Value::Dict(entries) => f
                .debug_map()
                .entries(entries.read().values().map(|(k, v)| (k, v)))
                .finish(),
            Value::Callable(c) => write!(f, "<{} {}>", c.kind.class_name(), c.display_name()),
            Value::Class(c) => write!(f, "<клас '{}'>", c.name()),
            Value::Package(p) => write!(f, "<пакет '{}'>", p.name()),
            Value::Object(o) => write!(f, "<об'єкт класу '{}'>", o.class().name()),
        }
    }
}
