//! Hashable projection of values used as dictionary keys.

use std::sync::Arc;

use super::Value;
use crate::errors::{unhashable_key, EvalError};

/// Scalars and strings hash by content, mutable containers are rejected,
/// and every other value hashes by identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DictKey {
    Nil,
    Int(i64),
    /// Bit pattern of the real.
    Real(u64),
    Bool(bool),
    Str(String),
    Identity(usize),
}

impl DictKey {
    pub fn from_value(value: &Value) -> Result<Self, EvalError> {
        Ok(match value {
            Value::Nil => DictKey::Nil,
            Value::Int(v) => DictKey::Int(*v),
            Value::Real(v) => DictKey::Real(v.to_bits()),
            Value::Bool(v) => DictKey::Bool(*v),
            Value::Str(s) => DictKey::Str((**s).clone()),
            Value::List(_) | Value::Dict(_) => return Err(unhashable_key(&value.type_name())),
            Value::Callable(c) => DictKey::Identity(c.addr()),
            Value::Class(c) => DictKey::Identity(Arc::as_ptr(c).cast::<()>() as usize),
            Value::Package(p) => DictKey::Identity(p.addr()),
            Value::Object(o) => DictKey::Identity(o.addr()),
        })
    }
}
