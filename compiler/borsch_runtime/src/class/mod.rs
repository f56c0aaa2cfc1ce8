//! Classes: names, single-chain inheritance and attribute maps.
//!
//! Methods, operators and nested values all live in one attribute map per
//! class. Operators are stored under reserved names (`__додати__`,
//! `__рівне__`, ...), so overloading an operator is just defining an
//! attribute, and dispatch is a walk up the base chain.
//!
//! A class is created as a shell first and its attribute map is filled
//! exactly once by [`Class::initialize`]. This lets methods refer to their
//! own class (e.g. in parameter types) and lets a class body reference the
//! class being defined.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use crate::errors::{class_already_initialized, not_instantiable, EvalError, EvalResult};
use crate::value::Value;

/// Shared handle to a class. Classes are never owned by their instances.
pub type ClassRef = Arc<Class>;

/// Attribute map of a class.
pub type Attributes = FxHashMap<String, Value>;

/// Produces the empty instance handed to a constructor.
pub type Factory = fn(&ClassRef) -> Value;

pub struct Class {
    name: String,
    is_final: bool,
    bases: Vec<ClassRef>,
    attributes: OnceLock<Attributes>,
    factory: Option<Factory>,
}

impl Class {
    /// Create an uninitialized class.
    ///
    /// `bases` is empty only for the root class.
    pub fn new(
        name: impl Into<String>,
        bases: Vec<ClassRef>,
        is_final: bool,
        factory: Option<Factory>,
    ) -> ClassRef {
        Arc::new(Class {
            name: name.into(),
            is_final,
            bases,
            attributes: OnceLock::new(),
            factory,
        })
    }

    /// Fill the attribute map. Fails if it was already filled.
    pub fn initialize(&self, attributes: Attributes) -> Result<(), EvalError> {
        self.attributes
            .set(attributes)
            .map_err(|_| class_already_initialized(&self.name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn bases(&self) -> &[ClassRef] {
        &self.bases
    }

    pub fn is_initialized(&self) -> bool {
        self.attributes.get().is_some()
    }

    /// Attribute defined directly on this class.
    pub fn own_attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get().and_then(|attrs| attrs.get(name)).cloned()
    }

    /// Resolve `name` on this class, then on each base in declaration
    /// order, first hit wins.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.own_attribute(name)
            .or_else(|| self.bases.iter().find_map(|base| base.lookup(name)))
    }

    /// Whether `candidate` appears anywhere in the base chain.
    ///
    /// A class is not its own base; see [`Class::is_subclass_of`].
    pub fn has_base(&self, candidate: &ClassRef) -> bool {
        self.bases
            .iter()
            .any(|base| Arc::ptr_eq(base, candidate) || base.has_base(candidate))
    }

    /// `self == candidate` or `self` derives from it.
    pub fn is_subclass_of(&self, candidate: &ClassRef) -> bool {
        std::ptr::eq(self, Arc::as_ptr(candidate)) || self.has_base(candidate)
    }

    /// Empty instance for the construction protocol.
    pub fn instantiate(class: &ClassRef) -> EvalResult {
        match class.factory {
            Some(factory) => Ok(factory(class)),
            None => Err(not_instantiable(&class.name)),
        }
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bases: Vec<&str> = self.bases.iter().map(|b| b.name()).collect();
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("bases", &bases)
            .field("is_final", &self.is_final)
            .finish_non_exhaustive()
    }
}
