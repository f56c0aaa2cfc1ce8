//! Attribute-carrying values: user objects and packages.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Value;
use crate::class::ClassRef;

/// Instance of a user-defined class.
///
/// Behavior comes from the class; the object only carries the attributes
/// written to it.
pub struct Object {
    class: ClassRef,
    attributes: RwLock<FxHashMap<String, Value>>,
}

impl Object {
    pub fn new(class: ClassRef) -> Self {
        Object {
            class,
            attributes: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.attributes.read().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: Value) {
        self.attributes.write().insert(name.to_owned(), value);
    }
}

/// Namespace produced by evaluating one compilation unit.
pub struct Package {
    name: String,
    attributes: RwLock<FxHashMap<String, Value>>,
}

impl Package {
    pub fn new(name: impl Into<String>, attributes: FxHashMap<String, Value>) -> Self {
        Package {
            name: name.into(),
            attributes: RwLock::new(attributes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.attributes.read().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: Value) {
        self.attributes.write().insert(name.to_owned(), value);
    }

    /// Sorted attribute names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.attributes.read().keys().cloned().collect();
        names.sort();
        names
    }
}
