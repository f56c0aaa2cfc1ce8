//! Built-in class catalogue.
//!
//! All built-in classes and functions are created once, on first use, and
//! are immutable afterwards. Creation runs in two passes: every class
//! shell is allocated first, then each attribute map is filled, so
//! operators can name any built-in class (e.g. `==` returning `логічне`)
//! regardless of definition order.
//!
//! Initializers receive the catalogue under construction and must not call
//! [`builtins`] themselves.

mod collections;
mod functions;
mod meta;
mod numeric;
mod string;

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::callable::CallableKind;
use crate::class::{Attributes, Class, ClassRef, Factory};
use crate::value::{Object, Value};

/// Name of the base class every thrown value must derive.
pub const ERROR_CLASS: &str = "Помилка";

/// Process-wide built-in classes and names.
pub struct Builtins {
    /// Root of every class hierarchy.
    pub object: ClassRef,
    /// Accepts any value in parameter and return declarations.
    pub any: ClassRef,
    pub nil: ClassRef,
    pub int: ClassRef,
    pub real: ClassRef,
    pub bool: ClassRef,
    pub string: ClassRef,
    pub list: ClassRef,
    pub dict: ClassRef,
    /// Class of class values.
    pub type_: ClassRef,
    pub package: ClassRef,
    pub method: ClassRef,
    pub function: ClassRef,
    pub lambda: ClassRef,
    pub error: ClassRef,
    names: FxHashMap<String, Value>,
}

static BUILTINS: LazyLock<Builtins> = LazyLock::new(Builtins::bootstrap);

/// The shared catalogue.
#[inline]
pub fn builtins() -> &'static Builtins {
    &BUILTINS
}

/// Factory of plain objects: instances of user classes and of `Помилка`.
pub fn object_factory(class: &ClassRef) -> Value {
    Value::object(Object::new(class.clone()))
}

impl Builtins {
    fn bootstrap() -> Self {
        tracing::debug!("initializing built-in classes");

        let object = Class::new("об'єкт", Vec::new(), false, Some(object_factory));
        let derived = |name: &str, is_final: bool, factory: Option<Factory>| {
            Class::new(name, vec![object.clone()], is_final, factory)
        };

        let mut b = Builtins {
            object: object.clone(),
            any: derived("довільний", true, None),
            nil: derived("нульовий тип", true, None),
            int: derived("ціле", true, Some(|_| Value::Int(0))),
            real: derived("дійсне", true, Some(|_| Value::Real(0.0))),
            bool: derived("логічне", true, Some(|_| Value::Bool(false))),
            string: derived("рядок", true, Some(|_| Value::string(""))),
            list: derived("список", true, Some(|_| Value::list(Vec::new()))),
            dict: derived("словник", true, Some(|_| Value::dict(FxHashMap::default()))),
            type_: derived("тип", true, None),
            package: derived("пакет", true, None),
            method: derived("метод", true, None),
            function: derived("функція", true, None),
            lambda: derived("лямбда", true, None),
            error: derived(ERROR_CLASS, false, Some(object_factory)),
            names: FxHashMap::default(),
        };

        install(&b.object, meta::object_attributes(&b));
        install(&b.any, Attributes::default());
        install(&b.nil, meta::nil_attributes(&b));
        install(&b.type_, meta::type_attributes(&b));
        install(&b.package, meta::package_attributes(&b));
        for kind in [CallableKind::Method, CallableKind::Function, CallableKind::Lambda] {
            install(b.callable_class(kind), meta::callable_attributes(&b, kind));
        }
        install(&b.error, meta::error_attributes(&b));
        install(&b.int, numeric::int_attributes(&b));
        install(&b.real, numeric::real_attributes(&b));
        install(&b.bool, numeric::bool_attributes(&b));
        install(&b.string, string::string_attributes(&b));
        install(&b.list, collections::list_attributes(&b));
        install(&b.dict, collections::dict_attributes(&b));

        b.names = functions::names(&b);
        b
    }

    /// Class of callables of `kind`.
    pub fn callable_class(&self, kind: CallableKind) -> &ClassRef {
        match kind {
            CallableKind::Method => &self.method,
            CallableKind::Function => &self.function,
            CallableKind::Lambda => &self.lambda,
        }
    }

    /// Built-in name visible from every scope.
    pub fn name(&self, name: &str) -> Option<Value> {
        self.names.get(name).cloned()
    }

    /// Sorted built-in names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn install(class: &ClassRef, attributes: Attributes) {
    if let Err(err) = class.initialize(attributes) {
        tracing::error!(%err, "built-in class initialized twice");
    }
}
