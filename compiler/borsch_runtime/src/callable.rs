//! Methods, functions and lambdas.
//!
//! All three share one representation and one calling convention; the
//! [`CallableKind`] only records how the callable was introduced and
//! selects its class (`метод`, `функція`, `лямбда`).

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::builtins::builtins;
use crate::class::ClassRef;
use crate::context::Context;
use crate::errors::EvalResult;
use crate::state::State;
use crate::value::Value;

/// Bound parameters, by name.
pub type Kwargs = FxHashMap<String, Value>;

/// Native body of a callable.
///
/// Receives the interpreter state (whose context already holds the bound
/// parameters), the positional arguments, and the same bindings by name.
pub type Handler = dyn Fn(&mut State, &[Value], &Kwargs) -> EvalResult + Send + Sync;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CallableKind {
    /// Defined in a class body; the receiver is passed implicitly.
    Method,
    Function,
    Lambda,
}

impl CallableKind {
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Method => "метод",
            Self::Function => "функція",
            Self::Lambda => "лямбда",
        }
    }
}

/// A declared parameter.
#[derive(Clone)]
pub struct Parameter {
    pub name: String,
    /// Accepted classes; a subclass of any of them is accepted too.
    pub classes: Vec<ClassRef>,
    pub nullable: bool,
    /// Collects all remaining arguments. Only the last parameter may be
    /// variadic.
    pub variadic: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, class: ClassRef) -> Self {
        Parameter {
            name: name.into(),
            classes: vec![class],
            nullable: false,
            variadic: false,
        }
    }

    /// Parameter accepting any of `classes`.
    pub fn one_of(name: impl Into<String>, classes: Vec<ClassRef>) -> Self {
        Parameter {
            name: name.into(),
            classes,
            nullable: false,
            variadic: false,
        }
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Names of the accepted classes, for diagnostics.
    pub fn type_name(&self) -> String {
        let names: Vec<&str> = self.classes.iter().map(|c| c.name()).collect();
        names.join(" або ")
    }

    pub fn accepts_any(&self) -> bool {
        let any = &builtins().any;
        self.classes.iter().any(|c| Arc::ptr_eq(c, any))
    }

    /// Class check ignoring nullability. Classes match by identity; a
    /// derived class does not satisfy its base.
    pub fn accepts_class(&self, class: &ClassRef) -> bool {
        self.accepts_any() || self.classes.iter().any(|c| Arc::ptr_eq(c, class))
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name())?;
        if self.nullable {
            f.write_str("?")?;
        }
        if self.variadic {
            f.write_str("...")?;
        }
        Ok(())
    }
}

/// A declared return type.
#[derive(Clone)]
pub struct ReturnType {
    pub class: ClassRef,
    pub nullable: bool,
}

impl ReturnType {
    pub fn new(class: ClassRef) -> Self {
        ReturnType {
            class,
            nullable: false,
        }
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn type_name(&self) -> String {
        if self.nullable {
            format!("{}?", self.class.name())
        } else {
            self.class.name().to_owned()
        }
    }
}

/// Method, function or lambda value.
pub struct Callable {
    /// Empty for lambdas.
    pub name: String,
    pub kind: CallableKind,
    pub params: Vec<Parameter>,
    /// Zero entries: unchecked. One: the result itself. More: a list of
    /// exactly that many results.
    pub returns: Vec<ReturnType>,
    handler: Arc<Handler>,
    /// Definition-site context of user callables.
    captured: Option<Context>,
}

impl Callable {
    pub fn new<F>(
        kind: CallableKind,
        name: impl Into<String>,
        params: Vec<Parameter>,
        returns: Vec<ReturnType>,
        handler: F,
    ) -> Self
    where
        F: Fn(&mut State, &[Value], &Kwargs) -> EvalResult + Send + Sync + 'static,
    {
        Callable {
            name: name.into(),
            kind,
            params,
            returns,
            handler: Arc::new(handler),
            captured: None,
        }
    }

    /// Close over `context`; calls will run on top of its frames.
    #[must_use]
    pub fn with_captured(mut self, context: Context) -> Self {
        self.captured = Some(context);
        self
    }

    pub fn captured(&self) -> Option<&Context> {
        self.captured.as_ref()
    }

    pub(crate) fn handler(&self) -> &Handler {
        &*self.handler
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "лямбда-вираз"
        } else {
            &self.name
        }
    }

    /// The trailing variadic parameter, if any.
    pub fn variadic(&self) -> Option<&Parameter> {
        self.params.last().filter(|p| p.variadic)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
