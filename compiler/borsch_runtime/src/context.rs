//! Lexical scopes.
//!
//! A [`Context`] is one shared global frame plus a stack of local frames,
//! innermost last. Frames are reference-counted: cloning a context
//! (capturing it in a closure) shares the frames rather than copying their
//! bindings, so later writes to a captured variable stay visible to both.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::builtins::builtins;
use crate::errors::{nil_assignment, scope_underflow, undefined_variable, EvalError, EvalResult};
use crate::value::Value;

/// Bindings of one frame.
pub type Bindings = FxHashMap<String, Value>;

/// Name of the `нуль` literal, which can never be rebound.
const NIL_NAME: &str = "нуль";

/// One shared frame of name bindings.
#[repr(transparent)]
#[derive(Clone, Default)]
pub struct Frame(Arc<RwLock<Bindings>>);

impl Frame {
    #[inline]
    pub fn new(bindings: Bindings) -> Self {
        Frame(Arc::new(RwLock::new(bindings)))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.read().get(name).cloned()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.0.read().contains_key(name)
    }

    #[inline]
    pub fn insert(&self, name: &str, value: Value) {
        self.0.write().insert(name.to_owned(), value);
    }

    /// Copy of the current bindings.
    pub fn snapshot(&self) -> Bindings {
        self.0.read().clone()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.0.read().keys().cloned().collect();
        names.sort();
        f.debug_tuple("Frame").field(&names).finish()
    }
}

/// Scope stack of one call path.
#[derive(Clone, Debug, Default)]
pub struct Context {
    global: Frame,
    scopes: Vec<Frame>,
}

impl Context {
    /// Fresh context whose global frame holds `bindings`.
    pub fn new(bindings: Bindings) -> Self {
        Context {
            global: Frame::new(bindings),
            scopes: Vec::new(),
        }
    }

    /// Context sharing the global frame with an empty local stack.
    pub fn derive(&self) -> Self {
        Context {
            global: self.global.clone(),
            scopes: Vec::new(),
        }
    }

    pub fn push_scope(&mut self, bindings: Bindings) {
        self.scopes.push(Frame::new(bindings));
    }

    /// Drop the innermost frame. Popping with no local frame left is an
    /// evaluator bug and reported as fatal.
    pub fn pop_scope(&mut self) -> Result<(), EvalError> {
        if self.scopes.pop().is_none() {
            tracing::debug!("scope stack underflow");
            return Err(scope_underflow());
        }
        Ok(())
    }

    /// Number of local frames above the global one.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Innermost to outermost, then the built-in names.
    pub fn get_var(&self, name: &str) -> EvalResult {
        self.frames()
            .find_map(|frame| frame.get(name))
            .or_else(|| builtins().name(name))
            .ok_or_else(|| undefined_variable(name))
    }

    /// Rebind an existing variable in the frame that holds it, or create it
    /// in the innermost frame.
    pub fn set_var(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if name == NIL_NAME {
            return Err(nil_assignment());
        }
        let frame = self
            .frames()
            .find(|frame| frame.contains(name))
            .unwrap_or_else(|| self.innermost());
        frame.insert(name, value);
        Ok(())
    }

    /// Bind in the innermost frame, shadowing any outer binding.
    pub fn define(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if name == NIL_NAME {
            return Err(nil_assignment());
        }
        self.innermost().insert(name, value);
        Ok(())
    }

    pub fn global(&self) -> &Frame {
        &self.global
    }

    /// The frame new definitions land in.
    pub fn innermost(&self) -> &Frame {
        self.scopes.last().unwrap_or(&self.global)
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.scopes.iter().rev().chain(std::iter::once(&self.global))
    }
}
