//! The evaluator and the helpers shared by expressions and statements.

use std::sync::Arc;

use borsch_ir::{Block, FunctionDef, Program};
use borsch_runtime::errors::not_a_class;
use borsch_runtime::{
    builtins, Bindings, Callable, CallableKind, ClassRef, EvalError, EvalResult, Kwargs, Parameter,
    ReturnType, State, Value,
};

use crate::stmt::Flow;

/// Walks one call tree.
///
/// A fresh evaluator is created for every user callable body; all of them
/// share the same [`State`].
pub struct Evaluator<'s> {
    pub(crate) state: &'s mut State,
    /// `повернути` is legal.
    pub(crate) in_function: bool,
    /// Function definitions become methods.
    pub(crate) in_class_body: bool,
}

impl<'s> Evaluator<'s> {
    /// Evaluator for top-level code.
    pub fn new(state: &'s mut State) -> Self {
        Evaluator {
            state,
            in_function: false,
            in_class_body: false,
        }
    }

    fn for_body(state: &'s mut State) -> Self {
        Evaluator {
            state,
            in_function: true,
            in_class_body: false,
        }
    }

    pub fn state(&mut self) -> &mut State {
        &mut *self.state
    }

    /// Execute a program in the current scope and yield the value of its
    /// last statement.
    pub fn run(&mut self, program: &Program) -> EvalResult {
        match self.exec_block(&program.stmts)? {
            Flow::Normal(value) | Flow::Return(value) => Ok(value),
        }
    }

    /// Run `f` inside a fresh scope seeded with `bindings`.
    ///
    /// The scope is popped on every path; a failing `f` wins over a
    /// failing pop.
    pub(crate) fn with_scope<R>(
        &mut self,
        bindings: Bindings,
        f: impl FnOnce(&mut Self) -> Result<R, EvalError>,
    ) -> Result<R, EvalError> {
        self.state.ctx.push_scope(bindings);
        let result = f(self);
        let popped = self.state.ctx.pop_scope();
        let value = result?;
        popped?;
        Ok(value)
    }

    /// Resolve a declared type name. An empty name accepts anything.
    pub(crate) fn resolve_class(&self, name: &str) -> Result<ClassRef, EvalError> {
        if name.is_empty() {
            return Ok(builtins().any.clone());
        }
        match self.state.ctx.get_var(name)? {
            Value::Class(class) => Ok(class),
            _ => Err(not_a_class(name)),
        }
    }

    /// Build a user callable closing over the current context.
    pub(crate) fn make_callable(
        &self,
        def: &Arc<FunctionDef>,
        kind: CallableKind,
    ) -> Result<Callable, EvalError> {
        let mut params = Vec::with_capacity(def.params.len());
        for decl in &def.params {
            let mut param = Parameter::new(decl.name.as_str(), self.resolve_class(&decl.type_name)?);
            if decl.nullable {
                param = param.nullable();
            }
            if decl.variadic {
                param = param.variadic();
            }
            params.push(param);
        }

        let mut returns = Vec::with_capacity(def.returns.len());
        for decl in &def.returns {
            let mut ret = ReturnType::new(self.resolve_class(&decl.type_name)?);
            if decl.nullable {
                ret = ret.nullable();
            }
            returns.push(ret);
        }

        let body = Arc::clone(def);
        let handler = move |state: &mut State, _: &[Value], _: &Kwargs| {
            Evaluator::for_body(state).run_body(&body.body)
        };
        Ok(Callable::new(kind, def.name.as_str(), params, returns, handler)
            .with_captured(self.state.ctx.clone()))
    }

    fn run_body(&mut self, body: &Block) -> EvalResult {
        match self.exec_block(body)? {
            Flow::Normal(_) => Ok(Value::Nil),
            Flow::Return(value) => Ok(value),
        }
    }
}
