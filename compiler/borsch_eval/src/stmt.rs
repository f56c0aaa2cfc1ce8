//! Statements, blocks and control flow.

use std::sync::Arc;

use borsch_diagnostic::TraceFrame;
use borsch_ir::{special, Binding, Block, ClassDef, CondBranch, Expr, FunctionDef, Stmt, StmtKind};
use borsch_runtime::errors::{final_base, multiple_bases, not_iterable, return_outside_function};
use borsch_runtime::operators::{get_item, length, to_bool};
use borsch_runtime::{
    builtins, object_factory, Bindings, CallableKind, Class, EvalError, EvalResult, Value,
};
use borsch_stack::ensure_sufficient_stack;

use crate::evaluator::Evaluator;

/// How a statement finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Continue with the next statement; carries the statement's value.
    Normal(Value),
    /// `повернути` is unwinding to the enclosing callable.
    Return(Value),
}

impl Flow {
    pub fn is_return(&self) -> bool {
        matches!(self, Flow::Return(_))
    }
}

/// Result of executing a statement.
pub type ExecResult = Result<Flow, EvalError>;

impl Evaluator<'_> {
    /// Execute statements in order, stopping at the first `Return`.
    pub fn exec_block(&mut self, stmts: &[Stmt]) -> ExecResult {
        let mut last = Value::Nil;
        for stmt in stmts {
            match self.exec(stmt)? {
                Flow::Normal(value) => last = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal(last))
    }

    /// Execute `stmts` in a fresh scope seeded with `bindings`.
    pub(crate) fn exec_scoped(&mut self, bindings: Bindings, stmts: &[Stmt]) -> ExecResult {
        self.with_scope(bindings, |ev| ev.exec_block(stmts))
    }

    /// Execute one statement.
    ///
    /// Errors leaving a simple statement record a trace frame for it;
    /// compound statements leave that to the statements they contain.
    pub fn exec(&mut self, stmt: &Stmt) -> ExecResult {
        tracing::trace!(pos = %stmt.pos, "exec");
        let result = ensure_sufficient_stack(|| self.exec_kind(stmt));
        match &stmt.kind {
            StmtKind::Expr(_)
            | StmtKind::Return(_)
            | StmtKind::Throw(_)
            | StmtKind::FunctionDef(_)
            | StmtKind::ClassDef(_) => result.map_err(|err| err.with_frame(frame_of(stmt))),
            _ => result,
        }
    }

    fn exec_kind(&mut self, stmt: &Stmt) -> ExecResult {
        match &stmt.kind {
            StmtKind::Expr(expr) => Ok(Flow::Normal(self.eval(expr)?)),
            StmtKind::Block(body) => self.exec_scoped(Bindings::default(), body),
            StmtKind::If {
                branches,
                otherwise,
            } => self.exec_if(branches, otherwise.as_deref()),
            StmtKind::While { condition, body } => self.exec_while(condition, body),
            StmtKind::ForEach {
                index,
                item,
                iterable,
                body,
            } => self.exec_for_each(index, item, iterable, body),
            StmtKind::FunctionDef(def) => self.define_function(def).map(Flow::Normal),
            StmtKind::ClassDef(def) => self.define_class(def).map(Flow::Normal),
            StmtKind::Return(values) => self.exec_return(values),
            StmtKind::Throw(value) => self.exec_throw(value),
            StmtKind::Unsafe { body, catches } => self.exec_unsafe(stmt, body, catches),
            StmtKind::Empty => Ok(Flow::Normal(Value::Nil)),
        }
    }

    fn exec_if(&mut self, branches: &[CondBranch], otherwise: Option<&[Stmt]>) -> ExecResult {
        for branch in branches {
            let condition = self.eval(&branch.condition)?;
            if to_bool(self.state, &condition)? {
                return self.exec_scoped(Bindings::default(), &branch.body);
            }
        }
        match otherwise {
            Some(body) => self.exec_scoped(Bindings::default(), body),
            None => Ok(Flow::Normal(Value::Nil)),
        }
    }

    fn exec_while(&mut self, condition: &Expr, body: &Block) -> ExecResult {
        loop {
            let value = self.eval(condition)?;
            if !to_bool(self.state, &value)? {
                return Ok(Flow::Normal(Value::Nil));
            }
            let flow = self.exec_scoped(Bindings::default(), body)?;
            if flow.is_return() {
                return Ok(flow);
            }
        }
    }

    /// Iterates anything with a length and indexed reads, except
    /// dictionaries. The length is taken once, before the first
    /// iteration.
    fn exec_for_each(
        &mut self,
        index: &Binding,
        item: &Binding,
        iterable: &Expr,
        body: &Block,
    ) -> ExecResult {
        let sequence = self.eval(iterable)?;
        let class = sequence.class();
        let sequential = class.lookup(special::LENGTH).is_some()
            && class.lookup(special::GET_ITEM).is_some();
        if !sequential || matches!(sequence, Value::Dict(_)) {
            return Err(not_iterable(class.name()));
        }

        let len = length(self.state, &sequence)?;
        for i in 0..len {
            let position = Value::Int(i64::try_from(i).unwrap_or(i64::MAX));
            let mut scope = Bindings::default();
            if let Some(name) = index.name() {
                scope.insert(name.to_owned(), position.clone());
            }
            if let Some(name) = item.name() {
                scope.insert(name.to_owned(), get_item(self.state, &sequence, position)?);
            }
            let flow = self.exec_scoped(scope, body)?;
            if flow.is_return() {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal(Value::Nil))
    }

    /// Bind the callable under its name and yield it.
    fn define_function(&mut self, def: &Arc<FunctionDef>) -> EvalResult {
        let kind = if self.in_class_body {
            CallableKind::Method
        } else {
            CallableKind::Function
        };
        let function = Value::callable(self.make_callable(def, kind)?);
        self.state.ctx.define(&def.name, function.clone())?;
        Ok(function)
    }

    /// The class is bound before its body runs, so methods may refer to
    /// it. Names bound by the body become the class attributes.
    #[tracing::instrument(level = "debug", skip_all, fields(class = %def.name))]
    fn define_class(&mut self, def: &ClassDef) -> EvalResult {
        let base = match def.bases.as_slice() {
            [] => builtins().object.clone(),
            [name] => self.resolve_class(name)?,
            _ => return Err(multiple_bases(&def.name)),
        };
        if base.is_final() {
            return Err(final_base(base.name()));
        }

        let class = Class::new(def.name.as_str(), vec![base], def.is_final, Some(object_factory));
        let value = Value::Class(class.clone());
        self.state.ctx.define(&def.name, value.clone())?;

        let outer = (self.in_function, self.in_class_body);
        (self.in_function, self.in_class_body) = (false, true);
        let attributes = self.with_scope(Bindings::default(), |ev| {
            ev.exec_block(&def.body)?;
            Ok(ev.state.ctx.innermost().snapshot())
        });
        (self.in_function, self.in_class_body) = outer;

        class.initialize(attributes?)?;
        Ok(value)
    }

    /// Several values are returned as one list.
    fn exec_return(&mut self, values: &[Expr]) -> ExecResult {
        if !self.in_function {
            return Err(return_outside_function());
        }
        let value = match values {
            [] => Value::Nil,
            [single] => self.eval(single)?,
            many => {
                let mut items = Vec::with_capacity(many.len());
                for expr in many {
                    items.push(self.eval(expr)?);
                }
                Value::list(items)
            }
        };
        Ok(Flow::Return(value))
    }
}

/// Trace frame pointing at `stmt`.
pub(crate) fn frame_of(stmt: &Stmt) -> TraceFrame {
    TraceFrame::new(stmt.pos.clone(), stmt.source_text())
}
