//! `викинути`, `небезпечно` and `перехопити`.
//!
//! Only values thrown by `викинути` travel as catchable errors. Every
//! other failure passes through guarded blocks untouched.

use borsch_diagnostic::TraceFrame;
use borsch_ir::{CatchClause, Expr, Stmt};
use borsch_runtime::errors::{
    catch_requires_class, catch_requires_error_class, throw_requires_error_class, thrown,
};
use borsch_runtime::operators::to_string;
use borsch_runtime::{builtins, Bindings, EvalError, Value};

use crate::evaluator::Evaluator;
use crate::stmt::{frame_of, ExecResult, Flow};

/// Exception-aware view of an [`ExecResult`].
#[derive(Debug)]
pub enum Outcome {
    Normal(Value),
    Returning(Value),
    /// A thrown value in flight together with its trace.
    Throwing(EvalError),
    /// Any other error. Never intercepted.
    Fatal(EvalError),
}

impl Outcome {
    pub fn into_result(self) -> ExecResult {
        match self {
            Outcome::Normal(value) => Ok(Flow::Normal(value)),
            Outcome::Returning(value) => Ok(Flow::Return(value)),
            Outcome::Throwing(err) | Outcome::Fatal(err) => Err(err),
        }
    }
}

impl From<ExecResult> for Outcome {
    fn from(result: ExecResult) -> Self {
        match result {
            Ok(Flow::Normal(value)) => Outcome::Normal(value),
            Ok(Flow::Return(value)) => Outcome::Returning(value),
            Err(err) if err.is_catchable() => Outcome::Throwing(err),
            Err(err) => Outcome::Fatal(err),
        }
    }
}

impl Evaluator<'_> {
    /// The operand must be an instance of `Помилка` or a class deriving it.
    pub(crate) fn exec_throw(&mut self, value: &Expr) -> ExecResult {
        let value = self.eval(value)?;
        if !value.is_instance_of(&builtins().error) {
            return Err(throw_requires_error_class());
        }
        let text = to_string(self.state, &value)?;
        let class = value.type_name();
        tracing::debug!(%class, "throw");
        Err(thrown(value, &class, text))
    }

    /// Clauses are tried in source order; the first whose class is the
    /// thrown value's class or one of its bases handles it. With no
    /// match the error keeps propagating with one more frame.
    pub(crate) fn exec_unsafe(
        &mut self,
        stmt: &Stmt,
        body: &[Stmt],
        catches: &[CatchClause],
    ) -> ExecResult {
        let outcome = Outcome::from(self.exec_scoped(Bindings::default(), body));
        let Outcome::Throwing(error) = outcome else {
            return outcome.into_result();
        };

        let exception = error.thrown.clone().unwrap_or(Value::Nil);
        for clause in catches {
            if let Some(flow) = self.try_catch(clause, &exception)? {
                return Ok(flow);
            }
        }
        Err(error.with_frame(frame_of(stmt)))
    }

    fn try_catch(
        &mut self,
        clause: &CatchClause,
        exception: &Value,
    ) -> Result<Option<Flow>, EvalError> {
        let clause_frame = || {
            let header = format!("перехопити ({} {})", clause.error_class, clause.var);
            TraceFrame::new(clause.pos.clone(), header)
        };

        let declared = self
            .eval(&clause.error_class)
            .map_err(|err| err.with_frame(clause_frame()))?;
        let class = match declared {
            Value::Class(class) => class,
            other => {
                let name = to_string(self.state, &other)?;
                return Err(catch_requires_class(&name).with_frame(clause_frame()));
            }
        };

        if exception.class().is_subclass_of(&class) {
            tracing::debug!(class = %class.name(), "caught");
            let mut scope = Bindings::default();
            scope.insert(clause.var.clone(), exception.clone());
            return self.exec_scoped(scope, &clause.body).map(Some);
        }
        if !class.is_subclass_of(&builtins().error) {
            return Err(catch_requires_error_class().with_frame(clause_frame()));
        }
        Ok(None)
    }
}
