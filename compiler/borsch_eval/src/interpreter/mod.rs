//! Host embedding surface.
//!
//! A host (file runner, REPL, test harness) builds one [`Interpreter`]
//! per package and hands it already parsed programs. Definitions made by
//! one program stay visible to the next, so a REPL evaluates every line
//! as its own program.

mod builder;

pub use builder::{InterpreterBuilder, DEFAULT_PACKAGE};

use borsch_ir::Program;
use borsch_runtime::{EvalMode, EvalResult, Package, SharedPrintHandler, State, Value};

use crate::evaluator::Evaluator;

pub struct Interpreter {
    package: String,
    state: State,
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Interpreter with the default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Evaluate one program in the package's global scope.
    ///
    /// Yields the value of the last statement. An uncaught error ends the
    /// program; its [`report`](borsch_runtime::EvalError::report) is what
    /// the host prints.
    #[tracing::instrument(level = "debug", skip_all, fields(package = %self.package))]
    pub fn evaluate(&mut self, program: &Program) -> EvalResult {
        let result = Evaluator::new(&mut self.state).run(program);
        if let Err(err) = &result {
            tracing::debug!(category = ?err.category(), "uncaught error");
        }
        result
    }

    /// A global binding of the package.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.state.ctx.global().get(name)
    }

    /// The package as a value, exposing its global bindings as attributes.
    pub fn package(&self) -> Value {
        Value::package(Package::new(
            self.package.as_str(),
            self.state.ctx.global().snapshot(),
        ))
    }

    pub fn package_name(&self) -> &str {
        &self.package
    }

    pub fn mode(&self) -> EvalMode {
        self.state.mode
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.state.print
    }

    /// Captured output of a buffering print handler; empty otherwise.
    pub fn output(&self) -> String {
        self.state.print.get_output()
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
