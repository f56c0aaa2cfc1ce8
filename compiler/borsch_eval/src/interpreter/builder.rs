//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use borsch_runtime::{
    buffer_handler, stdout_handler, Bindings, Context, EvalMode, SharedPrintHandler, State, Value,
};

use super::Interpreter;

/// Package name used when none is given.
pub const DEFAULT_PACKAGE: &str = "__main__";

/// Builder for [`Interpreter`].
///
/// - `EvalMode::Interpret` for running scripts and the REPL
/// - `EvalMode::TestRun` for test harnesses: bounded recursion and
///   buffered output
pub struct InterpreterBuilder {
    package: String,
    mode: EvalMode,
    print_handler: Option<SharedPrintHandler>,
    bindings: Bindings,
}

impl InterpreterBuilder {
    /// Create a new builder with default `Interpret` mode.
    pub fn new() -> Self {
        InterpreterBuilder {
            package: DEFAULT_PACKAGE.to_owned(),
            mode: EvalMode::default(),
            print_handler: None,
            bindings: Bindings::default(),
        }
    }

    /// Name of the package whose global scope the programs run in.
    #[must_use]
    pub fn package(mut self, name: impl Into<String>) -> Self {
        self.package = name.into();
        self
    }

    /// Set the evaluation mode.
    ///
    /// Controls the recursion limit and the default print handler.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the print handler used by `друк`.
    ///
    /// Default is stdout for `Interpret` mode and a buffer otherwise.
    /// Overrides mode-based default.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Preload a global binding.
    #[must_use]
    pub fn binding(mut self, name: impl Into<String>, value: Value) -> Self {
        self.bindings.insert(name.into(), value);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let print = self.print_handler.unwrap_or_else(|| {
            if self.mode.allows_io() {
                stdout_handler()
            } else {
                buffer_handler()
            }
        });
        tracing::debug!(package = %self.package, mode = ?self.mode, "interpreter built");
        Interpreter {
            package: self.package,
            state: State::new(Context::new(self.bindings), self.mode, print),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
