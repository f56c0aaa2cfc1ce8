//! Borsch Eval - tree-walking evaluator for Borsch programs.
//!
//! # Architecture
//!
//! - `Evaluator`: walks one call tree over a borrowed [`State`]
//! - `expr`: expression evaluation and l-value assignment
//! - `stmt`: statements, blocks and the [`Flow`] signal
//! - `exception`: `викинути` and `небезпечно`/`перехопити` on top of
//!   the four-state [`Outcome`]
//! - `Interpreter`: host entry point, configured through
//!   [`InterpreterBuilder`]
//!
//! Object model, scopes, call binding and the built-in classes live in
//! `borsch_runtime` and are re-exported here for hosts.

mod evaluator;
mod exception;
mod expr;
pub mod interpreter;
mod stmt;

use std::sync::Once;

pub use borsch_runtime::{
    buffer_handler, silent_handler, stdout_handler, Bindings, Callable, CallableKind, ClassRef,
    ErrorCategory, EvalError, EvalErrorKind, EvalMode, EvalResult, SharedPrintHandler, State, Value,
};
pub use evaluator::Evaluator;
pub use exception::Outcome;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use stmt::{ExecResult, Flow};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=borsch_eval=debug`
/// or `RUST_LOG=borsch_runtime=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
