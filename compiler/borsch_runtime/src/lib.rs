//! Object model and runtime services of the Borsch interpreter.
//!
//! This crate owns everything the evaluator manipulates but does not
//! define how syntax is evaluated:
//!
//! - [`Value`], [`Class`] and the built-in class catalogue ([`builtins`])
//! - [`Context`]: lexical scope stacks with a shared global frame
//! - the method binder ([`call`], [`construct`], [`call_value`]), the only
//!   calling convention for callables
//! - the operator dispatch protocol ([`operators`])
//! - [`EvalError`] and the error taxonomy
//! - [`State`], the mutable state threaded through every native handler
//!
//! Operators, conversions and indexing are attributes looked up by name
//! on a value's class; nothing in the evaluator special-cases a built-in
//! type.

mod binder;
pub mod builtins;
mod call_stack;
mod callable;
mod class;
mod context;
pub mod errors;
mod eval_mode;
pub mod operators;
mod print_handler;
mod state;
mod value;

pub use binder::{call, call_by_name, call_method, call_value, construct, try_call_by_name};
pub use builtins::{builtins, object_factory, Builtins, ERROR_CLASS};
pub use call_stack::{CallFrame, CallStack};
pub use callable::{Callable, CallableKind, Handler, Kwargs, Parameter, ReturnType};
pub use class::{Attributes, Class, ClassRef, Factory};
pub use context::{Bindings, Context, Frame};
pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use eval_mode::EvalMode;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use state::State;
pub use value::{DictEntries, DictKey, Heap, Object, Package, Value};
