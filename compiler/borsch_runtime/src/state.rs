//! Mutable interpreter state handed to every native handler.

use std::mem;

use rustc_hash::FxHashSet;

use crate::call_stack::CallStack;
use crate::context::Context;
use crate::eval_mode::EvalMode;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Everything a running call tree owns.
///
/// Exactly one `State` exists per evaluation; it is threaded by `&mut`
/// through the evaluator, the binder and every native handler.
pub struct State {
    /// Scope stack of the currently executing callable.
    pub ctx: Context,
    pub call_stack: CallStack,
    pub mode: EvalMode,
    pub print: SharedPrintHandler,
    /// Addresses of the containers whose string form is being built.
    pub(crate) rendering: FxHashSet<usize>,
}

impl State {
    pub fn new(ctx: Context, mode: EvalMode, print: SharedPrintHandler) -> Self {
        State {
            ctx,
            call_stack: CallStack::new(mode.max_call_depth()),
            mode,
            print,
            rendering: FxHashSet::default(),
        }
    }

    /// Install `ctx` as the current context, returning the previous one.
    pub fn swap_context(&mut self, ctx: Context) -> Context {
        mem::replace(&mut self.ctx, ctx)
    }
}

impl Default for State {
    fn default() -> Self {
        State::new(Context::default(), EvalMode::default(), stdout_handler())
    }
}
