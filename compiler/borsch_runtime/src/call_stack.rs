//! Live stack of callable invocations.
//!
//! The binder pushes one [`CallFrame`] per invocation and pops it on every
//! exit path. The depth limit comes from [`EvalMode::max_call_depth`].
//!
//! [`EvalMode::max_call_depth`]: crate::EvalMode::max_call_depth

use crate::errors::{recursion_limit_exceeded, EvalError};

/// One active invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Callable name; empty for lambdas.
    pub name: String,
}

impl CallFrame {
    pub fn new(name: impl Into<String>) -> Self {
        CallFrame { name: name.into() }
    }
}

#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Enter a callable, failing if the depth limit would be exceeded.
    #[inline]
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    #[inline]
    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop() on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Innermost invocation.
    pub fn current(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}
