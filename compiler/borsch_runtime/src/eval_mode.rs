//! Evaluation modes.
//!
//! The host picks a mode when building an interpreter; the evaluator asks
//! the mode for policy decisions instead of branching on the host.

/// Evaluation policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Running a script or REPL line: output goes to the configured sink.
    #[default]
    Interpret,
    /// Running under a test harness: output is captured and recursion is
    /// bounded so a runaway test fails instead of exhausting memory.
    TestRun,
}

impl EvalMode {
    /// Whether `друк` may write to the process's standard output.
    #[inline]
    pub fn allows_io(self) -> bool {
        matches!(self, Self::Interpret)
    }

    /// Maximum nesting of callable invocations, or `None` for unlimited.
    ///
    /// - `Interpret`: `None` on native (the evaluator grows its stack), 200 on WASM
    /// - `TestRun`: always 500
    #[inline]
    pub fn max_call_depth(self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::TestRun => Some(500),
        }
    }
}
