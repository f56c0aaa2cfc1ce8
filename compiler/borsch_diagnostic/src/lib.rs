//! Diagnostics surface of the Borsch interpreter.
//!
//! Failures are reported as a list of trace frames, one per nested
//! evaluation level, followed by the error message:
//!
//! ```text
//! Відстеження (стек викликів):
//!   Файл "main.б", рядок 3, позиція 1,
//!     ф(1);
//!   Файл "main.б", рядок 2, позиція 5,
//!     повернути х / 0;
//! ділення на нуль
//! ```
//!
//! Frames are collected innermost first while an error propagates and are
//! rendered outermost first.

mod trace;

pub use trace::{TraceFrame, Traceback, TRACEBACK_HEADER};
