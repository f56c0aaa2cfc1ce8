//! Trace frames accumulated while an error propagates.

use std::fmt;

use borsch_ir::Position;

/// Header printed by hosts above a rendered traceback.
pub const TRACEBACK_HEADER: &str = "Відстеження (стек викликів):";

/// One evaluation level an error passed through.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TraceFrame {
    pub pos: Position,
    /// Source text of the statement at `pos`.
    pub text: String,
}

impl TraceFrame {
    pub fn new(pos: Position, text: impl Into<String>) -> Self {
        TraceFrame {
            pos,
            text: text.into(),
        }
    }
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  Файл \"{}\", рядок {}, позиція {},\n    {}\n",
            self.pos.file, self.pos.line, self.pos.column, self.text
        )
    }
}

/// Frames an error passed through, innermost first.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Traceback {
    frames: Vec<TraceFrame>,
}

impl Traceback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next enclosing level.
    pub fn push(&mut self, frame: TraceFrame) {
        self.frames.push(frame);
    }

    /// Frames in collection order (innermost first).
    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Frames outermost first followed by `message`.
    pub fn render(&self, message: &str) -> String {
        let mut out = String::new();
        for frame in self.frames.iter().rev() {
            out.push_str(&frame.to_string());
        }
        out.push_str(message);
        out
    }

    /// Full host report: header, frames and message.
    pub fn report(&self, message: &str) -> String {
        format!("{TRACEBACK_HEADER}\n{}", self.render(message))
    }
}
