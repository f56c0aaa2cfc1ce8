//! Source-like rendering of syntax nodes for trace frames.

use std::fmt::{self, Display, Formatter, Write};

use super::{Binding, Block, CatchClause, Expr, ExprKind, FunctionDef, Place, Stmt, StmtKind};
use crate::Precedence;

fn comma_separated<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Write `expr`, wrapped in parentheses when it binds looser than `min`.
fn operand(f: &mut Formatter<'_>, expr: &Expr, min: Precedence) -> fmt::Result {
    if expr.precedence() < min {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn real(f: &mut Formatter<'_>, value: f64) -> fmt::Result {
    let text = value.to_string();
    if text.contains(['.', 'e', 'i', 'N']) {
        f.write_str(&text)
    } else {
        write!(f, "{text}.0")
    }
}

fn string_literal(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn block(f: &mut Formatter<'_>, body: &Block) -> fmt::Result {
    if body.is_empty() {
        f.write_str("{}")
    } else {
        f.write_str("{ ... }")
    }
}

fn signature(f: &mut Formatter<'_>, def: &FunctionDef) -> fmt::Result {
    write!(f, "функція")?;
    if !def.name.is_empty() {
        write!(f, " {}", def.name)?;
    }
    f.write_char('(')?;
    for (i, param) in def.params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        let dots = if param.variadic { "..." } else { "" };
        let question = if param.nullable { "?" } else { "" };
        write!(f, "{}: {dots}{}{question}", param.name, param.type_name)?;
    }
    f.write_char(')')?;
    let returns: Vec<String> = def
        .returns
        .iter()
        .map(|r| {
            if r.nullable {
                format!("{}?", r.type_name)
            } else {
                r.type_name.clone()
            }
        })
        .collect();
    match returns.as_slice() {
        [] => Ok(()),
        [single] => write!(f, " -> {single}"),
        many => write!(f, " -> ({})", many.join(", ")),
    }
}

impl Display for Place {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Place::Ident(name) => f.write_str(name),
            Place::Attr { base, name } => {
                operand(f, base, Precedence::Primary)?;
                write!(f, ".{name}")
            }
            Place::Index { base, index } => {
                operand(f, base, Precedence::Primary)?;
                write!(f, "[{index}]")
            }
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Nil => f.write_str("нуль"),
            ExprKind::Int(value) => write!(f, "{value}"),
            ExprKind::Real(value) => real(f, *value),
            ExprKind::Bool(true) => f.write_str("істина"),
            ExprKind::Bool(false) => f.write_str("хиба"),
            ExprKind::Str(value) => string_literal(f, value),
            ExprKind::List(items) => {
                f.write_char('[')?;
                comma_separated(f, items)?;
                f.write_char(']')
            }
            ExprKind::Dict(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_char('}')
            }
            ExprKind::Place(place) => write!(f, "{place}"),
            ExprKind::Binary { op, left, right } => {
                let prec = op.precedence();
                // The side that does not associate needs parentheses on a tie.
                let (left_min, right_min) = if op.is_right_associative() {
                    (next(prec), prec)
                } else {
                    (prec, next(prec))
                };
                operand(f, left, left_min)?;
                write!(f, " {} ", op.as_symbol())?;
                operand(f, right, right_min)
            }
            ExprKind::Unary { op, operand: inner } => {
                f.write_str(op.as_symbol())?;
                operand(f, inner, op.precedence())
            }
            ExprKind::Call { callee, args } => {
                operand(f, callee, Precedence::Primary)?;
                f.write_char('(')?;
                comma_separated(f, args)?;
                f.write_char(')')
            }
            ExprKind::Lambda(def) => {
                signature(f, def)?;
                f.write_char(' ')?;
                block(f, &def.body)
            }
            ExprKind::Assign { targets, values } => {
                comma_separated(f, targets)?;
                f.write_str(" = ")?;
                comma_separated(f, values)
            }
        }
    }
}

fn next(prec: Precedence) -> Precedence {
    match prec {
        Precedence::Assignment => Precedence::Or,
        Precedence::Or => Precedence::And,
        Precedence::And => Precedence::Not,
        Precedence::Not => Precedence::Comparison,
        Precedence::Comparison => Precedence::BitOr,
        Precedence::BitOr => Precedence::BitXor,
        Precedence::BitXor => Precedence::BitAnd,
        Precedence::BitAnd => Precedence::Shift,
        Precedence::Shift => Precedence::Additive,
        Precedence::Additive => Precedence::Multiplicative,
        Precedence::Multiplicative => Precedence::Unary,
        Precedence::Unary => Precedence::Exponent,
        Precedence::Exponent | Precedence::Primary => Precedence::Primary,
    }
}

impl Display for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Name(name) => f.write_str(name),
            Binding::Discard => f.write_str(crate::special::DISCARD),
        }
    }
}

impl Display for CatchClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "перехопити ({} {}) ", self.error_class, self.var)?;
        block(f, &self.body)
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Expr(expr) => write!(f, "{expr};"),
            StmtKind::Block(body) => block(f, body),
            StmtKind::If {
                branches,
                otherwise,
            } => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" інакше ")?;
                    }
                    write!(f, "якщо ({}) ", branch.condition)?;
                    block(f, &branch.body)?;
                }
                if let Some(body) = otherwise {
                    f.write_str(" інакше ")?;
                    block(f, body)?;
                }
                Ok(())
            }
            StmtKind::While { condition, body } => {
                write!(f, "поки ({condition}) ")?;
                block(f, body)
            }
            StmtKind::ForEach {
                index,
                item,
                iterable,
                body,
            } => {
                write!(f, "для ({index}, {item} : {iterable}) ")?;
                block(f, body)
            }
            StmtKind::FunctionDef(def) => {
                signature(f, def)?;
                f.write_char(' ')?;
                block(f, &def.body)
            }
            StmtKind::ClassDef(def) => {
                write!(f, "клас {}", def.name)?;
                if !def.bases.is_empty() {
                    write!(f, "({})", def.bases.join(", "))?;
                }
                f.write_char(' ')?;
                block(f, &def.body)
            }
            StmtKind::Return(values) => {
                f.write_str("повернути")?;
                if !values.is_empty() {
                    f.write_char(' ')?;
                    comma_separated(f, values)?;
                }
                f.write_char(';')
            }
            StmtKind::Throw(value) => write!(f, "викинути {value};"),
            StmtKind::Unsafe { body, catches } => {
                f.write_str("небезпечно ")?;
                block(f, body)?;
                for clause in catches {
                    write!(f, " {clause}")?;
                }
                Ok(())
            }
            StmtKind::Empty => f.write_char(';'),
        }
    }
}
