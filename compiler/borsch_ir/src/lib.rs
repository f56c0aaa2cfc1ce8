//! Borsch IR - syntax tree types consumed by the evaluator.
//!
//! The lexer and parser are external collaborators. They hand the core an
//! already-built tree made of the types in this crate:
//! - `Position` for source locations (file, line, column)
//! - `Expr` / `ExprKind` / `Place` for expressions and assignable places
//! - `Stmt` / `StmtKind` / `Block` for statements
//! - `FunctionDef`, `ClassDef`, `CatchClause` for definitions and handlers
//! - `BinaryOp` / `UnaryOp` with their reserved operator-method names
//!
//! The precedence of operators encoded in the tree must match
//! [`Precedence`], lowest to highest binding.

pub mod ast;
pub mod build;
mod operators;
mod position;

pub use ast::{
    Binding, Block, CatchClause, ClassDef, CondBranch, Expr, ExprKind, FunctionDef, ParamDecl,
    Place, Program, ReturnDecl, Stmt, StmtKind,
};
pub use operators::{special, BinaryOp, Precedence, UnaryOp};
pub use position::Position;
