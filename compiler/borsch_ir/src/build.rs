//! Constructors for building trees by hand.
//!
//! Hosts that embed the evaluator without a parser (and the test suites)
//! assemble programs from these helpers. Every node starts at line 1,
//! column 1 of [`FILE`]; use `.at(line, column)` to move it.

use std::sync::Arc;

use crate::{
    BinaryOp, Binding, Block, CatchClause, ClassDef, CondBranch, Expr, ExprKind, FunctionDef,
    ParamDecl, Place, Position, ReturnDecl, Stmt, StmtKind, UnaryOp,
};

/// File name recorded in positions of hand-built nodes.
pub const FILE: &str = "<ввід>";

fn pos() -> Position {
    Position::new(FILE, 1, 1)
}

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, pos())
}

fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, pos())
}

// Expressions

pub fn nil() -> Expr {
    expr(ExprKind::Nil)
}

pub fn int(value: i64) -> Expr {
    expr(ExprKind::Int(value))
}

pub fn real(value: f64) -> Expr {
    expr(ExprKind::Real(value))
}

pub fn boolean(value: bool) -> Expr {
    expr(ExprKind::Bool(value))
}

pub fn string(value: &str) -> Expr {
    expr(ExprKind::Str(value.to_owned()))
}

pub fn list(items: Vec<Expr>) -> Expr {
    expr(ExprKind::List(items))
}

pub fn dict(entries: Vec<(Expr, Expr)>) -> Expr {
    expr(ExprKind::Dict(entries))
}

pub fn place(place: Place) -> Expr {
    expr(ExprKind::Place(place))
}

pub fn ident(name: &str) -> Expr {
    place(Place::ident(name))
}

pub fn attr(base: Expr, name: &str) -> Expr {
    place(Place::attr(base, name))
}

pub fn index(base: Expr, index: Expr) -> Expr {
    place(Place::index(base, index))
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op,
        operand: Box::new(operand),
    })
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        callee: Box::new(callee),
        args,
    })
}

/// Call a function bound to `name`.
pub fn call_named(name: &str, args: Vec<Expr>) -> Expr {
    call(ident(name), args)
}

pub fn lambda(params: Vec<ParamDecl>, returns: Vec<ReturnDecl>, body: Block) -> Expr {
    expr(ExprKind::Lambda(Arc::new(function_def("", params, returns, body))))
}

pub fn assign(target: Place, value: Expr) -> Expr {
    assign_many(vec![target], vec![value])
}

pub fn assign_many(targets: Vec<Place>, values: Vec<Expr>) -> Expr {
    expr(ExprKind::Assign { targets, values })
}

// Declarations

pub fn param(name: &str, type_name: &str) -> ParamDecl {
    ParamDecl::new(name, type_name)
}

pub fn returns(type_name: &str) -> ReturnDecl {
    ReturnDecl::new(type_name)
}

pub fn function_def(
    name: &str,
    params: Vec<ParamDecl>,
    returns: Vec<ReturnDecl>,
    body: Block,
) -> FunctionDef {
    FunctionDef {
        name: name.to_owned(),
        params,
        returns,
        body,
        pos: pos(),
    }
}

// Statements

pub fn expr_stmt(expr: Expr) -> Stmt {
    let pos = expr.pos.clone();
    Stmt::new(StmtKind::Expr(expr), pos)
}

/// `target = value;` as a statement.
pub fn assign_stmt(target: Place, value: Expr) -> Stmt {
    expr_stmt(assign(target, value))
}

pub fn block(body: Block) -> Stmt {
    stmt(StmtKind::Block(body))
}

pub fn if_stmt(condition: Expr, body: Block, otherwise: Option<Block>) -> Stmt {
    if_chain(vec![(condition, body)], otherwise)
}

pub fn if_chain(branches: Vec<(Expr, Block)>, otherwise: Option<Block>) -> Stmt {
    let branches = branches
        .into_iter()
        .map(|(condition, body)| CondBranch { condition, body })
        .collect();
    stmt(StmtKind::If {
        branches,
        otherwise,
    })
}

pub fn while_stmt(condition: Expr, body: Block) -> Stmt {
    stmt(StmtKind::While { condition, body })
}

pub fn for_each(index: &str, item: &str, iterable: Expr, body: Block) -> Stmt {
    stmt(StmtKind::ForEach {
        index: Binding::from_name(index),
        item: Binding::from_name(item),
        iterable,
        body,
    })
}

pub fn function(
    name: &str,
    params: Vec<ParamDecl>,
    returns: Vec<ReturnDecl>,
    body: Block,
) -> Stmt {
    stmt(StmtKind::FunctionDef(Arc::new(function_def(
        name, params, returns, body,
    ))))
}

pub fn class(name: &str, bases: &[&str], body: Block) -> Stmt {
    stmt(StmtKind::ClassDef(Arc::new(ClassDef {
        name: name.to_owned(),
        bases: bases.iter().map(|base| (*base).to_owned()).collect(),
        is_final: false,
        body,
    })))
}

pub fn final_class(name: &str, bases: &[&str], body: Block) -> Stmt {
    let mut stmt = class(name, bases, body);
    if let StmtKind::ClassDef(def) = &mut stmt.kind {
        Arc::make_mut(def).is_final = true;
    }
    stmt
}

pub fn ret(values: Vec<Expr>) -> Stmt {
    stmt(StmtKind::Return(values))
}

pub fn throw(value: Expr) -> Stmt {
    stmt(StmtKind::Throw(value))
}

pub fn unsafe_block(body: Block, catches: Vec<CatchClause>) -> Stmt {
    stmt(StmtKind::Unsafe { body, catches })
}

pub fn catch(error_class: Expr, var: &str, body: Block) -> CatchClause {
    CatchClause {
        error_class,
        var: var.to_owned(),
        body,
        pos: pos(),
    }
}

pub fn empty() -> Stmt {
    stmt(StmtKind::Empty)
}
