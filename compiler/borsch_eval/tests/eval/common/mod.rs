//! Shared helpers for the evaluator tests.

use borsch_eval::{EvalError, EvalMode, Interpreter, Value};
use borsch_ir::build::{call_named, expr_stmt, string};
use borsch_ir::{Program, Stmt};

pub fn interpreter() -> Interpreter {
    Interpreter::builder().mode(EvalMode::TestRun).build()
}

pub fn run(stmts: Vec<Stmt>) -> Result<Value, EvalError> {
    interpreter().evaluate(&Program::new(stmts))
}

/// Value of the last statement.
pub fn run_ok(stmts: Vec<Stmt>) -> Value {
    run(stmts).unwrap()
}

pub fn run_err(stmts: Vec<Stmt>) -> EvalError {
    run(stmts).unwrap_err()
}

/// Everything printed by the program, which must succeed.
pub fn output(stmts: Vec<Stmt>) -> String {
    let mut interpreter = interpreter();
    interpreter.evaluate(&Program::new(stmts)).unwrap();
    interpreter.output()
}

/// `друк("text");`
pub fn print(text: &str) -> Stmt {
    expr_stmt(call_named("друк", vec![string(text)]))
}
