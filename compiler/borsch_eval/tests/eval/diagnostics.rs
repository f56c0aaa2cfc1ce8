use pretty_assertions::assert_eq;

use borsch_eval::{EvalMode, Interpreter};
use borsch_ir::build::{binary, call_named, expr_stmt, function, ident, int, param, ret};
use borsch_ir::{BinaryOp, Program, Stmt};

use crate::common::run_err;

/// ```text
/// 1 функція ф(х: ціле) {
/// 2     повернути х / 0;
/// 3 }
/// 4 ф(1);
/// ```
fn divide_by_zero_in_function() -> Vec<Stmt> {
    vec![
        function(
            "ф",
            vec![param("х", "ціле")],
            Vec::new(),
            vec![ret(vec![binary(BinaryOp::Div, ident("х"), int(0))])
                .at(2, 5)
                .with_text("повернути х / 0;")],
        )
        .with_text("функція ф(х: ціле) {"),
        expr_stmt(call_named("ф", vec![int(1)]))
            .at(4, 1)
            .with_text("ф(1);"),
    ]
}

#[test]
fn test_frames_render_outermost_first() {
    let err = run_err(divide_by_zero_in_function());
    assert_eq!(
        err.render(),
        "  Файл \"<ввід>\", рядок 4, позиція 1,\n    ф(1);\n\
         \x20 Файл \"<ввід>\", рядок 2, позиція 5,\n    повернути х / 0;\n\
         ділення на нуль"
    );
}

#[test]
fn test_report_starts_with_the_traceback_header() {
    let err = run_err(divide_by_zero_in_function());
    assert!(err.report().starts_with("Відстеження (стек викликів):\n  Файл"));
    assert!(err.report().ends_with("ділення на нуль"));
}

#[test]
fn test_one_frame_per_call_level() {
    // функція г() { повернути невідоме; }
    // функція ф() { повернути г(); }
    // ф();
    let stmts = vec![
        function(
            "г",
            Vec::new(),
            Vec::new(),
            vec![ret(vec![ident("невідоме")]).at(1, 15)],
        ),
        function(
            "ф",
            Vec::new(),
            Vec::new(),
            vec![ret(vec![call_named("г", Vec::new())]).at(2, 15)],
        ),
        expr_stmt(call_named("ф", Vec::new())).at(3, 1),
    ];
    let err = run_err(stmts);
    let lines: Vec<u32> = err.trace.frames().iter().map(|f| f.pos.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert_eq!(err.message, "ідентифікатор 'невідоме' не визначено");
}

#[test]
fn test_frames_without_source_text_use_the_rendering() {
    let err = run_err(vec![expr_stmt(ident("невідоме"))]);
    assert_eq!(err.trace.frames()[0].text, "невідоме;");
}

#[test]
fn test_each_program_starts_a_fresh_trace() {
    let mut interpreter = Interpreter::builder().mode(EvalMode::TestRun).build();
    let program = Program::new(vec![expr_stmt(ident("невідоме"))]);
    let first = interpreter.evaluate(&program).unwrap_err();
    let second = interpreter.evaluate(&program).unwrap_err();
    assert_eq!(first.trace.len(), 1);
    assert_eq!(second.trace.len(), 1);
}
