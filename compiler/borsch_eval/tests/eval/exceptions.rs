use pretty_assertions::assert_eq;

use borsch_eval::{ErrorCategory, Value};
use borsch_ir::build::{
    binary, call_named, catch, class, expr_stmt, function, ident, int, ret, returns, string, throw,
    unsafe_block,
};
use borsch_ir::{BinaryOp, Stmt};

use crate::common::{output, print, run_err, run_ok};

/// `клас А(Помилка) {}` and `клас Б(А) {}`
fn hierarchy() -> Vec<Stmt> {
    vec![
        class("А", &["Помилка"], Vec::new()),
        class("Б", &["А"], Vec::new()),
    ]
}

fn throw_new(class: &str, message: &str) -> Stmt {
    throw(call_named(class, vec![string(message)]))
}

fn with_hierarchy(stmts: Vec<Stmt>) -> Vec<Stmt> {
    let mut all = hierarchy();
    all.extend(stmts);
    all
}

#[test]
fn test_base_clause_listed_first_catches_a_subclass() {
    let stmts = with_hierarchy(vec![unsafe_block(
        vec![throw_new("Б", "б")],
        vec![
            catch(ident("А"), "е", vec![print("А")]),
            catch(ident("Б"), "е", vec![print("Б")]),
        ],
    )]);
    assert_eq!(output(stmts), "А\n");
}

#[test]
fn test_subclass_clause_listed_first_wins() {
    let stmts = with_hierarchy(vec![unsafe_block(
        vec![throw_new("Б", "б")],
        vec![
            catch(ident("Б"), "е", vec![print("Б")]),
            catch(ident("А"), "е", vec![print("А")]),
        ],
    )]);
    assert_eq!(output(stmts), "Б\n");
}

#[test]
fn test_subclass_clause_does_not_catch_its_base() {
    let stmts = with_hierarchy(vec![unsafe_block(
        vec![throw_new("А", "а")],
        vec![
            catch(ident("Б"), "е", vec![print("Б")]),
            catch(ident("А"), "е", vec![print("А")]),
        ],
    )]);
    assert_eq!(output(stmts), "А\n");
}

#[test]
fn test_caught_value_is_bound_to_the_clause_variable() {
    let stmts = vec![unsafe_block(
        vec![throw_new("Помилка", "щось пішло не так")],
        vec![catch(
            ident("Помилка"),
            "е",
            vec![expr_stmt(call_named("друк", vec![ident("е")]))],
        )],
    )];
    assert_eq!(output(stmts), "щось пішло не так\n");
}

#[test]
fn test_clause_variable_does_not_leak() {
    let err = run_err(vec![
        unsafe_block(
            vec![throw_new("Помилка", "х")],
            vec![catch(ident("Помилка"), "е", Vec::new())],
        ),
        expr_stmt(ident("е")),
    ]);
    assert_eq!(err.category(), ErrorCategory::Name);
}

#[test]
fn test_statements_after_the_throw_do_not_run() {
    let stmts = vec![unsafe_block(
        vec![print("до"), throw_new("Помилка", "х"), print("після")],
        vec![catch(ident("Помилка"), "_", vec![print("перехоплено")])],
    )];
    assert_eq!(output(stmts), "до\nперехоплено\n");
}

#[test]
fn test_exceptions_cross_function_boundaries() {
    let fail = function(
        "впасти",
        Vec::new(),
        Vec::new(),
        vec![throw_new("Помилка", "всередині")],
    );
    let stmts = vec![
        fail,
        unsafe_block(
            vec![expr_stmt(call_named("впасти", Vec::new()))],
            vec![catch(
                ident("Помилка"),
                "е",
                vec![expr_stmt(call_named("друк", vec![ident("е")]))],
            )],
        ),
    ];
    assert_eq!(output(stmts), "всередині\n");
}

#[test]
fn test_return_inside_a_catch_body_leaves_the_function() {
    let f = function(
        "ф",
        Vec::new(),
        vec![returns("ціле")],
        vec![
            unsafe_block(
                vec![throw_new("Помилка", "х")],
                vec![catch(ident("Помилка"), "е", vec![ret(vec![int(1)])])],
            ),
            ret(vec![int(2)]),
        ],
    );
    let value = run_ok(vec![f, expr_stmt(call_named("ф", Vec::new()))]);
    assert_eq!(value, Value::Int(1));
}

#[test]
fn test_return_inside_a_guarded_body_is_not_intercepted() {
    let f = function(
        "ф",
        Vec::new(),
        vec![returns("ціле")],
        vec![
            unsafe_block(
                vec![ret(vec![int(1)])],
                vec![catch(ident("Помилка"), "е", vec![ret(vec![int(2)])])],
            ),
            ret(vec![int(3)]),
        ],
    );
    let value = run_ok(vec![f, expr_stmt(call_named("ф", Vec::new()))]);
    assert_eq!(value, Value::Int(1));
}

#[test]
fn test_unmatched_exception_propagates_with_an_extra_frame() {
    let err = run_err(with_hierarchy(vec![unsafe_block(
        vec![throw_new("А", "а")],
        vec![catch(ident("Б"), "е", Vec::new())],
    )]));
    assert_eq!(err.message, "А: а");
    assert_eq!(err.category(), ErrorCategory::Exception);
    assert_eq!(err.trace.len(), 2);
    assert!(err.thrown.is_some_and(|value| value.type_name() == "А"));
}

#[test]
fn test_throw_from_a_catch_body_replaces_the_exception() {
    let err = run_err(with_hierarchy(vec![unsafe_block(
        vec![throw_new("А", "перша")],
        vec![catch(ident("А"), "е", vec![throw_new("Б", "друга")])],
    )]));
    assert_eq!(err.message, "Б: друга");
}

#[test]
fn test_nested_guarded_blocks() {
    let stmts = with_hierarchy(vec![unsafe_block(
        vec![unsafe_block(
            vec![throw_new("А", "а")],
            vec![catch(ident("Б"), "е", vec![print("внутрішній")])],
        )],
        vec![catch(ident("А"), "е", vec![print("зовнішній")])],
    )]);
    assert_eq!(output(stmts), "зовнішній\n");
}

/// `викинути 5;` is fatal even when a clause would catch everything.
#[test]
fn test_throwing_a_non_error_is_fatal() {
    let err = run_err(vec![unsafe_block(
        vec![throw(int(5))],
        vec![catch(ident("Помилка"), "е", vec![print("перехоплено")])],
    )]);
    assert_eq!(err.message, "помилки мають наслідувати клас 'Помилка'");
    assert_eq!(err.category(), ErrorCategory::Fatal);
}

#[test]
fn test_runtime_errors_are_not_catchable() {
    let err = run_err(vec![unsafe_block(
        vec![expr_stmt(binary(BinaryOp::Div, int(1), int(0)))],
        vec![catch(ident("Помилка"), "е", vec![print("перехоплено")])],
    )]);
    assert_eq!(err.message, "ділення на нуль");
    assert_eq!(err.category(), ErrorCategory::Runtime);
}

#[test]
fn test_catch_declaration_must_be_a_class() {
    let err = run_err(vec![unsafe_block(
        vec![throw_new("Помилка", "х")],
        vec![catch(int(5), "е", Vec::new())],
    )]);
    assert_eq!(err.message, "об'єкт '5' не є класом");
    assert_eq!(err.category(), ErrorCategory::Fatal);
}

#[test]
fn test_catching_a_non_error_class_is_fatal() {
    let err = run_err(vec![
        class("НеПомилка", &[], Vec::new()),
        unsafe_block(
            vec![throw_new("Помилка", "х")],
            vec![catch(ident("НеПомилка"), "е", Vec::new())],
        ),
    ]);
    assert_eq!(
        err.message,
        "перехоплення помилок, які не наслідують клас 'Помилка' заборонено"
    );
    assert_eq!(err.category(), ErrorCategory::Fatal);
}

#[test]
fn test_error_string_conversion_is_its_message() {
    let value = run_ok(vec![expr_stmt(call_named(
        "рядок",
        vec![call_named("Помилка", vec![string("текст")])],
    ))]);
    assert_eq!(value, Value::string("текст"));
}
