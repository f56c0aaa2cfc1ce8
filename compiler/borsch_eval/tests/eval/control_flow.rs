use pretty_assertions::assert_eq;

use borsch_eval::{ErrorCategory, Value};
use borsch_ir::build::{
    assign_stmt, binary, block, boolean, call_named, dict, expr_stmt, for_each, function, ident,
    if_chain, if_stmt, int, list, ret, returns, string, while_stmt,
};
use borsch_ir::{BinaryOp, Place};

use crate::common::{output, print, run_err, run_ok};

#[test]
fn test_block_yields_its_last_value() {
    let value = run_ok(vec![block(vec![expr_stmt(int(1)), expr_stmt(int(2))])]);
    assert_eq!(value, Value::Int(2));
}

#[test]
fn test_names_bound_in_a_block_do_not_leak() {
    let err = run_err(vec![
        if_stmt(boolean(true), vec![assign_stmt(Place::ident("нова"), int(1))], None),
        expr_stmt(ident("нова")),
    ]);
    assert_eq!(err.message, "ідентифікатор 'нова' не визначено");
    assert_eq!(err.category(), ErrorCategory::Name);
}

#[test]
fn test_blocks_rebind_outer_names() {
    let value = run_ok(vec![
        assign_stmt(Place::ident("х"), int(1)),
        block(vec![assign_stmt(Place::ident("х"), int(2))]),
        expr_stmt(ident("х")),
    ]);
    assert_eq!(value, Value::Int(2));
}

#[test]
fn test_if_chain_runs_the_first_true_branch() {
    let chain = |x: i64| {
        if_chain(
            vec![
                (binary(BinaryOp::Lt, int(x), int(0)), vec![print("від'ємне")]),
                (binary(BinaryOp::Eq, int(x), int(0)), vec![print("нуль")]),
            ],
            Some(vec![print("додатне")]),
        )
    };
    assert_eq!(output(vec![chain(-5)]), "від'ємне\n");
    assert_eq!(output(vec![chain(0)]), "нуль\n");
    assert_eq!(output(vec![chain(5)]), "додатне\n");
}

#[test]
fn test_conditions_use_boolean_conversion() {
    let stmts = vec![
        if_stmt(list(Vec::new()), vec![print("так")], Some(vec![print("ні")])),
        if_stmt(string("а"), vec![print("так")], Some(vec![print("ні")])),
        if_stmt(int(0), vec![print("так")], Some(vec![print("ні")])),
    ];
    assert_eq!(output(stmts), "ні\nтак\nні\n");
}

#[test]
fn test_while_loop_runs_until_condition_fails() {
    let value = run_ok(vec![
        assign_stmt(Place::ident("і"), int(0)),
        while_stmt(
            binary(BinaryOp::Lt, ident("і"), int(3)),
            vec![assign_stmt(
                Place::ident("і"),
                binary(BinaryOp::Add, ident("і"), int(1)),
            )],
        ),
        expr_stmt(ident("і")),
    ]);
    assert_eq!(value, Value::Int(3));
}

#[test]
fn test_for_each_binds_index_and_item() {
    let stmts = vec![for_each(
        "і",
        "х",
        list(vec![string("а"), string("б")]),
        vec![expr_stmt(call_named("друк", vec![ident("і"), ident("х")]))],
    )];
    assert_eq!(output(stmts), "0 а\n1 б\n");
}

#[test]
fn test_for_each_discard_binds_nothing() {
    let value = run_ok(vec![
        assign_stmt(Place::ident("сума"), int(0)),
        for_each(
            "_",
            "х",
            list(vec![int(1), int(2), int(3)]),
            vec![assign_stmt(
                Place::ident("сума"),
                binary(BinaryOp::Add, ident("сума"), ident("х")),
            )],
        ),
        expr_stmt(ident("сума")),
    ]);
    assert_eq!(value, Value::Int(6));

    let err = run_err(vec![for_each(
        "_",
        "_",
        list(vec![int(1)]),
        vec![expr_stmt(ident("_"))],
    )]);
    assert_eq!(err.category(), ErrorCategory::Name);
}

#[test]
fn test_for_each_iterates_strings() {
    let stmts = vec![for_each(
        "_",
        "с",
        string("аб"),
        vec![expr_stmt(call_named("друк", vec![ident("с")]))],
    )];
    assert_eq!(output(stmts), "а\nб\n");
}

#[test]
fn test_for_each_rejects_non_sequences() {
    let err = run_err(vec![for_each("_", "х", int(5), Vec::new())]);
    assert_eq!(err.message, "тип 'ціле' не є об'єктом, по якому можна ітерувати");

    let err = run_err(vec![for_each("_", "х", dict(Vec::new()), Vec::new())]);
    assert_eq!(err.message, "тип 'словник' не є об'єктом, по якому можна ітерувати");
}

/// A return in the second iteration stops the loop and the function.
#[test]
fn test_return_inside_for_each_stops_iteration() {
    let find = function(
        "знайти",
        Vec::new(),
        vec![returns("ціле")],
        vec![
            for_each(
                "і",
                "елемент",
                list(vec![int(10), int(20), int(30)]),
                vec![
                    expr_stmt(call_named("друк", vec![ident("елемент")])),
                    if_stmt(
                        binary(BinaryOp::Eq, ident("і"), int(1)),
                        vec![ret(vec![ident("елемент")])],
                        None,
                    ),
                ],
            ),
            ret(vec![int(0)]),
        ],
    );
    let stmts = vec![find, expr_stmt(call_named("знайти", Vec::new()))];
    assert_eq!(output(stmts.clone()), "10\n20\n");
    assert_eq!(run_ok(stmts), Value::Int(20));
}

#[test]
fn test_return_inside_while_stops_the_loop() {
    let first = function(
        "перше",
        Vec::new(),
        vec![returns("ціле")],
        vec![
            while_stmt(boolean(true), vec![ret(vec![int(1)])]),
            ret(vec![int(2)]),
        ],
    );
    let value = run_ok(vec![first, expr_stmt(call_named("перше", Vec::new()))]);
    assert_eq!(value, Value::Int(1));
}

#[test]
fn test_statements_after_return_do_not_run() {
    let f = function(
        "ф",
        Vec::new(),
        Vec::new(),
        vec![ret(Vec::new()), print("недосяжно")],
    );
    let stmts = vec![f, expr_stmt(call_named("ф", Vec::new()))];
    assert_eq!(output(stmts.clone()), "");
    assert_eq!(run_ok(stmts), Value::Nil);
}

#[test]
fn test_return_outside_function_fails() {
    let err = run_err(vec![ret(vec![int(1)])]);
    assert_eq!(err.message, "'повернути' за межами функції");
}
