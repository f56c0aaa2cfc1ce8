use pretty_assertions::assert_eq;
use proptest::prelude::*;

use borsch_eval::{ErrorCategory, Value};
use borsch_ir::build::{
    assign, assign_many, assign_stmt, attr, call_named, class, dict, expr_stmt, function, ident,
    index, int, list, place, ret, returns, string,
};
use borsch_ir::{Expr, Place, Stmt};

use crate::common::{run_err, run_ok};

fn ident_place(name: &str) -> Place {
    Place::ident(name)
}

#[test]
fn test_assignment_yields_the_assigned_value() {
    let value = run_ok(vec![expr_stmt(assign(ident_place("х"), int(5)))]);
    assert_eq!(value, Value::Int(5));
}

#[test]
fn test_pairwise_assignment() {
    let value = run_ok(vec![
        expr_stmt(assign_many(
            vec![ident_place("а"), ident_place("б")],
            vec![int(1), int(2)],
        )),
        expr_stmt(list(vec![ident("а"), ident("б")])),
    ]);
    assert_eq!(value, Value::list(vec![Value::Int(1), Value::Int(2)]));
}

#[test]
fn test_unpacking_a_multi_value_return() {
    let pair = function(
        "пара",
        Vec::new(),
        vec![returns("ціле"), returns("ціле")],
        vec![ret(vec![int(3), int(4)])],
    );
    let value = run_ok(vec![
        pair,
        expr_stmt(assign_many(
            vec![ident_place("а"), ident_place("б")],
            vec![call_named("пара", Vec::new())],
        )),
        expr_stmt(ident("б")),
    ]);
    assert_eq!(value, Value::Int(4));
}

#[test]
fn test_unpacking_requires_matching_length() {
    let err = run_err(vec![expr_stmt(assign_many(
        vec![ident_place("а"), ident_place("б")],
        vec![list(vec![int(1), int(2), int(3)])],
    ))]);
    assert_eq!(err.message, "неможливо розпакувати 3 значень у 2 змінних");
    assert_eq!(err.category(), ErrorCategory::Runtime);

    let err = run_err(vec![expr_stmt(assign_many(
        vec![ident_place("а"), ident_place("б"), ident_place("в")],
        vec![int(1), int(2)],
    ))]);
    assert_eq!(err.message, "неможливо розпакувати 2 значень у 3 змінних");
}

#[test]
fn test_nil_cannot_be_assigned() {
    let err = run_err(vec![assign_stmt(ident_place("нуль"), int(1))]);
    assert_eq!(err.message, "неможливо встановити значення об'єкту 'нуль'");
}

#[test]
fn test_list_and_dict_elements_are_assignable() {
    let value = run_ok(vec![
        assign_stmt(ident_place("л"), list(vec![int(1), int(2), int(3)])),
        assign_stmt(Place::index(ident("л"), int(-1)), int(9)),
        expr_stmt(ident("л")),
    ]);
    assert_eq!(
        value,
        Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(9)])
    );

    let value = run_ok(vec![
        assign_stmt(ident_place("с"), dict(Vec::new())),
        assign_stmt(Place::index(ident("с"), string("к")), int(1)),
        expr_stmt(index(ident("с"), string("к"))),
    ]);
    assert_eq!(value, Value::Int(1));
}

#[test]
fn test_containers_are_shared_between_names() {
    let value = run_ok(vec![
        assign_stmt(ident_place("а"), list(vec![int(1)])),
        assign_stmt(ident_place("б"), ident("а")),
        assign_stmt(Place::index(ident("б"), int(0)), int(2)),
        expr_stmt(index(ident("а"), int(0))),
    ]);
    assert_eq!(value, Value::Int(2));
}

#[test]
fn test_strings_are_not_assignable_by_index() {
    let err = run_err(vec![
        assign_stmt(ident_place("р"), string("аб")),
        assign_stmt(Place::index(ident("р"), int(0)), string("в")),
    ]);
    assert_eq!(err.category(), ErrorCategory::Attribute);
}

#[test]
fn test_literals_are_not_attribute_targets() {
    let err = run_err(vec![assign_stmt(Place::attr(int(1), "х"), int(2))]);
    assert_eq!(err.category(), ErrorCategory::Attribute);
}

/// `а = Вузол(); а.б = [Вузол(), Вузол(), Вузол()];`
fn tree() -> Vec<Stmt> {
    vec![
        class("Вузол", &[], Vec::new()),
        assign_stmt(ident_place("а"), call_named("Вузол", Vec::new())),
        assign_stmt(
            Place::attr(ident("а"), "б"),
            list(vec![
                call_named("Вузол", Vec::new()),
                call_named("Вузол", Vec::new()),
                call_named("Вузол", Vec::new()),
            ]),
        ),
    ]
}

/// `а.б[i]`
fn element(i: i64) -> Expr {
    index(attr(ident("а"), "б"), int(i))
}

#[test]
fn test_chained_place_write_then_read() {
    let mut stmts = tree();
    stmts.push(assign_stmt(Place::attr(element(1), "в"), int(5)));
    stmts.push(expr_stmt(place(Place::attr(element(1), "в"))));
    assert_eq!(run_ok(stmts), Value::Int(5));
}

#[test]
fn test_chained_place_leaves_siblings_untouched() {
    let mut stmts = tree();
    stmts.push(assign_stmt(Place::attr(element(0), "в"), int(5)));
    stmts.push(expr_stmt(attr(element(2), "в")));
    let err = run_err(stmts);
    assert_eq!(err.message, "об'єкт типу 'Вузол' не містить атрибута 'в'");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Reading `а.б[i].в` right after writing it yields the written value.
    #[test]
    fn test_write_then_read_through_attribute_and_index(i in -3i64..3, v in any::<i64>()) {
        let mut stmts = tree();
        stmts.push(assign_stmt(Place::attr(element(i), "в"), int(v)));
        stmts.push(expr_stmt(attr(element(i), "в")));
        prop_assert_eq!(run_ok(stmts), Value::Int(v));
    }
}

#[test]
fn test_list_assigned_into_itself_prints_a_placeholder() {
    let printed = crate::common::output(vec![
        assign_stmt(ident_place("а"), list(vec![int(1), int(2)])),
        assign_stmt(Place::index(ident("а"), int(0)), ident("а")),
        expr_stmt(call_named("друк", vec![ident("а")])),
    ]);
    assert_eq!(printed, "[[...], 2]\n");
}
