use pretty_assertions::assert_eq;

use borsch_eval::{ErrorCategory, Value};
use borsch_ir::build::{
    assign_stmt, attr, binary, boolean, call, call_named, class, expr_stmt, final_class, function,
    ident, if_stmt, int, param, place, ret, returns, string,
};
use borsch_ir::{BinaryOp, Place, Stmt};

use crate::common::{output, print, run_err, run_ok};

/// `я.<name>`
fn this(name: &str) -> borsch_ir::Expr {
    attr(ident("я"), name)
}

/// A class `Точка` with `х`, `у` set by the constructor and a `сума`
/// method.
fn point() -> Stmt {
    class(
        "Точка",
        &[],
        vec![
            function(
                "__конструктор__",
                vec![param("я", ""), param("х", "ціле"), param("у", "ціле")],
                Vec::new(),
                vec![
                    assign_stmt(Place::attr(ident("я"), "х"), ident("х")),
                    assign_stmt(Place::attr(ident("я"), "у"), ident("у")),
                ],
            ),
            function(
                "сума",
                vec![param("я", "")],
                vec![returns("ціле")],
                vec![ret(vec![binary(BinaryOp::Add, this("х"), this("у"))])],
            ),
        ],
    )
}

fn new_point(x: i64, y: i64) -> borsch_ir::Expr {
    call_named("Точка", vec![int(x), int(y)])
}

fn method_call(receiver: borsch_ir::Expr, name: &str, args: Vec<borsch_ir::Expr>) -> borsch_ir::Expr {
    call(attr(receiver, name), args)
}

#[test]
fn test_construction_runs_the_constructor_on_a_fresh_instance() {
    let value = run_ok(vec![
        point(),
        assign_stmt(Place::ident("т"), new_point(1, 2)),
        expr_stmt(attr(ident("т"), "у")),
    ]);
    assert_eq!(value, Value::Int(2));
}

#[test]
fn test_methods_receive_the_instance() {
    let value = run_ok(vec![
        point(),
        expr_stmt(method_call(new_point(3, 4), "сума", Vec::new())),
    ]);
    assert_eq!(value, Value::Int(7));
}

#[test]
fn test_methods_called_through_the_class_take_an_explicit_receiver() {
    let value = run_ok(vec![
        point(),
        assign_stmt(Place::ident("т"), new_point(3, 4)),
        expr_stmt(method_call(ident("Точка"), "сума", vec![ident("т")])),
    ]);
    assert_eq!(value, Value::Int(7));
}

#[test]
fn test_constructor_arguments_are_checked() {
    let err = run_err(vec![point(), expr_stmt(call_named("Точка", vec![int(1)]))]);
    assert_eq!(
        err.message,
        "при виклику '__конструктор__()' відсутній 1 необхідний параметр: 'у'"
    );
}

#[test]
fn test_instances_share_state_through_aliases() {
    let value = run_ok(vec![
        point(),
        assign_stmt(Place::ident("а"), new_point(1, 2)),
        assign_stmt(Place::ident("б"), ident("а")),
        assign_stmt(Place::attr(ident("б"), "х"), int(10)),
        expr_stmt(attr(ident("а"), "х")),
    ]);
    assert_eq!(value, Value::Int(10));
}

#[test]
fn test_subclasses_inherit_methods() {
    let value = run_ok(vec![
        point(),
        class("Точка3", &["Точка"], Vec::new()),
        expr_stmt(method_call(
            call_named("Точка3", vec![int(1), int(1)]),
            "сума",
            Vec::new(),
        )),
    ]);
    assert_eq!(value, Value::Int(2));
}

#[test]
fn test_subclass_instances_do_not_satisfy_base_class_parameters() {
    let err = run_err(vec![
        point(),
        class("Точка3", &["Точка"], Vec::new()),
        function("взяти", vec![param("т", "Точка")], Vec::new(), vec![ret(vec![int(1)])]),
        expr_stmt(call_named(
            "взяти",
            vec![call_named("Точка3", vec![int(1), int(1)])],
        )),
    ]);
    assert_eq!(err.category(), ErrorCategory::Type);
    assert_eq!(
        err.message,
        "аргумент 'т' очікує параметр з типом 'Точка', отримано 'Точка3'"
    );
}

#[test]
fn test_subclass_instances_do_not_satisfy_base_class_returns() {
    let err = run_err(vec![
        point(),
        class("Точка3", &["Точка"], Vec::new()),
        function(
            "нова",
            Vec::new(),
            vec![returns("Точка")],
            vec![ret(vec![call_named("Точка3", vec![int(1), int(1)])])],
        ),
        expr_stmt(call_named("нова", Vec::new())),
    ]);
    assert_eq!(err.category(), ErrorCategory::Type);
    assert_eq!(
        err.message,
        "'нова()' повертає значення типу 'Точка', отримано значення з типом 'Точка3'"
    );
}

#[test]
fn test_subclass_instances_use_inherited_root_methods() {
    let value = run_ok(vec![
        point(),
        class("Точка3", &["Точка"], Vec::new()),
        assign_stmt(Place::ident("т"), call_named("Точка3", vec![int(1), int(1)])),
        expr_stmt(binary(BinaryOp::Eq, ident("т"), ident("т"))),
    ]);
    assert_eq!(value, Value::Bool(true));
}

#[test]
fn test_class_without_base_derives_the_root_object() {
    let value = run_ok(vec![
        class("Порожній", &[], Vec::new()),
        expr_stmt(call_named("Порожній", Vec::new())),
    ]);
    assert_eq!(value.type_name(), "Порожній");
    assert!(value.is_instance_of(&borsch_runtime::builtins().object));
}

#[test]
fn test_class_attributes_are_readable() {
    let value = run_ok(vec![
        class(
            "Налаштування",
            &[],
            vec![assign_stmt(Place::ident("версія"), int(3))],
        ),
        expr_stmt(attr(ident("Налаштування"), "версія")),
    ]);
    assert_eq!(value, Value::Int(3));
}

#[test]
fn test_classes_are_read_only() {
    let err = run_err(vec![
        class("К", &[], Vec::new()),
        assign_stmt(Place::attr(ident("К"), "х"), int(1)),
    ]);
    assert_eq!(err.category(), ErrorCategory::Attribute);
}

#[test]
fn test_final_classes_cannot_be_derived() {
    let err = run_err(vec![
        final_class("Ф", &[], Vec::new()),
        class("Г", &["Ф"], Vec::new()),
    ]);
    assert_eq!(err.message, "неможливо наслідувати фінальний клас 'Ф'");

    let err = run_err(vec![class("МоєЦіле", &["ціле"], Vec::new())]);
    assert_eq!(err.message, "неможливо наслідувати фінальний клас 'ціле'");
}

#[test]
fn test_only_one_base_is_allowed() {
    let err = run_err(vec![
        class("А", &[], Vec::new()),
        class("Б", &[], Vec::new()),
        class("В", &["А", "Б"], Vec::new()),
    ]);
    assert_eq!(err.message, "клас 'В' може мати лише один базовий клас");
}

#[test]
fn test_user_string_conversion_is_used_by_print() {
    let stmts = vec![
        class(
            "Кіт",
            &[],
            vec![function(
                "__рядок__",
                vec![param("я", "")],
                vec![returns("рядок")],
                vec![ret(vec![string("Мурчик")])],
            )],
        ),
        expr_stmt(call_named("друк", vec![call_named("Кіт", Vec::new())])),
    ];
    assert_eq!(output(stmts), "Мурчик\n");
}

#[test]
fn test_default_string_conversion_names_the_class() {
    let stmts = vec![
        class("Кіт", &[], Vec::new()),
        expr_stmt(call_named("друк", vec![call_named("Кіт", Vec::new()), ident("Кіт")])),
    ];
    assert_eq!(output(stmts), "<об'єкт класу 'Кіт'> <клас 'Кіт'>\n");
}

#[test]
fn test_user_boolean_conversion_drives_conditions() {
    let stmts = vec![
        class(
            "Порожнє",
            &[],
            vec![function(
                "__логічне__",
                vec![param("я", "")],
                vec![returns("логічне")],
                vec![ret(vec![boolean(false)])],
            )],
        ),
        if_stmt(
            call_named("Порожнє", Vec::new()),
            vec![print("так")],
            Some(vec![print("ні")]),
        ),
    ];
    assert_eq!(output(stmts), "ні\n");
}

#[test]
fn test_call_operator_makes_instances_callable() {
    let value = run_ok(vec![
        class(
            "Подвоювач",
            &[],
            vec![function(
                "__виклик__",
                vec![param("я", ""), param("х", "ціле")],
                vec![returns("ціле")],
                vec![ret(vec![binary(BinaryOp::Mul, ident("х"), int(2))])],
            )],
        ),
        assign_stmt(Place::ident("п"), call_named("Подвоювач", Vec::new())),
        expr_stmt(call_named("п", vec![int(21)])),
    ]);
    assert_eq!(value, Value::Int(42));
}

#[test]
fn test_user_operators_dispatch_on_the_left_operand() {
    let value = run_ok(vec![
        point(),
        class(
            "Вектор",
            &["Точка"],
            vec![function(
                "__додати__",
                vec![param("я", ""), param("інший", "Точка")],
                vec![returns("Точка")],
                vec![ret(vec![call_named(
                    "Точка",
                    vec![
                        binary(BinaryOp::Add, this("х"), attr(ident("інший"), "х")),
                        binary(BinaryOp::Add, this("у"), attr(ident("інший"), "у")),
                    ],
                )])],
            )],
        ),
        assign_stmt(
            Place::ident("с"),
            binary(
                BinaryOp::Add,
                call_named("Вектор", vec![int(1), int(2)]),
                new_point(10, 20),
            ),
        ),
        expr_stmt(method_call(ident("с"), "сума", Vec::new())),
    ]);
    assert_eq!(value, Value::Int(33));
}

#[test]
fn test_methods_see_the_class_by_name() {
    let value = run_ok(vec![
        class(
            "Фабрика",
            &[],
            vec![function(
                "нова",
                vec![param("я", "")],
                vec![returns("Фабрика")],
                vec![ret(vec![call_named("Фабрика", Vec::new())])],
            )],
        ),
        expr_stmt(method_call(
            call_named("Фабрика", Vec::new()),
            "нова",
            Vec::new(),
        )),
    ]);
    assert_eq!(value.type_name(), "Фабрика");
}

#[test]
fn test_missing_attribute_is_an_attribute_error() {
    let err = run_err(vec![point(), expr_stmt(attr(new_point(1, 2), "з"))]);
    assert_eq!(err.message, "об'єкт типу 'Точка' не містить атрибута 'з'");
    assert_eq!(err.category(), ErrorCategory::Attribute);
}

#[test]
fn test_plain_place_reads_resolve_attributes() {
    let value = run_ok(vec![
        point(),
        assign_stmt(Place::ident("т"), new_point(5, 6)),
        expr_stmt(place(Place::attr(ident("т"), "х"))),
    ]);
    assert_eq!(value, Value::Int(5));
}
