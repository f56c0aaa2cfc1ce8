use pretty_assertions::assert_eq;

use borsch_eval::{ErrorCategory, EvalErrorKind, Value};
use borsch_ir::build::{
    assign_stmt, binary, call, call_named, expr_stmt, for_each, function, ident, if_stmt, int,
    lambda, nil, param, real, ret, returns, string,
};
use borsch_ir::{BinaryOp, Place, Stmt};

use crate::common::{run_err, run_ok};

/// `функція ф(х: ціле, у: ціле) -> ціле { повернути <body>; }`
fn pair_function(body: borsch_ir::Expr) -> Stmt {
    function(
        "ф",
        vec![param("х", "ціле"), param("у", "ціле")],
        vec![returns("ціле")],
        vec![ret(vec![body])],
    )
}

#[test]
fn test_arguments_are_bound_to_parameters() {
    let value = run_ok(vec![
        pair_function(binary(BinaryOp::Sub, ident("х"), ident("у"))),
        expr_stmt(call_named("ф", vec![int(5), int(3)])),
    ]);
    assert_eq!(value, Value::Int(2));
}

#[test]
fn test_definition_yields_the_callable() {
    let value = run_ok(vec![pair_function(int(0))]);
    assert!(matches!(value, Value::Callable(_)));
    assert_eq!(value.type_name(), "функція");
}

#[test]
fn test_returning_the_wrong_type_names_both_types() {
    let err = run_err(vec![
        pair_function(real(1.5)),
        expr_stmt(call_named("ф", vec![int(1), int(2)])),
    ]);
    assert_eq!(
        err.message,
        "'ф()' повертає значення типу 'ціле', отримано значення з типом 'дійсне'"
    );
    assert!(matches!(
        err.kind,
        EvalErrorKind::ReturnTypeMismatch { ref expected, ref got, .. }
            if expected == "ціле" && got == "дійсне"
    ));
    assert_eq!(err.category(), ErrorCategory::Type);
}

#[test]
fn test_returning_nil_needs_a_nullable_type() {
    let err = run_err(vec![
        pair_function(nil()),
        expr_stmt(call_named("ф", vec![int(1), int(2)])),
    ]);
    assert_eq!(err.message, "'ф()' повертає ненульове значення, отримано 'нульовий тип'");
}

#[test]
fn test_arity_is_checked_before_the_body_runs() {
    let err = run_err(vec![
        pair_function(int(0)),
        expr_stmt(call_named("ф", vec![int(1)])),
    ]);
    assert_eq!(err.message, "при виклику 'ф()' відсутній 1 необхідний параметр: 'у'");

    let err = run_err(vec![
        pair_function(int(0)),
        expr_stmt(call_named("ф", vec![int(1), int(2), int(3)])),
    ]);
    assert_eq!(err.message, "'ф()' приймає 2 необхідні параметри, отримано 3");
}

#[test]
fn test_argument_types_are_checked() {
    let err = run_err(vec![
        pair_function(int(0)),
        expr_stmt(call_named("ф", vec![int(1), string("два")])),
    ]);
    assert_eq!(
        err.message,
        "аргумент 'у' очікує параметр з типом 'ціле', отримано 'рядок'"
    );

    let err = run_err(vec![
        pair_function(int(0)),
        expr_stmt(call_named("ф", vec![int(1), nil()])),
    ]);
    assert_eq!(
        err.message,
        "аргумент 'у' очікує ненульовий параметр, отримано 'нульовий тип'"
    );
}

#[test]
fn test_nullable_parameters_accept_nil() {
    let f = function(
        "ф",
        vec![param("х", "ціле").nullable()],
        vec![returns("ціле").nullable()],
        vec![ret(vec![ident("х")])],
    );
    let value = run_ok(vec![f, expr_stmt(call_named("ф", vec![nil()]))]);
    assert_eq!(value, Value::Nil);
}

#[test]
fn test_variadic_parameter_collects_the_rest() {
    let sum = function(
        "сума",
        vec![param("числа", "ціле").variadic()],
        vec![returns("ціле")],
        vec![
            assign_stmt(Place::ident("р"), int(0)),
            for_each(
                "_",
                "ч",
                ident("числа"),
                vec![assign_stmt(
                    Place::ident("р"),
                    binary(BinaryOp::Add, ident("р"), ident("ч")),
                )],
            ),
            ret(vec![ident("р")]),
        ],
    );
    let value = run_ok(vec![
        sum.clone(),
        expr_stmt(call_named("сума", vec![int(1), int(2), int(3)])),
    ]);
    assert_eq!(value, Value::Int(6));

    let value = run_ok(vec![sum.clone(), expr_stmt(call_named("сума", Vec::new()))]);
    assert_eq!(value, Value::Int(0));

    let err = run_err(vec![sum, expr_stmt(call_named("сума", vec![int(1), real(2.0)]))]);
    assert_eq!(err.category(), ErrorCategory::Type);
}

#[test]
fn test_multiple_return_values_form_a_list() {
    let pair = function(
        "пара",
        Vec::new(),
        vec![returns("ціле"), returns("рядок")],
        vec![ret(vec![int(1), string("а")])],
    );
    let value = run_ok(vec![pair, expr_stmt(call_named("пара", Vec::new()))]);
    assert_eq!(value, Value::list(vec![Value::Int(1), Value::string("а")]));

    let wrong = function(
        "пара",
        Vec::new(),
        vec![returns("ціле"), returns("рядок")],
        vec![ret(vec![int(1)])],
    );
    let err = run_err(vec![wrong, expr_stmt(call_named("пара", Vec::new()))]);
    assert_eq!(err.category(), ErrorCategory::Type);
}

#[test]
fn test_recursion() {
    let factorial = function(
        "факторіал",
        vec![param("н", "ціле")],
        vec![returns("ціле")],
        vec![
            if_stmt(
                binary(BinaryOp::LtEq, ident("н"), int(1)),
                vec![ret(vec![int(1)])],
                None,
            ),
            ret(vec![binary(
                BinaryOp::Mul,
                ident("н"),
                call_named(
                    "факторіал",
                    vec![binary(BinaryOp::Sub, ident("н"), int(1))],
                ),
            )]),
        ],
    );
    let value = run_ok(vec![factorial, expr_stmt(call_named("факторіал", vec![int(10)]))]);
    assert_eq!(value, Value::Int(3_628_800));
}

#[test]
fn test_runaway_recursion_hits_the_depth_limit() {
    let forever = function(
        "вічно",
        Vec::new(),
        Vec::new(),
        vec![ret(vec![call_named("вічно", Vec::new())])],
    );
    let err = run_err(vec![forever, expr_stmt(call_named("вічно", Vec::new()))]);
    assert_eq!(err.message, "перевищено максимальну глибину рекурсії (500)");
}

#[test]
fn test_lambdas_close_over_their_definition_scope() {
    // функція лічильник() { с = 0; повернути лямбда() { с = с + 1; повернути с; }; }
    let counter = function(
        "лічильник",
        Vec::new(),
        Vec::new(),
        vec![
            assign_stmt(Place::ident("с"), int(0)),
            ret(vec![lambda(
                Vec::new(),
                vec![returns("ціле")],
                vec![
                    assign_stmt(
                        Place::ident("с"),
                        binary(BinaryOp::Add, ident("с"), int(1)),
                    ),
                    ret(vec![ident("с")]),
                ],
            )]),
        ],
    );
    let value = run_ok(vec![
        counter,
        assign_stmt(Place::ident("л"), call_named("лічильник", Vec::new())),
        expr_stmt(call_named("л", Vec::new())),
        expr_stmt(call_named("л", Vec::new())),
    ]);
    assert_eq!(value, Value::Int(2));
}

#[test]
fn test_lambda_literal_can_be_called_directly() {
    let square = lambda(
        vec![param("х", "ціле")],
        vec![returns("ціле")],
        vec![ret(vec![binary(BinaryOp::Mul, ident("х"), ident("х"))])],
    );
    let value = run_ok(vec![expr_stmt(call(square, vec![int(7)]))]);
    assert_eq!(value, Value::Int(49));
}

#[test]
fn test_calling_a_non_callable_fails() {
    let err = run_err(vec![
        assign_stmt(Place::ident("х"), int(1)),
        expr_stmt(call_named("х", Vec::new())),
    ]);
    assert_eq!(err.message, "об'єкт 'х' з типом 'ціле' не може бути викликаним");
    assert_eq!(err.category(), ErrorCategory::Runtime);
}

#[test]
fn test_unknown_type_in_a_declaration_fails_at_definition() {
    let err = run_err(vec![function(
        "ф",
        vec![param("х", "Невідомий")],
        Vec::new(),
        Vec::new(),
    )]);
    assert_eq!(err.message, "ідентифікатор 'Невідомий' не визначено");

    let err = run_err(vec![
        assign_stmt(Place::ident("Т"), int(1)),
        function("ф", vec![param("х", "Т")], Vec::new(), Vec::new()),
    ]);
    assert_eq!(err.message, "об'єкт 'Т' не є класом");
}

#[test]
fn test_parameters_typed_any_accept_everything() {
    let identity = function(
        "той_самий",
        vec![param("х", "довільний").nullable()],
        Vec::new(),
        vec![ret(vec![ident("х")])],
    );
    let value = run_ok(vec![
        identity,
        expr_stmt(call_named("той_самий", vec![string("а")])),
    ]);
    assert_eq!(value, Value::string("а"));
}
