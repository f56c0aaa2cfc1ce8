//! Names visible from every scope: built-in classes and functions.

use borsch_ir::BinaryOp;
use rustc_hash::FxHashMap;

use super::Builtins;
use crate::binder::call_by_name;
use crate::callable::{Callable, CallableKind, Parameter, ReturnType};
use crate::errors::{assertion_failed, conversion_result, EvalResult};
use crate::operators::{length, to_string};
use crate::state::State;
use crate::value::Value;

fn function<F>(
    name: &str,
    params: Vec<Parameter>,
    returns: Vec<ReturnType>,
    handler: F,
) -> (String, Value)
where
    F: Fn(&mut State, &[Value]) -> EvalResult + Send + Sync + 'static,
{
    let callable = Callable::new(CallableKind::Function, name, params, returns, move |s, a, _| {
        handler(s, a)
    });
    (name.to_owned(), Value::callable(callable))
}

/// `друк(значення...)`: string conversions joined by spaces, then a
/// newline.
fn print(state: &mut State, args: &[Value]) -> EvalResult {
    let mut parts = Vec::with_capacity(args.len());
    for value in args {
        parts.push(to_string(state, value)?);
    }
    state.print.println(&parts.join(" "));
    Ok(Value::Nil)
}

/// `підтвердити(очікуване, фактичне)`: fails unless `очікуване ==
/// фактичне` holds according to the expected value's class.
fn assert_equal(state: &mut State, args: &[Value]) -> EvalResult {
    let (expected, actual) = (&args[0], &args[1]);
    let result = call_by_name(state, expected, BinaryOp::Eq.method_name(), vec![actual.clone()])?;
    let Value::Bool(success) = result else {
        return Err(conversion_result(
            BinaryOp::Eq.method_name(),
            "логічне",
            &result.type_name(),
        ));
    };
    if success {
        return Ok(Value::Nil);
    }
    Err(assertion_failed(
        &to_string(state, expected)?,
        &to_string(state, actual)?,
    ))
}

pub(super) fn names(b: &Builtins) -> FxHashMap<String, Value> {
    let any = || Parameter::new("значення", b.any.clone()).nullable();

    let mut names: FxHashMap<String, Value> = [
        &b.object, &b.any, &b.int, &b.real, &b.bool, &b.string, &b.list, &b.dict, &b.error,
    ]
    .into_iter()
    .map(|class| (class.name().to_owned(), Value::Class(class.clone())))
    .collect();

    names.extend([
        function("друк", vec![any().variadic()], Vec::new(), print),
        function(
            "довжина",
            vec![Parameter::new("послідовність", b.any.clone())],
            vec![ReturnType::new(b.int.clone())],
            |state, args| {
                let n = length(state, &args[0])?;
                Ok(Value::Int(i64::try_from(n).unwrap_or(i64::MAX)))
            },
        ),
        function(
            "тип",
            vec![any()],
            vec![ReturnType::new(b.type_.clone())],
            |_, args| Ok(Value::Class(args[0].class())),
        ),
        function(
            "підтвердити",
            vec![
                Parameter::new("очікуване", b.any.clone()).nullable(),
                Parameter::new("фактичне", b.any.clone()).nullable(),
            ],
            Vec::new(),
            assert_equal,
        ),
    ]);
    names
}
