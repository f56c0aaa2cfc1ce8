//! `рядок`.

use borsch_ir::{special, BinaryOp};

use super::collections::{normalize_index, repetition, repetition_too_large};
use super::Builtins;
use crate::callable::{Parameter, ReturnType};
use crate::class::Attributes;
use crate::errors::{too_many_arguments, EvalError, EvalResult};
use crate::operators::{
    make_common_operators, make_comparison_operators, make_logical_operators,
    new_binary_operator, new_builtin_constructor, new_length_operator, new_method, to_string,
    Comparison,
};
use crate::state::State;
use crate::value::Value;

fn text(value: &Value) -> &str {
    match value {
        Value::Str(s) => s.as_str(),
        _ => "",
    }
}

/// Quoted form used inside containers.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn compare_strings(
    _: &mut State,
    left: &Value,
    right: &Value,
) -> Result<Option<Comparison>, EvalError> {
    Ok(match right {
        Value::Nil => Some(Comparison::Incomparable),
        Value::Str(r) => Some(text(left).cmp(r.as_str()).into()),
        _ => None,
    })
}

fn repeat_text(source: &str, n: i64) -> Result<String, EvalError> {
    let (count, total) = repetition(source.len(), n)?;
    let mut repeated = String::new();
    repeated
        .try_reserve_exact(total)
        .map_err(|_| repetition_too_large())?;
    if !source.is_empty() {
        for _ in 0..count {
            repeated.push_str(source);
        }
    }
    Ok(repeated)
}

fn construct(state: &mut State, args: &[Value]) -> EvalResult {
    match args {
        [] => Ok(Value::string("")),
        [value] => Ok(Value::string(to_string(state, value)?)),
        _ => Err(too_many_arguments("рядок", 1, args.len())),
    }
}

pub(super) fn string_attributes(b: &Builtins) -> Attributes {
    let mut attrs = Attributes::default();
    let class = &b.string;

    new_builtin_constructor(b, &mut attrs, class, construct);
    new_binary_operator(b, &mut attrs, class, BinaryOp::Add, |_, left, right| {
        Ok(match right {
            Value::Str(r) => Some(Value::string(format!("{}{}", text(left), r.as_str()))),
            _ => None,
        })
    });
    new_binary_operator(b, &mut attrs, class, BinaryOp::Mul, |_, left, right| {
        Ok(match right {
            Value::Int(n) => Some(Value::string(repeat_text(&text(left), *n)?)),
            _ => None,
        })
    });
    new_length_operator(b, &mut attrs, class, |value| Ok(text(value).chars().count()));
    new_method(
        &mut attrs,
        special::GET_ITEM,
        vec![
            Parameter::new("я", class.clone()),
            Parameter::new("індекс", b.int.clone()),
        ],
        vec![ReturnType::new(b.string.clone())],
        |_, args| {
            let s = text(&args[0]);
            let Value::Int(index) = args[1] else {
                return Ok(Value::Nil);
            };
            let index = normalize_index(index, s.chars().count())?;
            Ok(Value::string(s.chars().nth(index).map(String::from).unwrap_or_default()))
        },
    );
    new_method(
        &mut attrs,
        special::TO_STRING,
        vec![Parameter::new("я", class.clone())],
        vec![ReturnType::new(b.string.clone())],
        |_, args| Ok(args[0].clone()),
    );
    new_method(
        &mut attrs,
        special::REPRESENT,
        vec![Parameter::new("я", class.clone())],
        vec![ReturnType::new(b.string.clone())],
        |_, args| Ok(Value::string(quote(text(&args[0])))),
    );
    make_comparison_operators(b, &mut attrs, class, compare_strings);
    make_logical_operators(b, &mut attrs, class);
    make_common_operators(b, &mut attrs, class, |_, value| Ok(!text(value).is_empty()));
    attrs
}
