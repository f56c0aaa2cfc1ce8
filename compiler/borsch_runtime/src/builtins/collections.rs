//! `список` and `словник`.
//!
//! Both are mutable and shared by reference. Elements are snapshotted
//! before any user code runs on them (comparison, string conversion), so
//! no container lock is held across a call.

use borsch_ir::{special, BinaryOp};

use super::Builtins;
use crate::callable::{Parameter, ReturnType};
use crate::class::{Attributes, ClassRef};
use crate::errors::{
    index_out_of_range, integer_overflow, invalid_conversion, key_not_found, too_many_arguments,
    EvalError, EvalResult,
};
use crate::operators::{
    equals, make_common_operators, make_comparison_operators, make_logical_operators,
    new_binary_operator, new_builtin_constructor, new_length_operator, new_method, represent,
    Comparison,
};
use crate::state::State;
use crate::value::{DictEntries, DictKey, Value};

/// Resolve a possibly negative index against `len`.
pub(super) fn normalize_index(index: i64, len: usize) -> Result<usize, EvalError> {
    let len = i64::try_from(len).map_err(|_| index_out_of_range())?;
    let index = if index < 0 { index + len } else { index };
    if (0..len).contains(&index) {
        usize::try_from(index).map_err(|_| index_out_of_range())
    } else {
        Err(index_out_of_range())
    }
}

/// Repeat count and total length of `len` units repeated `n` times. A
/// negative `n` repeats zero times.
pub(super) fn repetition(len: usize, n: i64) -> Result<(usize, usize), EvalError> {
    let count = usize::try_from(n).unwrap_or(0);
    let total = len
        .checked_mul(count)
        .ok_or_else(|| integer_overflow(BinaryOp::Mul.as_symbol()))?;
    Ok((count, total))
}

/// Error for a repetition whose result cannot be allocated.
pub(super) fn repetition_too_large() -> EvalError {
    integer_overflow(BinaryOp::Mul.as_symbol())
}

fn repeat_items(source: &[Value], n: i64) -> Result<Vec<Value>, EvalError> {
    let (count, total) = repetition(source.len(), n)?;
    let mut repeated = Vec::new();
    repeated
        .try_reserve_exact(total)
        .map_err(|_| repetition_too_large())?;
    if !source.is_empty() {
        for _ in 0..count {
            repeated.extend(source.iter().cloned());
        }
    }
    Ok(repeated)
}

fn items(value: &Value) -> Vec<Value> {
    match value {
        Value::List(items) => items.read().clone(),
        _ => Vec::new(),
    }
}

fn entries(value: &Value) -> Vec<(Value, Value)> {
    match value {
        Value::Dict(entries) => entries.read().values().cloned().collect(),
        _ => Vec::new(),
    }
}

fn receiver(class: &ClassRef) -> Parameter {
    Parameter::new("я", class.clone())
}

fn string_method(
    b: &Builtins,
    attrs: &mut Attributes,
    class: &ClassRef,
    render: fn(&mut State, &Value) -> Result<String, EvalError>,
) {
    new_method(
        attrs,
        special::TO_STRING,
        vec![receiver(class)],
        vec![ReturnType::new(b.string.clone())],
        move |state, args| Ok(Value::string(render(state, &args[0])?)),
    );
}

// список

fn compare_lists(
    state: &mut State,
    left: &Value,
    right: &Value,
) -> Result<Option<Comparison>, EvalError> {
    match right {
        Value::Nil => Ok(Some(Comparison::Incomparable)),
        Value::List(_) => {
            if left.same(right) {
                return Ok(Some(Comparison::Equal));
            }
            let (a, b) = (items(left), items(right));
            if a.len() != b.len() {
                return Ok(Some(Comparison::Incomparable));
            }
            for (x, y) in a.iter().zip(b) {
                if !equals(state, x, y)? {
                    return Ok(Some(Comparison::Incomparable));
                }
            }
            Ok(Some(Comparison::Equal))
        }
        _ => Ok(None),
    }
}

/// Build the string form of the container at `addr`. A container met
/// again while its own form is being built renders as `nested`.
fn render_once(
    state: &mut State,
    addr: usize,
    nested: &str,
    render: impl FnOnce(&mut State) -> Result<String, EvalError>,
) -> Result<String, EvalError> {
    if !state.rendering.insert(addr) {
        return Ok(nested.to_owned());
    }
    let result = render(state);
    state.rendering.remove(&addr);
    result
}

fn render_list(state: &mut State, value: &Value) -> Result<String, EvalError> {
    let Value::List(list) = value else {
        return Ok("[]".to_owned());
    };
    render_once(state, list.addr(), "[...]", |state| {
        let mut parts = Vec::new();
        for item in items(value) {
            parts.push(represent(state, &item)?);
        }
        Ok(format!("[{}]", parts.join(", ")))
    })
}

pub(super) fn list_attributes(b: &Builtins) -> Attributes {
    let mut attrs = Attributes::default();
    let class = &b.list;

    new_builtin_constructor(b, &mut attrs, class, |_, args| Ok(Value::list(args.to_vec())));
    new_binary_operator(b, &mut attrs, class, BinaryOp::Add, |_, left, right| {
        Ok(match right {
            Value::List(_) => {
                let mut joined = items(left);
                joined.extend(items(right));
                Some(Value::list(joined))
            }
            _ => None,
        })
    });
    new_binary_operator(b, &mut attrs, class, BinaryOp::Mul, |_, left, right| {
        Ok(match right {
            Value::Int(n) => Some(Value::list(repeat_items(&items(left), *n)?)),
            _ => None,
        })
    });
    new_length_operator(b, &mut attrs, class, |value| match value {
        Value::List(items) => Ok(items.read().len()),
        _ => Ok(0),
    });
    new_method(
        &mut attrs,
        special::GET_ITEM,
        vec![receiver(class), Parameter::new("індекс", b.int.clone())],
        Vec::new(),
        |_, args| {
            let (Value::List(items), Value::Int(index)) = (&args[0], &args[1]) else {
                return Ok(Value::Nil);
            };
            let items = items.read();
            let index = normalize_index(*index, items.len())?;
            Ok(items[index].clone())
        },
    );
    new_method(
        &mut attrs,
        special::SET_ITEM,
        vec![
            receiver(class),
            Parameter::new("індекс", b.int.clone()),
            Parameter::new("значення", b.any.clone()).nullable(),
        ],
        Vec::new(),
        |_, args| {
            let (Value::List(items), Value::Int(index)) = (&args[0], &args[1]) else {
                return Ok(Value::Nil);
            };
            let mut items = items.write();
            let index = normalize_index(*index, items.len())?;
            items[index] = args[2].clone();
            Ok(Value::Nil)
        },
    );
    string_method(b, &mut attrs, class, render_list);
    make_comparison_operators(b, &mut attrs, class, compare_lists);
    make_logical_operators(b, &mut attrs, class);
    make_common_operators(b, &mut attrs, class, |_, value| Ok(!items(value).is_empty()));
    attrs
}

// словник

fn compare_dicts(
    state: &mut State,
    left: &Value,
    right: &Value,
) -> Result<Option<Comparison>, EvalError> {
    let (Value::Dict(a), Value::Dict(b)) = (left, right) else {
        return Ok(if right.is_nil() {
            Some(Comparison::Incomparable)
        } else {
            None
        });
    };
    if left.same(right) {
        return Ok(Some(Comparison::Equal));
    }
    let pairs: Vec<(Value, Option<Value>)> = {
        let (a, b) = (a.read(), b.read());
        if a.len() != b.len() {
            return Ok(Some(Comparison::Incomparable));
        }
        a.iter()
            .map(|(key, (_, value))| (value.clone(), b.get(key).map(|(_, v)| v.clone())))
            .collect()
    };
    for (value, other) in pairs {
        let Some(other) = other else {
            return Ok(Some(Comparison::Incomparable));
        };
        if !equals(state, &value, other)? {
            return Ok(Some(Comparison::Incomparable));
        }
    }
    Ok(Some(Comparison::Equal))
}

fn render_dict(state: &mut State, value: &Value) -> Result<String, EvalError> {
    let Value::Dict(dict) = value else {
        return Ok("{}".to_owned());
    };
    render_once(state, dict.addr(), "{...}", |state| {
        let mut parts = Vec::new();
        for (key, value) in entries(value) {
            parts.push(format!(
                "{}: {}",
                represent(state, &key)?,
                represent(state, &value)?
            ));
        }
        parts.sort();
        Ok(format!("{{{}}}", parts.join(", ")))
    })
}

fn construct_dict(_: &mut State, args: &[Value]) -> EvalResult {
    match args {
        [] => Ok(Value::dict(DictEntries::default())),
        [Value::Dict(source)] => Ok(Value::dict(source.read().clone())),
        [other] => Err(invalid_conversion(&other.type_name(), "словник")),
        _ => Err(too_many_arguments("словник", 1, args.len())),
    }
}

pub(super) fn dict_attributes(b: &Builtins) -> Attributes {
    let mut attrs = Attributes::default();
    let class = &b.dict;

    new_builtin_constructor(b, &mut attrs, class, construct_dict);
    new_length_operator(b, &mut attrs, class, |value| match value {
        Value::Dict(entries) => Ok(entries.read().len()),
        _ => Ok(0),
    });
    new_method(
        &mut attrs,
        special::GET_ITEM,
        vec![
            receiver(class),
            Parameter::new("ключ", b.any.clone()).nullable(),
        ],
        Vec::new(),
        |state, args| {
            let Value::Dict(entries) = &args[0] else {
                return Ok(Value::Nil);
            };
            let key = DictKey::from_value(&args[1])?;
            let found = entries.read().get(&key).map(|(_, value)| value.clone());
            match found {
                Some(value) => Ok(value),
                None => Err(key_not_found(&represent(state, &args[1])?)),
            }
        },
    );
    new_method(
        &mut attrs,
        special::SET_ITEM,
        vec![
            receiver(class),
            Parameter::new("ключ", b.any.clone()).nullable(),
            Parameter::new("значення", b.any.clone()).nullable(),
        ],
        Vec::new(),
        |_, args| {
            let Value::Dict(entries) = &args[0] else {
                return Ok(Value::Nil);
            };
            let key = DictKey::from_value(&args[1])?;
            entries
                .write()
                .insert(key, (args[1].clone(), args[2].clone()));
            Ok(Value::Nil)
        },
    );
    string_method(b, &mut attrs, class, render_dict);
    make_comparison_operators(b, &mut attrs, class, compare_dicts);
    make_logical_operators(b, &mut attrs, class);
    make_common_operators(b, &mut attrs, class, |_, value| Ok(!entries(value).is_empty()));
    attrs
}
