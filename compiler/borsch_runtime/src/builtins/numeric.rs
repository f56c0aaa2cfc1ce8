//! `ціле`, `дійсне` and `логічне`.
//!
//! Arithmetic dispatches on the dynamic type of the right operand. A
//! boolean operand counts as the integer 0 or 1; an integer meeting a real
//! is widened to a real.

use borsch_ir::{special, BinaryOp, UnaryOp};

use super::Builtins;
use crate::callable::{Parameter, ReturnType};
use crate::class::{Attributes, ClassRef};
use crate::errors::{
    division_by_zero, integer_overflow, invalid_conversion, too_many_arguments, EvalError,
    EvalResult,
};
use crate::operators::{
    make_common_operators, make_comparison_operators, make_logical_operators,
    new_binary_operator, new_builtin_constructor, new_method, new_unary_operator, to_bool,
    to_string, Comparison,
};
use crate::state::State;
use crate::value::Value;

const ARITHMETIC: [BinaryOp; 6] = [
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
    BinaryOp::Mod,
    BinaryOp::Pow,
];

const BITWISE: [BinaryOp; 5] = [
    BinaryOp::BitAnd,
    BinaryOp::BitOr,
    BinaryOp::BitXor,
    BinaryOp::Shl,
    BinaryOp::Shr,
];

#[derive(Copy, Clone, Debug)]
enum Num {
    Int(i64),
    Real(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Num> {
        match value {
            Value::Int(v) => Some(Num::Int(*v)),
            Value::Real(v) => Some(Num::Real(*v)),
            Value::Bool(v) => Some(Num::Int(i64::from(*v))),
            _ => None,
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "integers widen to reals")]
    fn as_real(self) -> f64 {
        match self {
            Num::Int(v) => v as f64,
            Num::Real(v) => v,
        }
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Option<Value>, EvalError> {
    let (Some(a), Some(b)) = (Num::of(left), Num::of(right)) else {
        return Ok(None);
    };
    match (a, b) {
        (Num::Int(a), Num::Int(b)) => int_arithmetic(op, a, b),
        (a, b) => real_arithmetic(op, a.as_real(), b.as_real()),
    }
}

#[expect(clippy::cast_precision_loss, reason = "integer division yields a real")]
fn int_arithmetic(op: BinaryOp, a: i64, b: i64) -> Result<Option<Value>, EvalError> {
    let overflow = || integer_overflow(op.as_symbol());
    let value = match op {
        BinaryOp::Add => a.checked_add(b).ok_or_else(overflow)?,
        BinaryOp::Sub => a.checked_sub(b).ok_or_else(overflow)?,
        BinaryOp::Mul => a.checked_mul(b).ok_or_else(overflow)?,
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            return Ok(Some(Value::Real(a as f64 / b as f64)));
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(division_by_zero());
            }
            a.checked_rem(b).ok_or_else(overflow)?
        }
        BinaryOp::Pow => {
            if b < 0 {
                return Ok(Some(Value::Real((a as f64).powf(b as f64))));
            }
            let exp = u32::try_from(b).map_err(|_| overflow())?;
            a.checked_pow(exp).ok_or_else(overflow)?
        }
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl | BinaryOp::Shr => {
            let shift = u32::try_from(b).map_err(|_| overflow())?;
            let shifted = if op == BinaryOp::Shl {
                a.checked_shl(shift)
            } else {
                a.checked_shr(shift)
            };
            shifted.ok_or_else(overflow)?
        }
        _ => return Ok(None),
    };
    Ok(Some(Value::Int(value)))
}

fn real_arithmetic(op: BinaryOp, a: f64, b: f64) -> Result<Option<Value>, EvalError> {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div | BinaryOp::Mod if b == 0.0 => return Err(division_by_zero()),
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        BinaryOp::Pow => a.powf(b),
        _ => return Ok(None),
    };
    Ok(Some(Value::Real(value)))
}

fn compare_numbers(
    _: &mut State,
    left: &Value,
    right: &Value,
) -> Result<Option<Comparison>, EvalError> {
    if right.is_nil() {
        return Ok(Some(Comparison::Incomparable));
    }
    let (Some(a), Some(b)) = (Num::of(left), Num::of(right)) else {
        return Ok(None);
    };
    Ok(Some(match (a, b) {
        (Num::Int(a), Num::Int(b)) => a.cmp(&b).into(),
        (a, b) => Comparison::from_partial(a.as_real().partial_cmp(&b.as_real())),
    }))
}

fn truth(_: &mut State, value: &Value) -> Result<bool, EvalError> {
    Ok(match value {
        Value::Int(v) => *v != 0,
        Value::Real(v) => *v != 0.0,
        Value::Bool(v) => *v,
        _ => false,
    })
}

/// Operators and conversions shared by the three numeric classes.
fn numeric_attributes(b: &Builtins, class: &ClassRef, ops: &[BinaryOp]) -> Attributes {
    let mut attrs = Attributes::default();
    for &op in ops {
        new_binary_operator(b, &mut attrs, class, op, move |_, left, right| {
            arithmetic(op, left, right)
        });
    }
    new_method(
        &mut attrs,
        special::TO_STRING,
        vec![Parameter::new("я", class.clone())],
        vec![ReturnType::new(b.string.clone())],
        |_, args| {
            Ok(Value::string(match &args[0] {
                Value::Int(v) => v.to_string(),
                Value::Real(v) => v.to_string(),
                Value::Bool(true) => "істина".to_owned(),
                _ => "хиба".to_owned(),
            }))
        },
    );
    make_comparison_operators(b, &mut attrs, class, compare_numbers);
    make_logical_operators(b, &mut attrs, class);
    make_common_operators(b, &mut attrs, class, truth);
    attrs
}

/// Exactly zero or one constructor argument.
fn single_argument<'a>(class: &str, args: &'a [Value]) -> Result<Option<&'a Value>, EvalError> {
    match args {
        [] => Ok(None),
        [value] => Ok(Some(value)),
        _ => Err(too_many_arguments(class, 1, args.len())),
    }
}

#[expect(clippy::cast_possible_truncation, reason = "reals truncate toward zero")]
fn to_int(state: &mut State, args: &[Value]) -> EvalResult {
    let Some(value) = single_argument("ціле", args)? else {
        return Ok(Value::Int(0));
    };
    match value {
        Value::Int(_) => Ok(value.clone()),
        Value::Bool(v) => Ok(Value::Int(i64::from(*v))),
        Value::Real(v) if v.is_finite() => Ok(Value::Int(v.trunc() as i64)),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid_conversion(s, "ціле")),
        other => Err(invalid_conversion(&to_string(state, other)?, "ціле")),
    }
}

fn to_real(state: &mut State, args: &[Value]) -> EvalResult {
    let Some(value) = single_argument("дійсне", args)? else {
        return Ok(Value::Real(0.0));
    };
    match Num::of(value) {
        Some(num) => Ok(Value::Real(num.as_real())),
        None => match value {
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Real)
                .map_err(|_| invalid_conversion(s, "дійсне")),
            other => Err(invalid_conversion(&to_string(state, other)?, "дійсне")),
        },
    }
}

fn to_logical(state: &mut State, args: &[Value]) -> EvalResult {
    match single_argument("логічне", args)? {
        Some(value) => Ok(Value::Bool(to_bool(state, value)?)),
        None => Ok(Value::Bool(false)),
    }
}

pub(super) fn int_attributes(b: &Builtins) -> Attributes {
    let class = &b.int;
    let ops: Vec<BinaryOp> = ARITHMETIC.iter().chain(&BITWISE).copied().collect();
    let mut attrs = numeric_attributes(b, class, &ops);
    new_builtin_constructor(b, &mut attrs, class, to_int);
    new_unary_operator(&mut attrs, class, UnaryOp::Plus, |_, v| Ok(v.clone()));
    new_unary_operator(&mut attrs, class, UnaryOp::Minus, |_, v| match v {
        Value::Int(v) => v
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow(UnaryOp::Minus.as_symbol())),
        other => Ok(other.clone()),
    });
    new_unary_operator(&mut attrs, class, UnaryOp::BitNot, |_, v| match v {
        Value::Int(v) => Ok(Value::Int(!v)),
        other => Ok(other.clone()),
    });
    attrs
}

pub(super) fn real_attributes(b: &Builtins) -> Attributes {
    let class = &b.real;
    let mut attrs = numeric_attributes(b, class, &ARITHMETIC);
    new_builtin_constructor(b, &mut attrs, class, to_real);
    new_unary_operator(&mut attrs, class, UnaryOp::Plus, |_, v| Ok(v.clone()));
    new_unary_operator(&mut attrs, class, UnaryOp::Minus, |_, v| match v {
        Value::Real(v) => Ok(Value::Real(-v)),
        other => Ok(other.clone()),
    });
    attrs
}

pub(super) fn bool_attributes(b: &Builtins) -> Attributes {
    let class = &b.bool;
    let ops: Vec<BinaryOp> = ARITHMETIC.iter().chain(&BITWISE).copied().collect();
    let mut attrs = numeric_attributes(b, class, &ops);
    new_builtin_constructor(b, &mut attrs, class, to_logical);
    let as_int = |v: &Value| match v {
        Value::Bool(v) => i64::from(*v),
        _ => 0,
    };
    new_unary_operator(&mut attrs, class, UnaryOp::Plus, move |_, v| {
        Ok(Value::Int(as_int(v)))
    });
    new_unary_operator(&mut attrs, class, UnaryOp::Minus, move |_, v| {
        Ok(Value::Int(-as_int(v)))
    });
    new_unary_operator(&mut attrs, class, UnaryOp::BitNot, move |_, v| {
        Ok(Value::Int(!as_int(v)))
    });
    attrs
}
