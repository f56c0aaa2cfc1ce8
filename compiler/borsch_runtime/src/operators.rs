//! Operator dispatch protocol.
//!
//! Operators are ordinary callables stored on a class under reserved names
//! (see [`BinaryOp::method_name`]). This module has two halves:
//!
//! - **Generators** build those callables uniformly for built-in classes:
//!   six relational operators from one [`Comparator`], the logical
//!   operators and truthiness from the class's boolean conversion, and
//!   binary/unary/constructor/length wrappers around plain functions.
//! - **Dispatch helpers** ([`binary`], [`unary`], [`to_bool`], ...) are what
//!   the evaluator calls: they look the reserved name up on the operand's
//!   class and call it through the binder.

use std::cmp::Ordering;

use borsch_ir::{special, BinaryOp, UnaryOp};

use crate::binder::call_by_name;
use crate::builtins::Builtins;
use crate::callable::{Callable, CallableKind, Parameter, ReturnType};
use crate::class::{Attributes, ClassRef};
use crate::errors::{conversion_result, operator_not_supported, EvalError, EvalResult};
use crate::state::State;
use crate::value::Value;

/// Result of a tri-state comparator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    /// The operands cannot be ordered (e.g. anything against `нуль`).
    /// Every relation is false except `!=`.
    Incomparable,
}

impl Comparison {
    /// `None` (NaN) maps to [`Comparison::Incomparable`].
    pub fn from_partial(ordering: Option<Ordering>) -> Self {
        match ordering {
            Some(Ordering::Less) => Comparison::Less,
            Some(Ordering::Equal) => Comparison::Equal,
            Some(Ordering::Greater) => Comparison::Greater,
            None => Comparison::Incomparable,
        }
    }

    /// Whether `op` holds for this result. Non-relational operators never
    /// hold.
    pub fn satisfies(self, op: BinaryOp) -> bool {
        use Comparison::{Equal, Greater, Less};
        match op {
            BinaryOp::Eq => self == Equal,
            BinaryOp::NotEq => self != Equal,
            BinaryOp::Lt => self == Less,
            BinaryOp::LtEq => matches!(self, Less | Equal),
            BinaryOp::Gt => self == Greater,
            BinaryOp::GtEq => matches!(self, Greater | Equal),
            _ => false,
        }
    }
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        Comparison::from_partial(Some(ordering))
    }
}

/// Relational operators in registration order.
pub const RELATIONAL: [BinaryOp; 6] = [
    BinaryOp::Eq,
    BinaryOp::NotEq,
    BinaryOp::Lt,
    BinaryOp::LtEq,
    BinaryOp::Gt,
    BinaryOp::GtEq,
];

/// Compares a receiver against any other value. `Ok(None)` means the
/// other operand's type is not supported and becomes an operator type
/// error.
pub type Comparator = fn(&mut State, &Value, &Value) -> Result<Option<Comparison>, EvalError>;

/// Builds a value of the class from the constructor's arguments.
pub type ConstructorFn = fn(&mut State, &[Value]) -> EvalResult;

pub type LengthFn = fn(&Value) -> Result<usize, EvalError>;

/// Boolean conversion of a receiver.
pub type TruthFn = fn(&mut State, &Value) -> Result<bool, EvalError>;

/// Hidden receiver of a built-in method. Classes open to derivation take
/// any receiver so their methods stay callable on derived instances.
pub(crate) fn receiver(b: &Builtins, class: &ClassRef) -> Parameter {
    if class.is_final() {
        Parameter::new("я", class.clone())
    } else {
        Parameter::new("я", b.any.clone())
    }
}

fn other(b: &Builtins) -> Parameter {
    Parameter::new("інший", b.any.clone()).nullable()
}

fn method<F>(
    name: &str,
    params: Vec<Parameter>,
    returns: Vec<ReturnType>,
    handler: F,
) -> Value
where
    F: Fn(&mut State, &[Value]) -> EvalResult + Send + Sync + 'static,
{
    Value::callable(Callable::new(
        CallableKind::Method,
        name,
        params,
        returns,
        move |state, args, _| handler(state, args),
    ))
}

// Generators

/// Register `op` on `class`. `handler` returning `Ok(None)` means the
/// right operand's type is not supported and becomes an operator type
/// error.
pub fn new_binary_operator<F>(
    b: &Builtins,
    attrs: &mut Attributes,
    class: &ClassRef,
    op: BinaryOp,
    handler: F,
) where
    F: Fn(&mut State, &Value, &Value) -> Result<Option<Value>, EvalError> + Send + Sync + 'static,
{
    let value = method(
        op.method_name(),
        vec![receiver(b, class), other(b)],
        Vec::new(),
        move |state, args| match handler(state, &args[0], &args[1])? {
            Some(result) => Ok(result),
            None => Err(operator_not_supported(
                op.as_symbol(),
                &args[0].type_name(),
                &args[1].type_name(),
            )),
        },
    );
    attrs.insert(op.method_name().to_owned(), value);
}

pub fn new_unary_operator<F>(attrs: &mut Attributes, class: &ClassRef, op: UnaryOp, handler: F)
where
    F: Fn(&mut State, &Value) -> EvalResult + Send + Sync + 'static,
{
    let value = method(
        op.method_name(),
        vec![Parameter::new("я", class.clone())],
        Vec::new(),
        move |state, args| handler(state, &args[0]),
    );
    attrs.insert(op.method_name().to_owned(), value);
}

/// Derive all six relational operators from `comparator`.
pub fn make_comparison_operators(
    b: &Builtins,
    attrs: &mut Attributes,
    class: &ClassRef,
    comparator: Comparator,
) {
    for op in RELATIONAL {
        let value = method(
            op.method_name(),
            vec![receiver(b, class), other(b)],
            vec![ReturnType::new(b.bool.clone())],
            move |state, args| match comparator(state, &args[0], &args[1])? {
                Some(result) => Ok(Value::Bool(result.satisfies(op))),
                None => Err(operator_not_supported(
                    op.as_symbol(),
                    &args[0].type_name(),
                    &args[1].type_name(),
                )),
            },
        );
        attrs.insert(op.method_name().to_owned(), value);
    }
}

/// `не`, `і`, `або` over the operands' boolean conversions. Both operands
/// are already evaluated by the time these run.
pub fn make_logical_operators(b: &Builtins, attrs: &mut Attributes, class: &ClassRef) {
    let returns = || vec![ReturnType::new(b.bool.clone())];

    attrs.insert(
        UnaryOp::Not.method_name().to_owned(),
        method(
            UnaryOp::Not.method_name(),
            vec![receiver(b, class)],
            returns(),
            |state, args| Ok(Value::Bool(!to_bool(state, &args[0])?)),
        ),
    );
    attrs.insert(
        BinaryOp::And.method_name().to_owned(),
        method(
            BinaryOp::And.method_name(),
            vec![receiver(b, class), other(b)],
            returns(),
            |state, args| {
                let left = to_bool(state, &args[0])?;
                let right = to_bool(state, &args[1])?;
                Ok(Value::Bool(left && right))
            },
        ),
    );
    attrs.insert(
        BinaryOp::Or.method_name().to_owned(),
        method(
            BinaryOp::Or.method_name(),
            vec![receiver(b, class), other(b)],
            returns(),
            |state, args| {
                let left = to_bool(state, &args[0])?;
                let right = to_bool(state, &args[1])?;
                Ok(Value::Bool(left || right))
            },
        ),
    );
}

/// `__логічне__` from a native truthiness function.
pub fn make_common_operators(b: &Builtins, attrs: &mut Attributes, class: &ClassRef, truth: TruthFn) {
    attrs.insert(
        special::TO_BOOL.to_owned(),
        method(
            special::TO_BOOL,
            vec![receiver(b, class)],
            vec![ReturnType::new(b.bool.clone())],
            move |state, args| Ok(Value::Bool(truth(state, &args[0])?)),
        ),
    );
}

/// `__конструктор__(я, значення...)` whose result replaces the empty
/// receiver.
pub fn new_builtin_constructor(
    b: &Builtins,
    attrs: &mut Attributes,
    class: &ClassRef,
    handler: ConstructorFn,
) {
    attrs.insert(
        special::CONSTRUCTOR.to_owned(),
        method(
            special::CONSTRUCTOR,
            vec![
                receiver(b, class),
                Parameter::new("значення", b.any.clone()).nullable().variadic(),
            ],
            Vec::new(),
            move |state, args| handler(state, &args[1..]),
        ),
    );
}

pub fn new_length_operator(b: &Builtins, attrs: &mut Attributes, class: &ClassRef, handler: LengthFn) {
    attrs.insert(
        special::LENGTH.to_owned(),
        method(
            special::LENGTH,
            vec![receiver(b, class)],
            vec![ReturnType::new(b.int.clone())],
            move |_, args| {
                let length = handler(&args[0])?;
                Ok(Value::Int(i64::try_from(length).unwrap_or(i64::MAX)))
            },
        ),
    );
}

/// Register a method with a native body under `name`.
pub fn new_method<F>(
    attrs: &mut Attributes,
    name: &str,
    params: Vec<Parameter>,
    returns: Vec<ReturnType>,
    handler: F,
) where
    F: Fn(&mut State, &[Value]) -> EvalResult + Send + Sync + 'static,
{
    attrs.insert(name.to_owned(), method(name, params, returns, handler));
}

// Dispatch helpers

/// `left <op> right` through the left operand's class.
pub fn binary(state: &mut State, op: BinaryOp, left: &Value, right: Value) -> EvalResult {
    call_by_name(state, left, op.method_name(), vec![right])
}

pub fn unary(state: &mut State, op: UnaryOp, operand: &Value) -> EvalResult {
    call_by_name(state, operand, op.method_name(), Vec::new())
}

/// Boolean conversion through `__логічне__`.
pub fn to_bool(state: &mut State, value: &Value) -> Result<bool, EvalError> {
    if let Value::Bool(b) = value {
        return Ok(*b);
    }
    match call_by_name(state, value, special::TO_BOOL, Vec::new())? {
        Value::Bool(b) => Ok(b),
        other => Err(conversion_result(special::TO_BOOL, "логічне", &other.type_name())),
    }
}

/// String conversion through `__рядок__`.
pub fn to_string(state: &mut State, value: &Value) -> Result<String, EvalError> {
    if let Value::Str(s) = value {
        return Ok((**s).clone());
    }
    match call_by_name(state, value, special::TO_STRING, Vec::new())? {
        Value::Str(s) => Ok((*s).clone()),
        other => Err(conversion_result(special::TO_STRING, "рядок", &other.type_name())),
    }
}

/// Representation inside containers: `__представлення__`, falling back to
/// the string conversion.
pub fn represent(state: &mut State, value: &Value) -> Result<String, EvalError> {
    if value.class().lookup(special::REPRESENT).is_none() {
        return to_string(state, value);
    }
    match call_by_name(state, value, special::REPRESENT, Vec::new())? {
        Value::Str(s) => Ok((*s).clone()),
        other => Err(conversion_result(special::REPRESENT, "рядок", &other.type_name())),
    }
}

/// Length through `__довжина__`.
pub fn length(state: &mut State, value: &Value) -> Result<usize, EvalError> {
    match call_by_name(state, value, special::LENGTH, Vec::new())? {
        Value::Int(n) => Ok(usize::try_from(n).unwrap_or(0)),
        other => Err(conversion_result(special::LENGTH, "ціле", &other.type_name())),
    }
}

pub fn get_item(state: &mut State, container: &Value, index: Value) -> EvalResult {
    call_by_name(state, container, special::GET_ITEM, vec![index])
}

pub fn set_item(state: &mut State, container: &Value, index: Value, value: Value) -> EvalResult {
    call_by_name(state, container, special::SET_ITEM, vec![index, value])
}

/// `==` through the left operand's class, as a host boolean.
pub fn equals(state: &mut State, left: &Value, right: Value) -> Result<bool, EvalError> {
    let result = binary(state, BinaryOp::Eq, left, right)?;
    to_bool(state, &result)
}
