//! Method binder: the single calling convention for every callable.
//!
//! [`call`] checks arity and argument types against the declared
//! parameters, runs the native handler on top of a fresh scope holding the
//! bound parameters, and validates the result against the declared return
//! types. It owns exactly one scope push/pop and one call-stack frame per
//! invocation, on every exit path.
//!
//! [`construct`] and [`call_value`] build the construction and call-operator
//! protocols on top of it.

use std::sync::Arc;

use borsch_ir::special;

use crate::builtins::builtins;
use crate::call_stack::CallFrame;
use crate::callable::{Callable, Kwargs, Parameter, ReturnType};
use crate::class::{Class, ClassRef};
use crate::errors::{
    argument_not_nullable, argument_type_mismatch, attribute_not_found, missing_arguments, not_callable,
    return_count_mismatch, return_not_nullable, return_type_mismatch, too_many_arguments,
    variadic_type_mismatch, EvalError, EvalResult,
};
use crate::state::State;
use crate::value::Value;

/// Invoke `callable` with already evaluated arguments.
///
/// For methods the receiver must already be the first argument.
#[tracing::instrument(level = "debug", skip_all, fields(name = %callable.display_name()))]
pub fn call(state: &mut State, callable: &Callable, args: Vec<Value>) -> EvalResult {
    let kwargs = bind(callable, &args)?;

    state
        .call_stack
        .push(CallFrame::new(callable.name.as_str()))?;

    let mut ctx = match callable.captured() {
        Some(captured) => captured.clone(),
        None => state.ctx.derive(),
    };
    ctx.push_scope(kwargs.clone());
    let caller = state.swap_context(ctx);

    let result = (callable.handler())(state, &args, &kwargs);

    let popped = state.ctx.pop_scope();
    state.swap_context(caller);
    state.call_stack.pop();

    let value = result?;
    popped?;
    check_result(callable, value)
}

/// Call `callable` with `receiver` as the hidden first argument.
pub fn call_method(
    state: &mut State,
    callable: &Callable,
    receiver: Value,
    args: Vec<Value>,
) -> EvalResult {
    let mut all = Vec::with_capacity(args.len() + 1);
    all.push(receiver);
    all.extend(args);
    call(state, callable, all)
}

/// Construction protocol: empty instance from the class factory, passed
/// to `__конструктор__` as the receiver. A non-nil constructor result
/// replaces the receiver.
#[tracing::instrument(level = "debug", skip_all, fields(class = %class.name()))]
pub fn construct(state: &mut State, class: &ClassRef, args: Vec<Value>) -> EvalResult {
    let instance = Class::instantiate(class)?;
    let Some(constructor) = class.lookup(special::CONSTRUCTOR) else {
        return Ok(instance);
    };
    let Value::Callable(constructor) = constructor else {
        return Err(not_callable(special::CONSTRUCTOR, &constructor.type_name()));
    };
    let result = call_method(state, &constructor, instance.clone(), args)?;
    Ok(if result.is_nil() { instance } else { result })
}

/// Call any callable value: a callable, a class (construction), or an
/// instance whose class defines `__виклик__`.
///
/// `name` is only used in the error for non-callable values.
pub fn call_value(state: &mut State, callee: &Value, name: &str, args: Vec<Value>) -> EvalResult {
    match callee {
        Value::Callable(callable) => call(state, callable, args),
        Value::Class(class) => construct(state, class, args),
        _ => match callee.class().lookup(special::CALL) {
            Some(Value::Callable(operator)) => call_method(state, &operator, callee.clone(), args),
            _ => Err(not_callable(name, &callee.type_name())),
        },
    }
}

/// Check arity and types; returns the parameter bindings.
fn bind(callable: &Callable, args: &[Value]) -> Result<Kwargs, EvalError> {
    let params = &callable.params;
    let fixed = match callable.variadic() {
        Some(_) => params.len() - 1,
        None => params.len(),
    };

    if args.len() < fixed {
        let missing = params[args.len()..fixed]
            .iter()
            .map(|p| p.name.clone())
            .collect();
        return Err(missing_arguments(callable.display_name(), missing));
    }
    if callable.variadic().is_none() && args.len() > fixed {
        return Err(too_many_arguments(callable.display_name(), fixed, args.len()));
    }

    let mut kwargs = Kwargs::default();
    for (param, arg) in params[..fixed].iter().zip(args) {
        check_argument(param, arg)?;
        kwargs.insert(param.name.clone(), arg.clone());
    }

    if let Some(param) = callable.variadic() {
        let rest = &args[fixed..];
        for arg in rest {
            if !param.accepts_class(&arg.class()) && !(arg.is_nil() && param.nullable) {
                return Err(variadic_type_mismatch(
                    &param.name,
                    &param.type_name(),
                    &arg.type_name(),
                ));
            }
        }
        kwargs.insert(param.name.clone(), Value::list(rest.to_vec()));
    }

    Ok(kwargs)
}

fn check_argument(param: &Parameter, arg: &Value) -> Result<(), EvalError> {
    let class = arg.class();
    if param.accepts_class(&class) {
        return Ok(());
    }
    if arg.is_nil() {
        if param.nullable {
            return Ok(());
        }
        return Err(argument_not_nullable(&param.name, class.name()));
    }
    Err(argument_type_mismatch(
        &param.name,
        &param.type_name(),
        class.name(),
    ))
}

fn check_result(callable: &Callable, value: Value) -> EvalResult {
    match callable.returns.as_slice() {
        [] => Ok(value),
        [single] => {
            check_return(callable, single, &value, None)?;
            Ok(value)
        }
        many => {
            let expected = || many.iter().map(ReturnType::type_name).collect::<Vec<_>>();
            let Value::List(items) = &value else {
                return Err(return_count_mismatch(
                    callable.display_name(),
                    expected(),
                    vec![value.type_name()],
                ));
            };
            {
                let items = items.read();
                if items.len() != many.len() {
                    let got = items.iter().map(Value::type_name).collect();
                    return Err(return_count_mismatch(callable.display_name(), expected(), got));
                }
                for (i, (ret, item)) in many.iter().zip(items.iter()).enumerate() {
                    check_return(callable, ret, item, Some(i + 1))?;
                }
            }
            Ok(value)
        }
    }
}

fn check_return(
    callable: &Callable,
    ret: &ReturnType,
    value: &Value,
    position: Option<usize>,
) -> Result<(), EvalError> {
    let class = value.class();
    if Arc::ptr_eq(&ret.class, &builtins().any) || Arc::ptr_eq(&ret.class, &class) {
        return Ok(());
    }
    if value.is_nil() {
        if ret.nullable {
            return Ok(());
        }
        return Err(return_not_nullable(&callable.name, class.name(), position));
    }
    Err(return_type_mismatch(
        &callable.name,
        ret.class.name(),
        class.name(),
        position,
    ))
}

/// Look up `name` on the value's class and call it with the value as
/// receiver. A missing attribute is an attribute error.
pub fn call_by_name(state: &mut State, receiver: &Value, name: &str, args: Vec<Value>) -> EvalResult {
    let attribute = receiver
        .class()
        .lookup(name)
        .ok_or_else(|| attribute_not_found(&receiver.type_name(), name))?;
    invoke_attribute(state, receiver, name, &attribute, args)
}

/// Like [`call_by_name`], but `None` when the class lacks `name`.
pub fn try_call_by_name(
    state: &mut State,
    receiver: &Value,
    name: &str,
    args: Vec<Value>,
) -> Result<Option<Value>, EvalError> {
    match receiver.class().lookup(name) {
        Some(attribute) => invoke_attribute(state, receiver, name, &attribute, args).map(Some),
        None => Ok(None),
    }
}

fn invoke_attribute(
    state: &mut State,
    receiver: &Value,
    name: &str,
    attribute: &Value,
    args: Vec<Value>,
) -> EvalResult {
    match attribute {
        Value::Callable(callable) => call_method(state, callable, receiver.clone(), args),
        other => Err(not_callable(name, &other.type_name())),
    }
}
