//! Root object, `нуль`, classes-as-values, packages, callables and
//! `Помилка`.

use borsch_ir::special;

use super::Builtins;
use crate::callable::{CallableKind, Parameter, ReturnType};
use crate::class::{Attributes, ClassRef};
use crate::errors::EvalError;
use crate::operators::{
    make_common_operators, make_comparison_operators, make_logical_operators, new_method,
    receiver, to_string, Comparison,
};
use crate::state::State;
use crate::value::Value;

/// Attribute holding the message of a `Помилка`.
pub(super) const MESSAGE: &str = "повідомлення";

fn identity(_: &mut State, left: &Value, right: &Value) -> Result<Option<Comparison>, EvalError> {
    Ok(Some(if left.same(right) {
        Comparison::Equal
    } else {
        Comparison::Incomparable
    }))
}

fn string_method<F>(b: &Builtins, attrs: &mut Attributes, class: &ClassRef, render: F)
where
    F: Fn(&Value) -> String + Send + Sync + 'static,
{
    new_method(
        attrs,
        special::TO_STRING,
        vec![receiver(b, class)],
        vec![ReturnType::new(b.string.clone())],
        move |_, args| Ok(Value::string(render(&args[0]))),
    );
}

pub(super) fn object_attributes(b: &Builtins) -> Attributes {
    let mut attrs = Attributes::default();
    let class = &b.object;
    new_method(
        &mut attrs,
        special::CONSTRUCTOR,
        vec![receiver(b, class)],
        Vec::new(),
        |_, _| Ok(Value::Nil),
    );
    string_method(b, &mut attrs, class, |value| {
        format!("<об'єкт класу '{}'>", value.type_name())
    });
    make_comparison_operators(b, &mut attrs, class, identity);
    make_logical_operators(b, &mut attrs, class);
    make_common_operators(b, &mut attrs, class, |_, _| Ok(true));
    attrs
}

pub(super) fn nil_attributes(b: &Builtins) -> Attributes {
    let mut attrs = Attributes::default();
    let class = &b.nil;
    string_method(b, &mut attrs, class, |_| "нуль".to_owned());
    make_comparison_operators(b, &mut attrs, class, |_, _, right| {
        Ok(Some(if right.is_nil() {
            Comparison::Equal
        } else {
            Comparison::Incomparable
        }))
    });
    make_common_operators(b, &mut attrs, class, |_, _| Ok(false));
    attrs
}

pub(super) fn type_attributes(b: &Builtins) -> Attributes {
    let mut attrs = Attributes::default();
    string_method(b, &mut attrs, &b.type_, |value| match value {
        Value::Class(class) => format!("<клас '{}'>", class.name()),
        other => format!("<об'єкт класу '{}'>", other.type_name()),
    });
    attrs
}

pub(super) fn package_attributes(b: &Builtins) -> Attributes {
    let mut attrs = Attributes::default();
    string_method(b, &mut attrs, &b.package, |value| match value {
        Value::Package(package) => format!("<пакет '{}'>", package.name()),
        other => format!("<об'єкт класу '{}'>", other.type_name()),
    });
    attrs
}

pub(super) fn callable_attributes(b: &Builtins, kind: CallableKind) -> Attributes {
    let mut attrs = Attributes::default();
    string_method(b, &mut attrs, b.callable_class(kind), |value| match value {
        Value::Callable(callable) => format!(
            "<{} '{}'>",
            callable.kind.class_name(),
            callable.display_name()
        ),
        other => format!("<об'єкт класу '{}'>", other.type_name()),
    });
    attrs
}

pub(super) fn error_attributes(b: &Builtins) -> Attributes {
    let mut attrs = Attributes::default();
    let class = &b.error;
    new_method(
        &mut attrs,
        special::CONSTRUCTOR,
        vec![
            receiver(b, class),
            Parameter::new(MESSAGE, b.string.clone()),
        ],
        Vec::new(),
        |_, args| {
            args[0].set_attribute(MESSAGE, args[1].clone())?;
            Ok(Value::Nil)
        },
    );
    new_method(
        &mut attrs,
        special::TO_STRING,
        vec![receiver(b, class)],
        vec![ReturnType::new(b.string.clone())],
        |state, args| match args[0].get_attribute(MESSAGE) {
            Ok(message) => Ok(Value::string(to_string(state, &message)?)),
            Err(_) => Ok(Value::string(args[0].type_name())),
        },
    );
    attrs
}
