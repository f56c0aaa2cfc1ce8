//! Error types for evaluation.
//!
//! Every failure is an [`EvalError`]: a structured [`EvalErrorKind`], the
//! message rendered from it, an optional thrown value and the trace frames
//! accumulated while the error propagates.
//!
//! # Categories
//!
//! [`ErrorCategory`] groups kinds into the language taxonomy. Only
//! [`ErrorCategory::Exception`] (a value thrown with `викинути`) can be
//! intercepted by a guarded block; every other category unwinds to the
//! host. [`ErrorCategory::Fatal`] marks broken invariants of the
//! evaluator itself.
//!
//! Factory functions (e.g. [`division_by_zero`]) are the public API for
//! raising errors; they fill in both `kind` and `message`.

use borsch_diagnostic::{TraceFrame, Traceback};

use crate::value::Value;

/// Result of evaluating an expression or calling a callable.
pub type EvalResult = Result<Value, EvalError>;

/// Language-level error taxonomy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Unbound identifier.
    Name,
    /// Missing attribute or operator.
    Attribute,
    /// Argument, return or operand type mismatch, including arity.
    Type,
    /// Domain errors: division by zero, bad index, non-callable callee.
    Runtime,
    /// A thrown `Помилка`-derived value. The only catchable category.
    Exception,
    /// Invariant violation; never caught.
    Fatal,
}

/// Typed error condition.
///
/// `Display` produces the user-visible message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Name / attribute
    #[error("ідентифікатор '{name}' не визначено")]
    UndefinedVariable { name: String },
    #[error("об'єкт типу '{type_name}' не містить атрибута '{attribute}'")]
    AttributeNotFound { type_name: String, attribute: String },

    // Operators
    #[error("непідтримувані типи операндів для оператора {symbol}: '{left}' і '{right}'")]
    OperatorNotSupported {
        symbol: &'static str,
        left: String,
        right: String,
    },
    #[error("непідтримуваний тип операнда для оператора {symbol}: '{operand}'")]
    UnaryNotSupported {
        symbol: &'static str,
        operand: String,
    },
    #[error("результат '{operation}' має бути типу '{expected}', отримано '{got}'")]
    ConversionResult {
        operation: &'static str,
        expected: &'static str,
        got: String,
    },

    // Call binding
    #[error("{}", missing_arguments_message(.callable, .params))]
    MissingArguments {
        callable: String,
        params: Vec<String>,
    },
    #[error("{}", too_many_arguments_message(.callable, .expected, .got))]
    TooManyArguments {
        callable: String,
        expected: usize,
        got: usize,
    },
    #[error("аргумент '{param}' очікує параметр з типом '{expected}', отримано '{got}'")]
    ArgumentTypeMismatch {
        param: String,
        expected: String,
        got: String,
    },
    #[error("аргумент '{param}' очікує ненульовий параметр, отримано '{got}'")]
    ArgumentNotNullable { param: String, got: String },
    #[error("аргумент '{param}' очікує список параметрів з типом '{expected}', отримано '{got}'")]
    VariadicTypeMismatch {
        param: String,
        expected: String,
        got: String,
    },
    #[error("{} повертає значення типу '{expected}'{}, отримано значення з типом '{got}'", signature(.callable), position_suffix(.position))]
    ReturnTypeMismatch {
        callable: String,
        expected: String,
        got: String,
        position: Option<usize>,
    },
    #[error("{} повертає ненульове значення{}, отримано '{got}'", signature(.callable), position_suffix(.position))]
    ReturnNotNullable {
        callable: String,
        got: String,
        position: Option<usize>,
    },
    #[error("'{callable}' повертає значення з типами ({}), отримано ({})", join(.expected), join(.got))]
    ReturnCountMismatch {
        callable: String,
        expected: Vec<String>,
        got: Vec<String>,
    },
    #[error("об'єкт '{name}' з типом '{type_name}' не може бути викликаним")]
    NotCallable { name: String, type_name: String },
    #[error("об'єкт '{name}' не є класом")]
    NotAClass { name: String },
    #[error("неможливо створити екземпляр класу '{class}'")]
    NotInstantiable { class: String },
    #[error("перевищено максимальну глибину рекурсії ({limit})")]
    RecursionLimit { limit: usize },

    // Values
    #[error("ділення на нуль")]
    DivisionByZero,
    #[error("переповнення цілого числа в операції {symbol}")]
    IntegerOverflow { symbol: &'static str },
    #[error("індекс за межами послідовності")]
    IndexOutOfRange,
    #[error("ключ {key} відсутній у словнику")]
    KeyNotFound { key: String },
    #[error("тип '{type_name}' не може бути ключем словника")]
    UnhashableKey { type_name: String },
    #[error("неможливо перетворити '{value}' у тип '{target}'")]
    InvalidConversion { value: String, target: &'static str },
    #[error("тип '{type_name}' не є об'єктом, по якому можна ітерувати")]
    NotIterable { type_name: String },
    #[error("неможливо розпакувати {got} значень у {expected} змінних")]
    UnpackMismatch { expected: usize, got: usize },
    #[error("неможливо встановити значення об'єкту 'нуль'")]
    NilAssignment,
    #[error("'повернути' за межами функції")]
    ReturnOutsideFunction,
    #[error("не вдалося підтвердити, що {expected} дорівнює {actual}")]
    AssertionFailed { expected: String, actual: String },

    // Classes
    #[error("неможливо наслідувати фінальний клас '{class}'")]
    FinalBase { class: String },
    #[error("клас '{class}' може мати лише один базовий клас")]
    MultipleBases { class: String },

    // Exceptions
    #[error("{class}: {text}")]
    Thrown { class: String, text: String },

    // Fatal
    #[error("помилки мають наслідувати клас '{error_class}'")]
    ThrowRequiresError { error_class: &'static str },
    #[error("об'єкт '{name}' не є класом")]
    CatchRequiresClass { name: String },
    #[error("перехоплення помилок, які не наслідують клас '{error_class}' заборонено")]
    CatchRequiresError { error_class: &'static str },
    #[error("стек областей видимості порожній")]
    ScopeUnderflow,
    #[error("атрибути класу '{class}' вже ініціалізовано")]
    ClassAlreadyInitialized { class: String },

    #[error("{message}")]
    Custom { message: String },
}

impl EvalErrorKind {
    /// Place the kind in the language taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedVariable { .. } => ErrorCategory::Name,
            Self::AttributeNotFound { .. } => ErrorCategory::Attribute,
            Self::OperatorNotSupported { .. }
            | Self::UnaryNotSupported { .. }
            | Self::ConversionResult { .. }
            | Self::MissingArguments { .. }
            | Self::TooManyArguments { .. }
            | Self::ArgumentTypeMismatch { .. }
            | Self::ArgumentNotNullable { .. }
            | Self::VariadicTypeMismatch { .. }
            | Self::ReturnTypeMismatch { .. }
            | Self::ReturnNotNullable { .. }
            | Self::ReturnCountMismatch { .. }
            | Self::NotAClass { .. }
            | Self::UnhashableKey { .. }
            | Self::NotIterable { .. } => ErrorCategory::Type,
            Self::NotCallable { .. }
            | Self::NotInstantiable { .. }
            | Self::RecursionLimit { .. }
            | Self::DivisionByZero
            | Self::IntegerOverflow { .. }
            | Self::IndexOutOfRange
            | Self::KeyNotFound { .. }
            | Self::InvalidConversion { .. }
            | Self::UnpackMismatch { .. }
            | Self::NilAssignment
            | Self::ReturnOutsideFunction
            | Self::AssertionFailed { .. }
            | Self::FinalBase { .. }
            | Self::MultipleBases { .. }
            | Self::Custom { .. } => ErrorCategory::Runtime,
            Self::Thrown { .. } => ErrorCategory::Exception,
            Self::ThrowRequiresError { .. }
            | Self::CatchRequiresClass { .. }
            | Self::CatchRequiresError { .. }
            | Self::ScopeUnderflow
            | Self::ClassAlreadyInitialized { .. } => ErrorCategory::Fatal,
        }
    }
}

fn signature(callable: &str) -> String {
    if callable.is_empty() {
        "лямбда-вираз".to_owned()
    } else {
        format!("'{callable}()'")
    }
}

// Helpers below take references: `thiserror` passes fields by reference.

fn position_suffix(position: &Option<usize>) -> String {
    position.map_or_else(String::new, |i| format!(" на позиції {i}"))
}

fn join(names: &[String]) -> String {
    names.join(", ")
}

/// Ukrainian noun agreement: `(1, 2..=4, rest)`.
fn plural<'a>(n: usize, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    match n {
        1 => one,
        2..=4 => few,
        _ => many,
    }
}

fn missing_arguments_message(callable: &str, params: &[String]) -> String {
    let n = params.len();
    let mut names = String::new();
    for (i, param) in params.iter().enumerate() {
        names.push_str(&format!("'{param}'"));
        if i + 2 < n {
            names.push_str(", ");
        } else if i + 1 < n {
            names.push_str(" та ");
        }
    }
    format!(
        "при виклику '{callable}()' відсутн{} {n} необхідн{} параметр{}: {names}",
        plural(n, "ій", "і", "і"),
        plural(n, "ий", "і", "их"),
        plural(n, "", "и", "ів"),
    )
}

fn too_many_arguments_message(callable: &str, expected: &usize, got: &usize) -> String {
    let expected = *expected;
    format!(
        "'{callable}()' приймає {expected} необхідн{} параметр{}, отримано {got}",
        plural(expected, "ий", "і", "их"),
        plural(expected, "", "и", "ів"),
    )
}

/// Evaluation error.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// The value in flight for [`ErrorCategory::Exception`] errors.
    pub thrown: Option<Value>,
    /// Evaluation levels the error passed through, innermost first.
    pub trace: Traceback,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            thrown: None,
            trace: Traceback::new(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Only thrown language exceptions can be intercepted.
    pub fn is_catchable(&self) -> bool {
        self.category() == ErrorCategory::Exception
    }

    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Fatal
    }

    /// Record one more enclosing evaluation level.
    #[must_use]
    pub fn with_frame(mut self, frame: TraceFrame) -> Self {
        self.trace.push(frame);
        self
    }

    /// Frames outermost first, then the message.
    pub fn render(&self) -> String {
        self.trace.render(&self.message)
    }

    /// [`EvalError::render`] under the traceback header.
    pub fn report(&self) -> String {
        self.trace.report(&self.message)
    }
}

// Name and attribute errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    })
}

#[cold]
pub fn attribute_not_found(type_name: &str, attribute: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AttributeNotFound {
        type_name: type_name.to_owned(),
        attribute: attribute.to_owned(),
    })
}

// Operator errors

/// A binary operator handler does not support the right operand.
#[cold]
pub fn operator_not_supported(symbol: &'static str, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperatorNotSupported {
        symbol,
        left: left.to_owned(),
        right: right.to_owned(),
    })
}

#[cold]
pub fn unary_not_supported(symbol: &'static str, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnaryNotSupported {
        symbol,
        operand: operand.to_owned(),
    })
}

/// A conversion operator returned a value of the wrong class.
#[cold]
pub fn conversion_result(operation: &'static str, expected: &'static str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConversionResult {
        operation,
        expected,
        got: got.to_owned(),
    })
}

// Call binding errors

#[cold]
pub fn missing_arguments(callable: &str, params: Vec<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArguments {
        callable: callable.to_owned(),
        params,
    })
}

#[cold]
pub fn too_many_arguments(callable: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyArguments {
        callable: callable.to_owned(),
        expected,
        got,
    })
}

#[cold]
pub fn argument_type_mismatch(param: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentTypeMismatch {
        param: param.to_owned(),
        expected: expected.to_owned(),
        got: got.to_owned(),
    })
}

#[cold]
pub fn argument_not_nullable(param: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentNotNullable {
        param: param.to_owned(),
        got: got.to_owned(),
    })
}

#[cold]
pub fn variadic_type_mismatch(param: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::VariadicTypeMismatch {
        param: param.to_owned(),
        expected: expected.to_owned(),
        got: got.to_owned(),
    })
}

/// `position` is 1-based and only set for multi-value returns.
#[cold]
pub fn return_type_mismatch(
    callable: &str,
    expected: &str,
    got: &str,
    position: Option<usize>,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnTypeMismatch {
        callable: callable.to_owned(),
        expected: expected.to_owned(),
        got: got.to_owned(),
        position,
    })
}

#[cold]
pub fn return_not_nullable(callable: &str, got: &str, position: Option<usize>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnNotNullable {
        callable: callable.to_owned(),
        got: got.to_owned(),
        position,
    })
}

#[cold]
pub fn return_count_mismatch(callable: &str, expected: Vec<String>, got: Vec<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnCountMismatch {
        callable: callable.to_owned(),
        expected,
        got,
    })
}

#[cold]
pub fn not_callable(name: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        name: name.to_owned(),
        type_name: type_name.to_owned(),
    })
}

#[cold]
pub fn not_a_class(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAClass {
        name: name.to_owned(),
    })
}

#[cold]
pub fn not_instantiable(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotInstantiable {
        class: class.to_owned(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

// Value errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(symbol: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { symbol })
}

#[cold]
pub fn index_out_of_range() -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange)
}

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_owned(),
    })
}

#[cold]
pub fn unhashable_key(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnhashableKey {
        type_name: type_name.to_owned(),
    })
}

#[cold]
pub fn invalid_conversion(value: &str, target: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConversion {
        value: value.to_owned(),
        target,
    })
}

#[cold]
pub fn not_iterable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable {
        type_name: type_name.to_owned(),
    })
}

#[cold]
pub fn unpack_mismatch(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnpackMismatch { expected, got })
}

#[cold]
pub fn nil_assignment() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NilAssignment)
}

#[cold]
pub fn return_outside_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnOutsideFunction)
}

#[cold]
pub fn assertion_failed(expected: &str, actual: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssertionFailed {
        expected: expected.to_owned(),
        actual: actual.to_owned(),
    })
}

// Class definition errors

#[cold]
pub fn final_base(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FinalBase {
        class: class.to_owned(),
    })
}

#[cold]
pub fn multiple_bases(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MultipleBases {
        class: class.to_owned(),
    })
}

// Exceptions

/// A `Помилка`-derived value thrown by `викинути`.
///
/// `text` is the string conversion of `value`.
#[cold]
pub fn thrown(value: Value, class: &str, text: String) -> EvalError {
    let mut error = EvalError::from_kind(EvalErrorKind::Thrown {
        class: class.to_owned(),
        text,
    });
    error.thrown = Some(value);
    error
}

// Fatal errors

#[cold]
pub fn throw_requires_error_class() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ThrowRequiresError {
        error_class: crate::builtins::ERROR_CLASS,
    })
}

#[cold]
pub fn catch_requires_class(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CatchRequiresClass {
        name: name.to_owned(),
    })
}

#[cold]
pub fn catch_requires_error_class() -> EvalError {
    EvalError::from_kind(EvalErrorKind::CatchRequiresError {
        error_class: crate::builtins::ERROR_CLASS,
    })
}

#[cold]
pub fn scope_underflow() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScopeUnderflow)
}

#[cold]
pub fn class_already_initialized(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ClassAlreadyInitialized {
        class: class.to_owned(),
    })
}
