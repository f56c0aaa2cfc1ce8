//! Binary and Unary Operators
//!
//! Operators are not evaluated by the core directly. Each one names a
//! reserved attribute that the left operand's class must provide; the
//! evaluator looks that attribute up and calls it like any other method.

/// Reserved attribute names that are not tied to an operator token.
pub mod special {
    /// Construction protocol entry point.
    pub const CONSTRUCTOR: &str = "__конструктор__";
    /// Makes instances callable.
    pub const CALL: &str = "__виклик__";
    /// Length of a sequence.
    pub const LENGTH: &str = "__довжина__";
    /// User-facing string conversion.
    pub const TO_STRING: &str = "__рядок__";
    /// Debug-style representation.
    pub const REPRESENT: &str = "__представлення__";
    /// Boolean coercion.
    pub const TO_BOOL: &str = "__логічне__";
    /// Indexed read on user-defined sequences.
    pub const GET_ITEM: &str = "__отримати_елемент__";
    /// Indexed write on user-defined sequences.
    pub const SET_ITEM: &str = "__встановити_елемент__";
    /// Discard placeholder in loop bindings.
    pub const DISCARD: &str = "_";
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Bitwise
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    /// All binary operators, lowest precedence first.
    pub const ALL: [BinaryOp; 19] = [
        Self::Or,
        Self::And,
        Self::Eq,
        Self::NotEq,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
        Self::BitOr,
        Self::BitXor,
        Self::BitAnd,
        Self::Shl,
        Self::Shr,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Pow,
    ];

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or => "або",
            Self::And => "і",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
        }
    }

    /// Returns the reserved attribute name the operator dispatches to.
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Or => "__або__",
            Self::And => "__і__",
            Self::Eq => "__рівне__",
            Self::NotEq => "__не_рівне__",
            Self::Lt => "__менше__",
            Self::LtEq => "__менше_або_рівне__",
            Self::Gt => "__більше__",
            Self::GtEq => "__більше_або_рівне__",
            Self::BitOr => "__побітове_або__",
            Self::BitXor => "__побітове_виключне_або__",
            Self::BitAnd => "__побітове_і__",
            Self::Shl => "__зсув_ліворуч__",
            Self::Shr => "__зсув_праворуч__",
            Self::Add => "__додати__",
            Self::Sub => "__відняти__",
            Self::Mul => "__помножити__",
            Self::Div => "__поділити__",
            Self::Mod => "__залишок__",
            Self::Pow => "__степінь__",
        }
    }

    /// Returns the cascade layer this operator belongs to.
    pub const fn precedence(self) -> Precedence {
        match self {
            Self::Or => Precedence::Or,
            Self::And => Precedence::And,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => {
                Precedence::Comparison
            }
            Self::BitOr => Precedence::BitOr,
            Self::BitXor => Precedence::BitXor,
            Self::BitAnd => Precedence::BitAnd,
            Self::Shl | Self::Shr => Precedence::Shift,
            Self::Add | Self::Sub => Precedence::Additive,
            Self::Mul | Self::Div | Self::Mod => Precedence::Multiplicative,
            Self::Pow => Precedence::Exponent,
        }
    }

    /// Exponent is the only right-associative operator.
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Logical negation.
    Not,
    Plus,
    Minus,
    BitNot,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "не ",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::BitNot => "~",
        }
    }

    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Not => "__не__",
            Self::Plus => "__унарний_плюс__",
            Self::Minus => "__унарний_мінус__",
            Self::BitNot => "__побітова_інверсія__",
        }
    }

    pub const fn precedence(self) -> Precedence {
        match self {
            Self::Not => Precedence::Not,
            Self::Plus | Self::Minus | Self::BitNot => Precedence::Unary,
        }
    }
}

/// Layers of the expression cascade, lowest binding first.
///
/// The parser must build trees whose nesting follows this order; the
/// evaluator relies on it only for rendering parentheses.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Precedence {
    Assignment,
    Or,
    And,
    Not,
    Comparison,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Exponent,
    Primary,
}
