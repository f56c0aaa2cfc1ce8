//! Syntax tree handed to the evaluator by the parser.
//!
//! Expressions that may appear on the left of `=` are represented by
//! [`Place`], so an assignment target can only ever be a name, an attribute
//! access or an indexed access. Everything else is rejected when the parser
//! converts an expression into a place ([`Expr::into_place`]).
//!
//! Every node carries its [`Position`]. Statements may additionally carry
//! their original source text, which the evaluator prints in trace frames;
//! when it is absent, the node's `Display` rendering is used instead.

use std::fmt;
use std::sync::Arc;

use crate::{BinaryOp, Position, Precedence, UnaryOp};

mod render;

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }

    /// Move the node to another line and column of the same file.
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.pos = self.pos.at(line, column);
        self
    }

    /// Convert into an assignable place, handing the expression back if it
    /// is not one.
    pub fn into_place(self) -> Result<Place, Expr> {
        match self.kind {
            ExprKind::Place(place) => Ok(place),
            kind => Err(Expr { kind, pos: self.pos }),
        }
    }

    /// Cascade layer of the node, used to parenthesize when rendering.
    pub fn precedence(&self) -> Precedence {
        match &self.kind {
            ExprKind::Assign { .. } | ExprKind::Lambda(_) => Precedence::Assignment,
            ExprKind::Binary { op, .. } => op.precedence(),
            ExprKind::Unary { op, .. } => op.precedence(),
            _ => Precedence::Primary,
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.pos)
    }
}

/// Expression kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// The `нуль` literal.
    Nil,
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(String),
    List(Vec<Expr>),
    Dict(Vec<(Expr, Expr)>),

    /// Name, attribute or index read.
    Place(Place),

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    /// Anonymous function literal.
    Lambda(Arc<FunctionDef>),

    /// `a = x` or `a, b = x, y` or `a, b = f()`.
    Assign {
        targets: Vec<Place>,
        values: Vec<Expr>,
    },
}

/// An assignable location.
#[derive(Clone, PartialEq, Debug)]
pub enum Place {
    Ident(String),
    Attr { base: Box<Expr>, name: String },
    Index { base: Box<Expr>, index: Box<Expr> },
}

impl Place {
    pub fn ident(name: impl Into<String>) -> Self {
        Place::Ident(name.into())
    }

    pub fn attr(base: Expr, name: impl Into<String>) -> Self {
        Place::Attr {
            base: Box::new(base),
            name: name.into(),
        }
    }

    pub fn index(base: Expr, index: Expr) -> Self {
        Place::Index {
            base: Box::new(base),
            index: Box::new(index),
        }
    }
}

/// Loop variable binding; `_` binds nothing.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Binding {
    Name(String),
    Discard,
}

impl Binding {
    pub fn from_name(name: &str) -> Self {
        if name == crate::special::DISCARD {
            Binding::Discard
        } else {
            Binding::Name(name.to_owned())
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Binding::Name(name) => Some(name),
            Binding::Discard => None,
        }
    }
}

/// Statement sequence.
pub type Block = Vec<Stmt>;

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Position,
    /// Source text shown in trace frames.
    pub text: Option<String>,
}

impl Stmt {
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Stmt {
            kind,
            pos,
            text: None,
        }
    }

    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.pos = self.pos.at(line, column);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Text for trace frames: the source text if known, else a rendering.
    pub fn source_text(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self.to_string(),
        }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.pos)
    }
}

/// Statement kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    Expr(Expr),
    Block(Block),
    /// `якщо` with any number of `інакше якщо` branches.
    If {
        branches: Vec<CondBranch>,
        otherwise: Option<Block>,
    },
    While {
        condition: Expr,
        body: Block,
    },
    ForEach {
        index: Binding,
        item: Binding,
        iterable: Expr,
        body: Block,
    },
    FunctionDef(Arc<FunctionDef>),
    ClassDef(Arc<ClassDef>),
    Return(Vec<Expr>),
    Throw(Expr),
    /// Guarded block with its catch clauses.
    Unsafe {
        body: Block,
        catches: Vec<CatchClause>,
    },
    Empty,
}

#[derive(Clone, PartialEq, Debug)]
pub struct CondBranch {
    pub condition: Expr,
    pub body: Block,
}

/// Function, method or lambda definition. Lambdas have an empty name.
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<ParamDecl>,
    pub returns: Vec<ReturnDecl>,
    pub body: Block,
    pub pos: Position,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParamDecl {
    pub name: String,
    /// Name of the accepted class, resolved at definition time.
    pub type_name: String,
    pub nullable: bool,
    pub variadic: bool,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        ParamDecl {
            name: name.into(),
            type_name: type_name.into(),
            nullable: false,
            variadic: false,
        }
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ReturnDecl {
    pub type_name: String,
    pub nullable: bool,
}

impl ReturnDecl {
    pub fn new(type_name: impl Into<String>) -> Self {
        ReturnDecl {
            type_name: type_name.into(),
            nullable: false,
        }
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// `клас Назва(База) { ... }`; `final` classes cannot be derived.
#[derive(Clone, PartialEq, Debug)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<String>,
    pub is_final: bool,
    pub body: Block,
}

/// `перехопити (КласПомилки змінна) { ... }`
#[derive(Clone, PartialEq, Debug)]
pub struct CatchClause {
    pub error_class: Expr,
    pub var: String,
    pub body: Block,
    pub pos: Position,
}

/// One compilation unit.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Program {
    pub stmts: Block,
}

impl Program {
    pub fn new(stmts: Block) -> Self {
        Program { stmts }
    }
}
