use crate::runtime::{builtins::Builtin, error::RuntimeError};
use std::fmt;

/// A runtime datum. Expression variants own their children outright, so a
/// value tree is always single-owner and acyclic.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Error(RuntimeError),
    Symbol(String),
    /// Evaluable expression: `(f a b)`.
    SExpr(Vec<Value>),
    /// Quoted expression: `{a b}`. Inert data until passed to `eval`.
    QExpr(Vec<Value>),
    Function(Builtin),
}

impl Value {
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn sexpr() -> Self {
        Value::SExpr(Vec::new())
    }

    pub fn qexpr() -> Self {
        Value::QExpr(Vec::new())
    }

    /// Appends `cell` to an expression. Anything else is returned untouched.
    pub fn push(mut self, cell: Value) -> Self {
        if let Value::SExpr(cells) | Value::QExpr(cells) = &mut self {
            cells.push(cell);
        }
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Error(_) => "Error",
            Value::Symbol(_) => "Symbol",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
            Value::Function(_) => "Function",
        }
    }
}

impl From<RuntimeError> for Value {
    fn from(err: RuntimeError) -> Self {
        Value::Error(err)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n:.3}"),
            Value::Error(err) => write!(f, "Error: {err}"),
            Value::Symbol(name) => write!(f, "{name}"),
            Value::SExpr(cells) => write_cells(f, cells, '(', ')'),
            Value::QExpr(cells) => write_cells(f, cells, '{', '}'),
            Value::Function(_) => write!(f, "<function>"),
        }
    }
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            write!(f, " ")?;
        }
        write!(f, "{cell}")?;
    }
    write!(f, "{close}")
}
