use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RuntimeError {
    #[error("Unbound symbol `{name}`")]
    UnboundSymbol { name: String },
    #[error("S-expression does not start with a function, found {found}")]
    NotAFunction { found: &'static str },
    #[error("Function `{name}` expected {expected} arguments but received {received}")]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        received: usize,
    },
    #[error("Function `{name}` requires at least one argument")]
    MissingArguments { name: &'static str },
    #[error("Function `{name}` expected {expected} but received {found}")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Function `{name}` was passed an empty list {{}}")]
    EmptyList { name: &'static str },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Domain error: {message}")]
    Domain { message: String },
    #[error("Invalid number `{literal}`")]
    InvalidNumber { literal: String },
    #[error("Unrecognised syntax node `{tag}`")]
    MalformedTree { tag: String },
}
