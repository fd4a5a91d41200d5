use crate::parser::{self, ParseError};
use crate::runtime::{
    builtins::Builtin, environment::Environment, error::RuntimeError, reader, value::Value,
};

/// Reduces `value` to its final form. Symbols resolve through `env`,
/// S-expressions are applied, everything else evaluates to itself.
pub fn eval(env: &mut Environment, value: Value) -> Value {
    match value {
        Value::Symbol(name) => env.get(&name),
        Value::SExpr(cells) => eval_expr(env, cells),
        other => other,
    }
}

pub fn eval_expr(env: &mut Environment, cells: Vec<Value>) -> Value {
    let mut cells: Vec<Value> = cells.into_iter().map(|cell| eval(env, cell)).collect();

    if let Some(index) = cells.iter().position(Value::is_error) {
        tracing::trace!(index, "error short-circuits expression");
        return cells.swap_remove(index);
    }

    match cells.len() {
        0 => return Value::SExpr(cells),
        1 => return cells.remove(0),
        _ => {}
    }

    match cells.remove(0) {
        Value::Function(builtin) => builtin.call(env, cells),
        other => Value::Error(RuntimeError::NotAFunction {
            found: other.type_name(),
        }),
    }
}

/// Owns the global environment and drives one top-level input at a time.
pub struct Interpreter {
    env: Environment,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let mut env = Environment::new();
        Builtin::register_all(&mut env);
        Self { env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn define(&mut self, name: &str, value: &Value) {
        self.env.put(name, value);
    }

    pub fn eval(&mut self, value: Value) -> Value {
        eval(&mut self.env, value)
    }

    pub fn eval_source(&mut self, source: &str) -> Result<Value, ParseError> {
        let tree = parser::parse(source)?;
        Ok(self.eval(reader::read(&tree)))
    }
}
