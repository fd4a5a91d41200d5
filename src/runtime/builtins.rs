use crate::runtime::{
    environment::Environment,
    error::{RuntimeError, RuntimeResult},
    interpreter,
    value::Value,
};

/// A primitive operation. Builtins are resolved to a variant once, when they
/// are registered, and dispatched by `match` afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    List,
    Head,
    Tail,
    Join,
    Eval,
    Arithmetic(ArithOp),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Min,
    Max,
}

impl Builtin {
    pub const ALL: [Builtin; 13] = [
        Builtin::List,
        Builtin::Head,
        Builtin::Tail,
        Builtin::Join,
        Builtin::Eval,
        Builtin::Arithmetic(ArithOp::Add),
        Builtin::Arithmetic(ArithOp::Sub),
        Builtin::Arithmetic(ArithOp::Mul),
        Builtin::Arithmetic(ArithOp::Div),
        Builtin::Arithmetic(ArithOp::Rem),
        Builtin::Arithmetic(ArithOp::Pow),
        Builtin::Arithmetic(ArithOp::Min),
        Builtin::Arithmetic(ArithOp::Max),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::List => "list",
            Builtin::Head => "head",
            Builtin::Tail => "tail",
            Builtin::Join => "join",
            Builtin::Eval => "eval",
            Builtin::Arithmetic(op) => op.symbol(),
        }
    }

    pub fn register_all(env: &mut Environment) {
        for builtin in Self::ALL {
            env.put(builtin.name(), &Value::Function(builtin));
        }
    }

    /// Applies the builtin to an owned argument list.
    #[tracing::instrument(level = "debug", skip_all, fields(builtin = self.name(), argc = args.len()))]
    pub fn call(self, env: &mut Environment, args: Vec<Value>) -> Value {
        let result = match self {
            Builtin::List => Ok(Value::QExpr(args)),
            Builtin::Head => builtin_head(args),
            Builtin::Tail => builtin_tail(args),
            Builtin::Join => builtin_join(args),
            Builtin::Eval => builtin_eval(env, args),
            Builtin::Arithmetic(op) => builtin_arithmetic(op, args),
        };
        result.unwrap_or_else(Value::from)
    }
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
            ArithOp::Pow => "^",
            ArithOp::Min => "min",
            ArithOp::Max => "max",
        }
    }

    /// Folds one operand into the accumulator. Results that overflow to an
    /// infinity are rejected so every number stays printable and readable.
    fn apply(self, x: f64, y: f64) -> RuntimeResult<f64> {
        let result = match self {
            ArithOp::Add => x + y,
            ArithOp::Sub => x - y,
            ArithOp::Mul => x * y,
            ArithOp::Div if y == 0.0 => return Err(RuntimeError::DivisionByZero),
            ArithOp::Div => x / y,
            ArithOp::Rem => {
                let (x, y) = (x.trunc() as i64, y.trunc() as i64);
                if y == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                x.wrapping_rem(y) as f64
            }
            ArithOp::Pow => power(x, y)?,
            ArithOp::Min => x.min(y),
            ArithOp::Max => x.max(y),
        };
        if !result.is_finite() {
            return Err(RuntimeError::Domain {
                message: format!("`{}` overflowed the range of numbers", self.symbol()),
            });
        }
        Ok(result)
    }
}

/// Integer power by repeated multiplication. Both operands are truncated;
/// the exponent must be a non-negative integer that fits an `i32`.
fn power(base: f64, exponent: f64) -> RuntimeResult<f64> {
    let exponent = exponent.trunc();
    if exponent < 0.0 {
        return Err(RuntimeError::Domain {
            message: format!("`^` needs a non-negative exponent, got {exponent}"),
        });
    }
    if exponent > f64::from(i32::MAX) {
        return Err(RuntimeError::Domain {
            message: format!("`^` exponent {exponent} is too large"),
        });
    }
    Ok(base.trunc().powi(exponent as i32))
}

fn single_argument(name: &'static str, mut args: Vec<Value>) -> RuntimeResult<Value> {
    if args.len() != 1 {
        return Err(RuntimeError::ArityMismatch {
            name,
            expected: 1,
            received: args.len(),
        });
    }
    Ok(args.remove(0))
}

fn non_empty_list(name: &'static str, value: Value) -> RuntimeResult<Vec<Value>> {
    match value {
        Value::QExpr(cells) if cells.is_empty() => Err(RuntimeError::EmptyList { name }),
        Value::QExpr(cells) => Ok(cells),
        other => Err(RuntimeError::TypeMismatch {
            name,
            expected: "Q-Expression",
            found: other.type_name(),
        }),
    }
}

fn builtin_head(args: Vec<Value>) -> RuntimeResult<Value> {
    let mut cells = non_empty_list("head", single_argument("head", args)?)?;
    cells.truncate(1);
    Ok(Value::QExpr(cells))
}

fn builtin_tail(args: Vec<Value>) -> RuntimeResult<Value> {
    let mut cells = non_empty_list("tail", single_argument("tail", args)?)?;
    cells.remove(0);
    Ok(Value::QExpr(cells))
}

fn builtin_join(args: Vec<Value>) -> RuntimeResult<Value> {
    if args.is_empty() {
        return Err(RuntimeError::MissingArguments { name: "join" });
    }
    let mut joined = Vec::new();
    for arg in args {
        match arg {
            Value::QExpr(cells) => joined.extend(cells),
            other => {
                return Err(RuntimeError::TypeMismatch {
                    name: "join",
                    expected: "Q-Expression",
                    found: other.type_name(),
                })
            }
        }
    }
    Ok(Value::QExpr(joined))
}

fn builtin_eval(env: &mut Environment, args: Vec<Value>) -> RuntimeResult<Value> {
    match single_argument("eval", args)? {
        Value::QExpr(cells) => Ok(interpreter::eval(env, Value::SExpr(cells))),
        other => Err(RuntimeError::TypeMismatch {
            name: "eval",
            expected: "Q-Expression",
            found: other.type_name(),
        }),
    }
}

fn builtin_arithmetic(op: ArithOp, args: Vec<Value>) -> RuntimeResult<Value> {
    let numbers = args
        .into_iter()
        .map(|arg| match arg {
            Value::Number(n) => Ok(n),
            other => Err(RuntimeError::TypeMismatch {
                name: op.symbol(),
                expected: "Number",
                found: other.type_name(),
            }),
        })
        .collect::<RuntimeResult<Vec<f64>>>()?;

    let (first, rest) = numbers
        .split_first()
        .ok_or(RuntimeError::MissingArguments { name: op.symbol() })?;

    if op == ArithOp::Sub && rest.is_empty() {
        return Ok(Value::Number(-first));
    }

    rest.iter()
        .try_fold(*first, |acc, &y| op.apply(acc, y))
        .map(Value::Number)
}
