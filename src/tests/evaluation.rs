use crate::parser::parse;
use crate::runtime::{
    environment::Environment, error::RuntimeError, interpreter, reader::read, Interpreter, Value,
};
use pretty_assertions::assert_eq;

fn eval_str(source: &str) -> Value {
    Interpreter::new()
        .eval_source(source)
        .expect("source should parse")
}

fn printed(source: &str) -> String {
    eval_str(source).to_string()
}

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn numeric_literals_evaluate_to_themselves() {
    for literal in ["0", "42", "-7", "3.25", "10.", "-0.5", "123456789"] {
        let expected: f64 = literal.parse().expect("valid literal");
        assert_eq!(eval_str(literal), num(expected), "literal {literal}");
    }
}

#[test]
fn quoted_lists_are_inert() {
    assert_eq!(printed("{1 2 3}"), "{1.000 2.000 3.000}");
    assert_eq!(printed("{+ 1 (undefined)}"), "{+ 1.000 (undefined)}");
    assert_eq!(eval_str("eval {+ 1 2}"), num(3.0));
    assert_eq!(eval_str("eval (list + 4 5)"), num(9.0));
}

#[test]
fn list_builtins() {
    assert_eq!(printed("head {1 2 3}"), "{1.000}");
    assert_eq!(printed("tail {1 2 3}"), "{2.000 3.000}");
    assert_eq!(printed("join {1 2} {3 4}"), "{1.000 2.000 3.000 4.000}");
    assert_eq!(printed("list 1 (+ 1 1) {3}"), "{1.000 2.000 {3.000}}");
    assert_eq!(printed("eval (head {(+ 1 2) (+ 10 20)})"), "3.000");
    assert_eq!(printed("eval (tail {tail tail {5 6 7}})"), "{6.000 7.000}");
}

#[test]
fn list_builtin_errors() {
    assert_eq!(
        eval_str("head {}"),
        Value::Error(RuntimeError::EmptyList { name: "head" })
    );
    assert_eq!(
        eval_str("head 1 2"),
        Value::Error(RuntimeError::ArityMismatch {
            name: "head",
            expected: 1,
            received: 2
        })
    );
    assert_eq!(
        eval_str("head 5"),
        Value::Error(RuntimeError::TypeMismatch {
            name: "head",
            expected: "Q-Expression",
            found: "Number"
        })
    );
}

#[test]
fn arithmetic() {
    assert_eq!(eval_str("(+ 1 2 3)"), num(6.0));
    assert_eq!(eval_str("(- 5)"), num(-5.0));
    assert_eq!(eval_str("(/ 1 0)"), Value::Error(RuntimeError::DivisionByZero));
    assert_eq!(eval_str("* 2 (- 10 4) (/ 9 3)"), num(36.0));
    assert_eq!(eval_str("% 10 4"), num(2.0));
    assert_eq!(eval_str("^ 2 10"), num(1024.0));
    assert_eq!(eval_str("min 3 1 2"), num(1.0));
    assert_eq!(eval_str("max 3 1 2"), num(3.0));
}

#[test]
fn arithmetic_on_non_numbers_is_a_type_error() {
    assert_eq!(
        eval_str("+ 1 {2}"),
        Value::Error(RuntimeError::TypeMismatch {
            name: "+",
            expected: "Number",
            found: "Q-Expression"
        })
    );
}

#[test]
fn unbound_symbols_and_non_functions() {
    assert_eq!(
        eval_str("(+ 1 x)"),
        Value::Error(RuntimeError::UnboundSymbol { name: "x".into() })
    );
    assert_eq!(
        eval_str("(1 2 3)"),
        Value::Error(RuntimeError::NotAFunction { found: "Number" })
    );
    assert_eq!(printed("{1 2} 3"), "Error: S-expression does not start with a function, found Q-Expression");
}

#[test]
fn degenerate_expressions() {
    assert_eq!(printed(""), "()");
    assert_eq!(printed("()"), "()");
    assert_eq!(printed("(((5)))"), "5.000");
    assert_eq!(printed("+"), "<function>");
}

#[test]
fn error_short_circuit_ignores_position() {
    let failing = "(/ 1 0)";
    for before in 0..3 {
        for after in 0..3 {
            let mut parts = vec!["+"];
            parts.extend(std::iter::repeat("1").take(before));
            parts.push(failing);
            parts.extend(std::iter::repeat("(* 2 2)").take(after));
            let source = parts.join(" ");
            assert_eq!(
                eval_str(&source),
                Value::Error(RuntimeError::DivisionByZero),
                "source {source}"
            );
        }
    }
}

#[test]
fn printed_literals_read_back_equal() {
    let originals = [
        "{1 2 {3 {}} x}",
        "{head {-1.5 0.25}}",
        "{}",
    ];
    for source in originals {
        let first = eval_str(source);
        let reprinted = first.to_string();
        assert_eq!(eval_str(&reprinted), first, "round trip of {source}");
    }
}

#[test]
fn environment_put_and_get_copy() {
    let mut env = Environment::new();
    let value = read(&parse("{1 {2}}").expect("parse"));
    env.put("x", &value);
    let size = env.len();

    assert_eq!(env.get("x"), value);
    env.put("x", &num(0.0));
    assert_eq!(env.len(), size);
    assert_eq!(interpreter::eval(&mut env, Value::symbol("x")), num(0.0));
}

#[test]
fn definitions_are_visible_to_later_inputs() {
    let mut interp = Interpreter::new();
    interp.define("xs", &eval_str("{1 2 3}"));
    assert_eq!(interp.eval_source("eval (head xs)").expect("parse"), num(1.0));
    assert_eq!(
        interp.eval_source("join xs (tail xs)").expect("parse").to_string(),
        "{1.000 2.000 3.000 2.000 3.000}"
    );
    assert_eq!(interp.env().get("xs").to_string(), "{1.000 2.000 3.000}");
}

#[test]
fn an_error_does_not_poison_later_inputs() {
    let mut interp = Interpreter::new();
    assert!(interp.eval_source("/ 1 0").expect("parse").is_error());
    assert_eq!(interp.eval_source("+ 1 1").expect("parse"), num(2.0));
}
