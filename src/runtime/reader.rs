use crate::parser::{SyntaxNode, REGEX_TAG, ROOT_TAG};
use crate::runtime::{
    error::{RuntimeError, RuntimeResult},
    value::Value,
};

/// Translates a syntax tree into an unevaluated value tree. Failures come back
/// as an error value; the first failing node wins.
pub fn read(node: &SyntaxNode) -> Value {
    try_read(node).unwrap_or_else(Value::from)
}

pub fn try_read(node: &SyntaxNode) -> RuntimeResult<Value> {
    let tag = node.tag.as_str();
    if tag.contains("number") {
        return read_number(&node.contents);
    }
    if tag.contains("symbol") {
        return Ok(Value::Symbol(node.contents.clone()));
    }
    if tag == ROOT_TAG || tag.contains("sexpr") {
        read_children(&node.children).map(Value::SExpr)
    } else if tag.contains("qexpr") {
        read_children(&node.children).map(Value::QExpr)
    } else {
        Err(RuntimeError::MalformedTree {
            tag: node.tag.clone(),
        })
    }
}

fn read_number(literal: &str) -> RuntimeResult<Value> {
    literal
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Value::Number)
        .ok_or_else(|| RuntimeError::InvalidNumber {
            literal: literal.to_string(),
        })
}

fn read_children(children: &[SyntaxNode]) -> RuntimeResult<Vec<Value>> {
    children
        .iter()
        .filter(|child| !is_punctuation(child))
        .map(try_read)
        .collect()
}

fn is_punctuation(node: &SyntaxNode) -> bool {
    matches!(node.contents.as_str(), "(" | ")" | "{" | "}") || node.tag == REGEX_TAG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, SyntaxNode, NUMBER_TAG, SEXPR_TAG};
    use pretty_assertions::assert_eq;

    fn read_str(source: &str) -> Value {
        read(&parse(source).expect("parse"))
    }

    #[test]
    fn root_becomes_an_sexpr() {
        assert_eq!(
            read_str("+ 1 x"),
            Value::SExpr(vec![
                Value::symbol("+"),
                Value::Number(1.0),
                Value::symbol("x"),
            ])
        );
    }

    #[test]
    fn nested_lists_are_read_in_order() {
        assert_eq!(
            read_str("(join {1} {})"),
            Value::SExpr(vec![Value::SExpr(vec![
                Value::symbol("join"),
                Value::QExpr(vec![Value::Number(1.0)]),
                Value::QExpr(vec![]),
            ])])
        );
    }

    #[test]
    fn malformed_number_is_an_error() {
        let node = SyntaxNode::leaf(NUMBER_TAG, "1.2.3", 0..5);
        assert_eq!(
            read(&node),
            Value::Error(RuntimeError::InvalidNumber {
                literal: "1.2.3".into()
            })
        );
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let node = SyntaxNode::leaf("string", "\"hi\"", 0..4);
        assert_eq!(
            read(&node),
            Value::Error(RuntimeError::MalformedTree {
                tag: "string".into()
            })
        );
    }

    #[test]
    fn first_child_error_replaces_the_whole_tree() {
        let node = SyntaxNode::branch(
            SEXPR_TAG,
            vec![
                SyntaxNode::leaf(NUMBER_TAG, "1", 0..1),
                SyntaxNode::leaf(NUMBER_TAG, "nan?", 2..6),
                SyntaxNode::leaf("comment", ";", 7..8),
            ],
            0..8,
        );
        assert_eq!(
            read(&node),
            Value::Error(RuntimeError::InvalidNumber {
                literal: "nan?".into()
            })
        );
    }
}
