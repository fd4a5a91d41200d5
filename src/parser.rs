use miette::SourceSpan;
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit0, digit1, multispace0, satisfy},
    combinator::{cut, not, opt, peek, recognize},
    multi::many0,
    sequence::{pair, preceded, tuple},
    IResult, Parser as NomParser,
};
use std::{cell::Cell, ops::Range};

pub const ROOT_TAG: &str = ">";
pub const NUMBER_TAG: &str = "expr|number|regex";
pub const SYMBOL_TAG: &str = "expr|symbol|regex";
pub const SEXPR_TAG: &str = "expr|sexpr|>";
pub const QEXPR_TAG: &str = "expr|qexpr|>";
pub const CHAR_TAG: &str = "char";
pub const REGEX_TAG: &str = "regex";

/// Deepest list nesting the grammar accepts. Reading and evaluation recurse
/// once per level, so this also bounds their stack use.
pub const MAX_DEPTH: usize = 128;

/// A node of the concrete syntax tree handed to the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub tag: String,
    pub contents: String,
    pub children: Vec<SyntaxNode>,
    pub span: Range<usize>,
}

impl SyntaxNode {
    pub fn leaf(tag: &str, contents: &str, span: Range<usize>) -> Self {
        Self {
            tag: tag.to_string(),
            contents: contents.to_string(),
            children: Vec::new(),
            span,
        }
    }

    pub fn branch(tag: &str, children: Vec<SyntaxNode>, span: Range<usize>) -> Self {
        Self {
            tag: tag.to_string(),
            contents: String::new(),
            children,
            span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub label: String,
    pub span: SourceSpan,
    pub help: Option<String>,
}

pub fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/\\=<>!&%^".contains(c)
}

pub fn parse(source: &str) -> Result<SyntaxNode, ParseError> {
    let grammar = Grammar {
        source,
        depth: Cell::new(0),
    };
    match grammar.program(source) {
        Ok((_, root)) => Ok(root),
        Err(nom::Err::Failure(err)) if err.code == nom::error::ErrorKind::TooLarge => {
            Err(grammar.too_deep_at(err.input))
        }
        Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
            Err(grammar.error_at(err.input))
        }
        Err(nom::Err::Incomplete(_)) => Err(grammar.error_at("")),
    }
}

struct Grammar<'src> {
    source: &'src str,
    depth: Cell<usize>,
}

impl<'src> Grammar<'src> {
    fn offset(&self, rest: &str) -> usize {
        self.source.len() - rest.len()
    }

    fn span(&self, before: &str, after: &str) -> Range<usize> {
        self.offset(before)..self.offset(after)
    }

    fn program(&self, input: &'src str) -> IResult<&'src str, SyntaxNode> {
        let start = self.leaf(REGEX_TAG, "", input, input);
        let (rest, mut children) = many0(|i| self.padded_expr(i)).parse(input)?;
        let (rest, _) = multispace0(rest)?;
        if !rest.is_empty() {
            return Err(nom::Err::Failure(nom::error::Error::new(
                rest,
                nom::error::ErrorKind::Eof,
            )));
        }
        children.insert(0, start);
        children.push(self.leaf(REGEX_TAG, "", rest, rest));
        Ok((rest, SyntaxNode::branch(ROOT_TAG, children, self.span(input, rest))))
    }

    fn padded_expr(&self, input: &'src str) -> IResult<&'src str, SyntaxNode> {
        preceded(multispace0, |i| self.expr(i)).parse(input)
    }

    fn expr(&self, input: &'src str) -> IResult<&'src str, SyntaxNode> {
        alt((
            |i| self.number(i),
            |i| self.symbol(i),
            |i| self.list(i, '(', ')', SEXPR_TAG),
            |i| self.list(i, '{', '}', QEXPR_TAG),
        ))
        .parse(input)
    }

    fn number(&self, input: &'src str) -> IResult<&'src str, SyntaxNode> {
        let (rest, text) = recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit0)),
        )))
        .parse(input)?;
        let (rest, _) = not(peek(satisfy(is_symbol_char)))(rest)?;
        Ok((rest, self.leaf(NUMBER_TAG, text, input, rest)))
    }

    fn symbol(&self, input: &'src str) -> IResult<&'src str, SyntaxNode> {
        let (rest, text) = take_while1(is_symbol_char)(input)?;
        Ok((rest, self.leaf(SYMBOL_TAG, text, input, rest)))
    }

    fn list(
        &self,
        input: &'src str,
        open: char,
        close: char,
        tag: &str,
    ) -> IResult<&'src str, SyntaxNode> {
        let (after_open, _) = char(open)(input)?;
        let depth = self.depth.get() + 1;
        if depth > MAX_DEPTH {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::TooLarge,
            )));
        }
        self.depth.set(depth);
        let (before_close, mut children) =
            cut(many0(|i| self.padded_expr(i))).parse(after_open)?;
        let (before_close, _) = multispace0(before_close)?;
        let (rest, _) = cut(char(close))(before_close)?;
        self.depth.set(depth - 1);

        children.insert(0, self.delimiter(open, input, after_open));
        children.push(self.delimiter(close, before_close, rest));
        Ok((rest, SyntaxNode::branch(tag, children, self.span(input, rest))))
    }

    fn delimiter(&self, c: char, before: &str, after: &str) -> SyntaxNode {
        let mut buf = [0u8; 4];
        self.leaf(CHAR_TAG, c.encode_utf8(&mut buf), before, after)
    }

    fn leaf(&self, tag: &str, contents: &str, before: &str, after: &str) -> SyntaxNode {
        SyntaxNode::leaf(tag, contents, self.span(before, after))
    }

    fn too_deep_at(&self, rest: &str) -> ParseError {
        ParseError {
            message: "Expression nested too deeply".into(),
            label: format!("more than {MAX_DEPTH} levels of nesting start here"),
            span: (self.offset(rest), 1).into(),
            help: Some("Flatten the expression or split it across several inputs".into()),
        }
    }

    fn error_at(&self, rest: &str) -> ParseError {
        let offset = self.offset(rest);
        match rest.chars().next() {
            None => ParseError {
                message: "Unexpected end of input".into(),
                label: "expected a closing delimiter here".into(),
                span: (offset, 0).into(),
                help: Some("Every `(` needs a matching `)` and every `{` a matching `}`".into()),
            },
            Some(c @ (')' | '}')) => ParseError {
                message: format!("Unexpected `{c}`"),
                label: "no matching opening delimiter".into(),
                span: (offset, c.len_utf8()).into(),
                help: None,
            },
            Some(c) => ParseError {
                message: format!("Unexpected character `{c}`"),
                label: "not part of any number, symbol or expression".into(),
                span: (offset, c.len_utf8()).into(),
                help: Some("Expressions look like `(+ 1 2)` and lists like `{1 2 3}`".into()),
            },
        }
    }
}
