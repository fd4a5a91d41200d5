use crate::parser::ParseError;
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(peasant::syntax))]
pub struct SyntaxDiagnostic {
    #[source_code]
    src: NamedSource,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl SyntaxDiagnostic {
    pub fn from_error(src: NamedSource, err: ParseError) -> Self {
        Self {
            src,
            span: err.span,
            help: err.help,
            message: err.message,
            label: err.label,
        }
    }
}

pub fn emit_syntax_error(name: &str, source: &str, err: ParseError) {
    let src = NamedSource::new(name, source.to_string());
    let diagnostic = SyntaxDiagnostic::from_error(src, err);
    eprintln!("{:?}", Report::new(diagnostic));
}

pub fn report_io_error(path: &std::path::Path, error: &std::io::Error) {
    eprintln!("Failed to access {}: {}", path.display(), error);
}
