use crate::{config::VERSION, diagnostics, runtime::Interpreter};
use std::io::{self, BufRead, Write};

pub fn banner() -> String {
    format!("Peasant Lisp Version {VERSION}\nPress ctrl+c to exit\n")
}

/// Reads lines from `input` until end of input, printing each result to
/// `output`. Syntax errors go to stderr and the loop carries on.
pub fn run<R, W>(interp: &mut Interpreter, input: R, output: &mut W, prompt: &str) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", banner())?;
    let mut lines = input.lines();
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            writeln!(output)?;
            return Ok(());
        };
        eval_line(interp, "<stdin>", &line?, output)?;
    }
}

/// Evaluates every non-empty line of `source` as its own top-level input.
pub fn run_script<W: Write>(
    interp: &mut Interpreter,
    name: &str,
    source: &str,
    output: &mut W,
) -> io::Result<bool> {
    let mut clean = true;
    for line in source.lines().filter(|line| !line.trim().is_empty()) {
        clean &= eval_line(interp, name, line, output)?;
    }
    Ok(clean)
}

fn eval_line<W: Write>(
    interp: &mut Interpreter,
    name: &str,
    line: &str,
    output: &mut W,
) -> io::Result<bool> {
    match interp.eval_source(line) {
        Ok(value) => {
            writeln!(output, "{value}")?;
            Ok(true)
        }
        Err(err) => {
            diagnostics::emit_syntax_error(name, line, err);
            Ok(false)
        }
    }
}
