use peasant::{
    config::{self, Config, Mode},
    diagnostics, init_tracing, repl,
    runtime::Interpreter,
};
use std::{fs, io, process::ExitCode};

fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{}", config::usage());
            return ExitCode::FAILURE;
        }
    };

    let mut interp = Interpreter::new();
    let mut stdout = io::stdout().lock();
    let result = match &config.mode {
        Mode::Version => {
            println!("Peasant Lisp Version {}", config::VERSION);
            Ok(true)
        }
        Mode::Repl => repl::run(&mut interp, io::stdin().lock(), &mut stdout, &config.prompt)
            .map(|()| true),
        Mode::Run(path) => match fs::read_to_string(path) {
            Ok(source) => {
                let name = path.display().to_string();
                repl::run_script(&mut interp, &name, &source, &mut stdout)
            }
            Err(err) => {
                diagnostics::report_io_error(path, &err);
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
