use std::path::PathBuf;
use thiserror::Error;

pub const VERSION: &str = "0.1";
pub const DEFAULT_PROMPT: &str = "Peasant> ";
pub const PROMPT_VAR: &str = "PEASANT_PROMPT";
pub const SCRIPT_EXTENSION: &str = "peasant";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Repl,
    Run(PathBuf),
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub prompt: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error("Missing file argument for `run`")]
    MissingFile,
    #[error("Invalid file extension for `{0}`. Only .peasant files are allowed.")]
    BadExtension(String),
    #[error("Unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

impl Config {
    /// Builds the configuration from command line arguments (without the
    /// program name) and a prompt override, usually `PEASANT_PROMPT`.
    pub fn from_args<I>(args: I, prompt: Option<String>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mode = match args.next().as_deref() {
            None => Mode::Repl,
            Some("--version" | "-V") => Mode::Version,
            Some("run") => {
                let file = args.next().ok_or(ConfigError::MissingFile)?;
                let path = PathBuf::from(&file);
                if path.extension().and_then(|ext| ext.to_str()) != Some(SCRIPT_EXTENSION) {
                    return Err(ConfigError::BadExtension(file));
                }
                Mode::Run(path)
            }
            Some(other) => return Err(ConfigError::UnknownCommand(other.to_string())),
        };
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }
        Ok(Self {
            mode,
            prompt: prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_args(std::env::args().skip(1), std::env::var(PROMPT_VAR).ok())
    }
}

pub fn usage() -> &'static str {
    "Usage: peasant [run <file.peasant> | --version]"
}
