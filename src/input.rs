//! Purpose: Resolve where the JSON document comes from and read its bytes.
//! Exports: `InputSource`, `InputError`, `select_source`, `read_source`, `resolve_input`.
//! Role: Input side of the CLI shell; kept in the library so bindings and tests share it.
//! Invariants: No positional argument means stdin; a terminal stdin means "no input".
//! Invariants: A single argument starting with `{` or `[` (after trimming) is inline JSON.
//! Invariants: Any other single argument is a file path; `-` is an explicit stdin request.
//! Invariants: `NoInput` and `EmptyInput` ask for usage text and are not failures.
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::core::error::{Error, ErrorKind};

const STDIN_ARG: &str = "-";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputSource {
    /// Standard input. `explicit` is set when the caller passed `-`, in which
    /// case a terminal stdin is read instead of treated as "no input".
    Stdin { explicit: bool },
    Inline(String),
    File(PathBuf),
}

#[derive(Debug)]
pub enum InputError {
    NoInput,
    EmptyInput,
    TooManyArguments { count: usize },
    Unreadable {
        path: Option<PathBuf>,
        source: io::Error,
    },
}

impl InputError {
    /// True for the conditions that should print usage and exit cleanly.
    pub fn wants_usage(&self) -> bool {
        matches!(self, InputError::NoInput | InputError::EmptyInput)
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NoInput => write!(f, "no input provided"),
            InputError::EmptyInput => write!(f, "empty input provided"),
            InputError::TooManyArguments { count } => {
                write!(f, "too many arguments provided (expected at most 1, got {count})")
            }
            InputError::Unreadable {
                path: Some(path), ..
            } => write!(f, "failed to open file '{}'", path.display()),
            InputError::Unreadable { path: None, .. } => write!(f, "failed to read stdin"),
        }
    }
}

impl StdError for InputError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            InputError::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        let message = err.to_string();
        match err {
            InputError::NoInput | InputError::EmptyInput => Error::new(ErrorKind::Usage)
                .with_message(message)
                .with_hint("Pass JSON as an argument, a file path, or pipe it to stdin."),
            InputError::TooManyArguments { .. } => Error::new(ErrorKind::Usage)
                .with_message(message)
                .with_hint("Try `jbdecoder --help`."),
            InputError::Unreadable { path, source } => {
                let err = Error::new(ErrorKind::Io)
                    .with_message(message)
                    .with_source(source);
                match path {
                    Some(path) => err
                        .with_path(path)
                        .with_hint("Check that the file exists and is readable."),
                    None => err,
                }
            }
        }
    }
}

/// Picks the input source from the positional arguments.
pub fn select_source(args: &[String]) -> Result<InputSource, InputError> {
    match args {
        [] => Ok(InputSource::Stdin { explicit: false }),
        [arg] => {
            let arg = arg.trim();
            if arg == STDIN_ARG {
                Ok(InputSource::Stdin { explicit: true })
            } else if arg.is_empty() {
                Err(InputError::EmptyInput)
            } else if arg.starts_with('{') || arg.starts_with('[') {
                Ok(InputSource::Inline(arg.to_string()))
            } else {
                Ok(InputSource::File(PathBuf::from(arg)))
            }
        }
        _ => Err(InputError::TooManyArguments { count: args.len() }),
    }
}

/// Reads the bytes for `source`. `stdin` is only touched for stdin sources.
pub fn read_source<R: Read>(
    source: &InputSource,
    mut stdin: R,
    stdin_is_terminal: bool,
) -> Result<Vec<u8>, InputError> {
    match source {
        InputSource::Stdin { explicit } => {
            if !explicit && stdin_is_terminal {
                return Err(InputError::NoInput);
            }
            let mut data = Vec::new();
            stdin
                .read_to_end(&mut data)
                .map_err(|source| InputError::Unreadable { path: None, source })?;
            if data.trim_ascii().is_empty() {
                return Err(InputError::EmptyInput);
            }
            Ok(data)
        }
        InputSource::Inline(text) => Ok(text.clone().into_bytes()),
        InputSource::File(path) => fs::read(path).map_err(|source| InputError::Unreadable {
            path: Some(path.clone()),
            source,
        }),
    }
}

/// Selects the source for `args` and reads it.
pub fn resolve_input<R: Read>(
    args: &[String],
    stdin: R,
    stdin_is_terminal: bool,
) -> Result<Vec<u8>, InputError> {
    let source = select_source(args)?;
    tracing::debug!(?source, "resolved input source");
    read_source(&source, stdin, stdin_is_terminal)
}
