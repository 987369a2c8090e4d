//! Purpose: `jbdecoder` CLI entry point.
//! Role: Binary crate root; resolves input, decodes Base64 leaves, emits JSON on stdout.
//! Invariants: stdout carries only the decoded document (or usage/completions on request).
//! Invariants: Errors go to stderr: human text on a terminal, one JSON line otherwise.
//! Invariants: Process exit code is derived from `api::to_exit_code`; help exits 0.
//! Invariants: Empty or absent input prints usage instead of failing.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Write};

use clap::{CommandFactory, Parser, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod color_json;

use color_json::pretty_json;
use jbdecoder::api::{
    Error, ErrorKind, decode, parse_document, render_compact, resolve_input, to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                return Ok(RunOutcome::ok());
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `jbdecoder --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    execute(cli).map_err(|err| (err, color_mode))
}

fn execute(cli: Cli) -> Result<RunOutcome, Error> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::aot::generate(shell, &mut cmd, "jbdecoder", &mut io::stdout());
        return Ok(RunOutcome::ok());
    }

    let stdin = io::stdin();
    let stdin_is_terminal = stdin.is_terminal();
    let bytes = match resolve_input(&cli.inputs, stdin.lock(), stdin_is_terminal) {
        Ok(bytes) => bytes,
        Err(err) if err.wants_usage() => {
            tracing::debug!(reason = %err, "showing usage");
            emit_usage()?;
            return Ok(RunOutcome::ok());
        }
        Err(err) => return Err(err.into()),
    };

    let document = parse_document(&bytes)?;
    let decoded = decode(&document);
    emit_document(&decoded, cli.pretty, cli.color)?;
    Ok(RunOutcome::ok())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "jbdecoder",
    version,
    about = "JSON Base64 Decoder",
    override_usage = "jbdecoder [OPTIONS] [INPUT]",
    help_template = r#"{about-with-newline}
{before-help}USAGE:
  {usage}

ARGUMENTS:
{positionals}

OPTIONS:
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Recursively decode Base64 encoded strings in JSON.

String fields holding valid Base64 are decoded. Decoded text that is itself
JSON is parsed and decoded again, so nested layers unwrap in one pass.
Numbers, booleans, null, and non-Base64 strings are left unchanged; so is
Base64 whose bytes are not UTF-8 text.
"#,
    after_help = r#"INPUT METHODS:
  $ echo '{"data": "SGVsbG8="}' | jbdecoder        # stdin (pipe)
  $ jbdecoder < input.json                          # stdin (redirect)
  $ jbdecoder input.json                            # file argument
  $ jbdecoder '{"message": "SGVsbG8gV29ybGQ="}'     # inline JSON (starts with { or [)

EXAMPLES:
  $ jbdecoder '{"name": "Sm9obg==", "age": 30}'
  {"name":"John","age":30}
  $ jbdecoder '{"user": {"token": "dG9rZW4="}, "items": ["aXRlbTE="]}'
  {"user":{"token":"token"},"items":["item1"]}

EXIT CODES:
  0 success (or usage shown)   2 usage error   3 malformed JSON   4 input unreadable

OUTPUT:
  The decoded JSON is written to stdout in compact form (use --pretty to indent).
  Set RUST_LOG=debug to trace decoding on stderr."#
)]
struct Cli {
    #[arg(
        value_name = "INPUT",
        help = "Inline JSON, a file path, or - for stdin (default: stdin)",
        value_hint = ValueHint::AnyPath
    )]
    inputs: Vec<String>,
    #[arg(long, help = "Indent the decoded JSON")]
    pretty: bool,
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and --pretty output: auto|always|never"
    )]
    color: ColorMode,
    #[arg(
        long,
        value_name = "SHELL",
        value_enum,
        help = "Print a shell completion script and exit"
    )]
    completions: Option<Shell>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn emit_usage() -> Result<(), Error> {
    Cli::command().print_help().map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write help")
            .with_source(err)
    })
}

fn emit_document(value: &Value, pretty: bool, color_mode: ColorMode) -> Result<(), Error> {
    let text = if pretty {
        pretty_json(value, color_mode.use_color(io::stdout().is_terminal()))
    } else {
        render_compact(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")
        .and_then(|()| stdout.flush())
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write output")
                .with_source(err)
        })
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Parse => "error parsing JSON input".to_string(),
        ErrorKind::Io => "error reading input".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    )];

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
