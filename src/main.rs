//! Purpose: `roster` CLI entry point.
//! Role: Binary crate root; parses args, opens the store, runs one command.
//! Invariants: Errors are emitted on stderr (human on a TTY, JSON otherwise).
//! Invariants: Backing-file failures that leave the command usable are notices, not errors.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;
mod menu;
mod record_json;
mod store_paths;

use record_json::{listing_json, record_json};
use roster::api::{Error, ErrorKind, Record, SaveStatus, Store, to_exit_code};
use roster::notice::{Notice, notice_json, persistence_notice};
use store_paths::resolve_store_path;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
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

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `roster --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    let store_path = resolve_store_path(cli.file.as_deref(), cli.dir.as_deref());

    command_dispatch::dispatch_command(cli.command, &store_path, color_mode)
        .map_err(add_lookup_hint)
        .map_err(add_corrupt_hint)
        .map_err(add_io_hint)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Keep a small student roster in a local file",
    long_about = None,
    after_help = r#"EXAMPLES
  $ roster add --id 1 --name Ann --age 20 --course CS
  $ roster list
  $ roster show 1
  $ roster remove 1
  $ roster menu                       # interactive prompts

NOTES
  - Default file: ~/.roster/students.json (override with --dir or --file)"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        help = "Directory holding students.json (default: ~/.roster)",
        value_hint = ValueHint::DirPath
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        help = "Roster file path (overrides --dir)",
        value_hint = ValueHint::FilePath
    )]
    file: Option<PathBuf>,
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
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

#[derive(Subcommand)]
enum Command {
    #[command(about = "Add a student (ids must be unique)")]
    Add {
        #[arg(long, allow_negative_numbers = true, help = "Student id")]
        id: i32,
        #[arg(long, help = "Full name")]
        name: String,
        #[arg(long, allow_negative_numbers = true, help = "Age in years")]
        age: i32,
        #[arg(long, help = "Course name")]
        course: String,
        #[arg(long, help = "Emit JSON instead of a message")]
        json: bool,
    },
    #[command(about = "Remove a student by id")]
    Remove {
        #[arg(allow_negative_numbers = true, help = "Student id")]
        id: i32,
        #[arg(long, help = "Emit JSON instead of a message")]
        json: bool,
    },
    #[command(about = "Display all students in the order they were added")]
    List {
        #[arg(long, help = "Emit JSON instead of the listing")]
        json: bool,
    },
    #[command(about = "Display one student by id")]
    Show {
        #[arg(allow_negative_numbers = true, help = "Student id")]
        id: i32,
        #[arg(long, help = "Emit JSON instead of the record")]
        json: bool,
    },
    #[command(about = "Run the interactive numbered menu")]
    Menu,
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
    #[command(about = "Print version")]
    Version,
}

fn open_store(path: &Path, cmd: &str, color_mode: ColorMode) -> Store {
    let opened = Store::open(path);
    if let Some(err) = &opened.warning {
        emit_persistence_notice("load_failed", cmd, path, err, color_mode);
    }
    opened.store
}

fn report_save(status: &SaveStatus, cmd: &str, path: &Path, color_mode: ColorMode) {
    if let Some(err) = status.warning() {
        emit_persistence_notice("save_failed", cmd, path, err, color_mode);
    }
}

fn emit_persistence_notice(kind: &str, cmd: &str, path: &Path, err: &Error, color_mode: ColorMode) {
    let time = notice_time_now().unwrap_or_default();
    let notice = persistence_notice(kind, cmd, &path.display().to_string(), time, err);
    emit_notice(&notice, color_mode);
}

fn notice_time_now() -> Option<String> {
    use time::format_description::well_known::Rfc3339;
    let duration = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let ts = time::OffsetDateTime::from_unix_timestamp_nanos(duration.as_nanos() as i128).ok()?;
    ts.format(&Rfc3339).ok()
}

fn emit_notice(notice: &Notice, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", notice_text(notice, color_mode.use_color(is_tty)));
        return;
    }

    let value = notice_json(notice);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"notice\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn notice_text(notice: &Notice, use_color: bool) -> String {
    let mut text = format!(
        "{} {} (file: {})",
        colorize_label("warning:", use_color, AnsiColor::Yellow),
        notice.message,
        notice.file
    );
    let reason = notice.details.get("cause").or_else(|| notice.details.get("reason"));
    if let Some(reason) = reason.and_then(Value::as_str) {
        text.push_str(&format!(
            "\n{} {reason}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }
    text
}

fn emit_json(value: Value) {
    let json = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn add_lookup_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NotFound if err.id().is_some() => {
            err.with_hint("Check existing ids with `roster list`.")
        }
        ErrorKind::Duplicate => {
            err.with_hint("Ids must be unique. Pick another id or remove the existing student first.")
        }
        _ => err,
    }
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::Permission => err.with_hint(
            "Permission denied. Check file permissions or use --file to a writable location.",
        ),
        ErrorKind::Io => err.with_hint("I/O error. Check the path, filesystem, and disk space."),
        _ => err,
    }
}

fn add_corrupt_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Corrupt || err.hint().is_some() {
        return err;
    }
    err.with_hint("Roster file appears corrupt. Move it aside to start a fresh roster.")
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_LOG=debug and share the output if it persists.",
    )
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

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Duplicate => "duplicate id".to_string(),
        ErrorKind::Empty => "nothing to display".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Corrupt => "corrupt data".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
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
    if let Some(id) = err.id() {
        inner.insert("id".to_string(), json!(id));
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
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

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

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
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
