//! Tracing setup for the command line.
//!
//! Records go to stderr unless `[logging] stdout = false`, and are appended
//! to `[logging] file` when one is configured. `RUST_LOG` overrides the
//! configured level.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::settings::LoggingSection;

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Targets that get a `file:line` origin instead of their module path.
const LOCAL_TARGETS: [&str; 2] = ["quote_", "cost_estimator"];

static APP_NAME: OnceLock<String> = OnceLock::new();

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Source path below the owning crate's `src/` directory.
fn crate_relative(file: &str) -> &str {
    file.rsplit_once("src/")
        .or_else(|| file.rsplit_once("src\\"))
        .map_or(file, |(_, rest)| rest)
}

/// One line per event: local timestamp, level, origin, then the fields.
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let paint = |code: &'static str| if ansi { code } else { "" };

        let now = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        write!(writer, "{}{now}{} ", paint(DIM), paint(RESET))?;
        write!(
            writer,
            "{}{:>5}{} ",
            paint(level_colour(*meta.level())),
            meta.level(),
            paint(RESET)
        )?;

        let local = LOCAL_TARGETS.iter().any(|t| meta.target().starts_with(t));
        match (meta.file(), meta.line()) {
            (Some(file), Some(line)) if local => write!(
                writer,
                "{}{}:{line}{} ",
                paint(CYAN),
                crate_relative(file),
                paint(RESET)
            )?,
            _ => write!(writer, "{}: ", meta.target())?,
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// `RUST_LOG` wins; otherwise `level`, and `info` if that is not a valid
/// directive.
fn make_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Opens `path` for appending. The directory must already exist.
fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Process name derived from the executable path, or "cost-estimator".
pub fn app_name() -> &'static str {
    APP_NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "cost-estimator".to_string())
    })
}

/// Installs the global subscriber described by the `[logging]` section.
///
/// Only the first call in a process installs anything.
pub fn init_from_settings(settings: &LoggingSection) -> Result<()> {
    let log_file = settings.file.as_deref().map(open_log_file).transpose()?;

    let terminal = settings.stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
    });
    let file = log_file.map(|f| {
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_ansi(false)
            .with_writer(Mutex::new(f))
    });

    let _ = tracing_subscriber::registry()
        .with(make_filter(&settings.level))
        .with(terminal)
        .with(file)
        .try_init();
    Ok(())
}
