use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Local-time event formatter: `timestamp LEVEL target: fields`.
struct LocalFmt;

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LocalFmt
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
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}\x1b[0m: ",
                level_colour(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builds the level filter. `RUST_LOG` wins when it holds valid directives;
/// otherwise `level` (a bare level or any `EnvFilter` directive) is used.
pub fn make_filter(level: &str) -> Result<EnvFilter> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    select_filter(from_env.as_deref(), level)
}

fn select_filter(
    rust_log: Option<&str>,
    level: &str,
) -> Result<EnvFilter> {
    if let Some(directives) = rust_log {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return Ok(filter);
        }
    }
    EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: coloured when attached to a terminal, plain when piped, so
///   reports on stdout stay clean.
/// - File: when `file` is given, records are appended to it without colour.
///   The directory must already exist.
pub fn init(
    level: &str,
    file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let file_layer = match file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalFmt)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")?;

    Ok(())
}
