//! Diagnostics for the calculator.
//!
//! Everything goes to stderr so stdout carries only the rendered screen or
//! the one-shot command output. A log file can be attached after start-up
//! (from config or `--log-file`) and the filter can be changed from the
//! interactive prompt with `log <level>`.

use std::{
    fmt::Display,
    fs::File,
    io::{self, IsTerminal, LineWriter, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// Used when neither `RUST_LOG` nor a configured level is usable.
const FALLBACK_FILTER: &str = "warn,feed_core=info,feed_http=info,feed_ui=info";

// ─── line format ─────────────────────────────────────────────────────────────

/// `12:04:31.207 WARN feed_http: service unreachable endpoint="/species"`
///
/// Time of day only: a calculator session never spans a date of interest, and
/// the log file is opened in append mode per run.
struct CalculatorLine;

impl CalculatorLine {
    fn level_style(level: &Level) -> &'static str {
        match *level {
            Level::ERROR => "1;31",
            Level::WARN => "1;33",
            Level::INFO => "32",
            Level::DEBUG => "34",
            Level::TRACE => "2",
        }
    }

    fn part(
        writer: &mut Writer<'_>,
        style: &str,
        text: impl Display,
    ) -> std::fmt::Result {
        if writer.has_ansi_escapes() {
            write!(writer, "\x1b[{style}m{text}\x1b[0m ")
        } else {
            write!(writer, "{text} ")
        }
    }
}

impl<S, N> FormatEvent<S, N> for CalculatorLine
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

        Self::part(&mut writer, "2", Local::now().format("%H:%M:%S%.3f"))?;
        Self::part(
            &mut writer,
            Self::level_style(meta.level()),
            format_args!("{:<5}", meta.level()),
        )?;
        // Crate and module, e.g. `feed_ui::sessions::order:`
        Self::part(&mut writer, "36", format_args!("{}:", meta.target()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// ─── optional log file ───────────────────────────────────────────────────────

/// Destination of the file layer. Empty until a file is attached; records
/// written meanwhile are dropped.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<LineWriter<File>>>>);

impl LogFile {
    fn lock(&self) -> MutexGuard<'_, Option<LineWriter<File>>> {
        // A panic while logging must not silence every later record.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn attach(
        &self,
        file: File,
    ) {
        *self.lock() = Some(LineWriter::new(file));
    }
}

struct LogFileGuard<'a>(MutexGuard<'a, Option<LineWriter<File>>>);

impl Write for LogFileGuard<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard(self.lock())
    }
}

// ─── runtime handles ─────────────────────────────────────────────────────────

struct Handles {
    filter: reload::Handle<EnvFilter, Registry>,
    file: LogFile,
}

static HANDLES: OnceLock<Handles> = OnceLock::new();

fn handles() -> Result<&'static Handles> {
    HANDLES
        .get()
        .ok_or_else(|| anyhow!("logging is not initialised"))
}

/// `RUST_LOG` wins, then the configured level, then [`FALLBACK_FILTER`].
fn initial_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| configured.and_then(|directive| EnvFilter::try_new(directive).ok()))
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_FILTER))
}

/// Replaces the active filter. Accepts a bare level (`debug`) or a full
/// directive (`warn,feed_http=trace`).
pub fn set_log_level(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log level '{directive}'"))?;
    handles()?
        .filter
        .reload(filter)
        .context("cannot apply log level")
}

/// Appends every later record to `path`, replacing any file attached before.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    handles()?.file.attach(file);
    Ok(())
}

/// Installs the global subscriber. Later calls leave the first one in place.
pub fn init_logging(configured_level: Option<&str>) {
    let file = LogFile::default();
    let (filter, filter_handle) = reload::Layer::new(initial_filter(configured_level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(CalculatorLine)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(CalculatorLine)
                .with_ansi(false)
                .with_writer(file.clone()),
        )
        .try_init()
        .is_ok();

    if installed {
        let _ = HANDLES.set(Handles {
            filter: filter_handle,
            file,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_applies_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(initial_filter(Some("debug")).to_string(), "debug");
            assert_eq!(
                initial_filter(Some("feed_ui=loud")).to_string(),
                EnvFilter::new(FALLBACK_FILTER).to_string()
            );
        }
    }

    #[test]
    fn detached_log_file_swallows_records() {
        let file = LogFile::default();

        assert_eq!(file.make_writer().write(b"dropped").unwrap(), 7);
        assert!(file.make_writer().flush().is_ok());
    }

    #[test]
    fn invalid_directive_is_rejected_before_reload() {
        let err = set_log_level("feed_ui=loud").unwrap_err();

        assert!(err.to_string().contains("feed_ui=loud"));
    }
}
