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

/// Default filter when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "info";

/// Stderr: clock time only.
const STDERR_TIMESTAMP: &str = "%H:%M:%S%.3f";
/// Log file: full local date and UTC offset.
const FILE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.3f%:z";

/// `<timestamp> <LEVEL> <module>: <message> <fields>`
struct EventFormat {
    timestamp: &'static str,
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "32",
        Level::DEBUG => "34",
        Level::TRACE => "35",
    }
}

impl<S, N> FormatEvent<S, N> for EventFormat
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
        let stamp = Local::now().format(self.timestamp);
        let module = meta.module_path().unwrap_or_else(|| meta.target());

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m \x1b[{}m{:<5}\x1b[0m \x1b[2m{module}:\x1b[0m ",
                level_color(meta.level()),
                meta.level()
            )?;
        } else {
            write!(writer, "{stamp} {:<5} {module}: ", meta.level())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builds the global filter.
///
/// An explicit `level` wins over `RUST_LOG`, which wins over
/// [`DEFAULT_FILTER`]. Accepts a bare level ("debug") or any full
/// `EnvFilter` directive.
pub fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{directive}'")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped, so the
///   report on stdout stays clean.
/// - File: appended to `log_file` when given, never colored.
pub fn init_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(EventFormat {
            timestamp: STDERR_TIMESTAMP,
        })
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    let file_layer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(EventFormat {
                        timestamp: FILE_TIMESTAMP,
                    })
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn plain_event_names_level_module_and_fields() {
        let capture = Capture::default();
        let sink = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(EventFormat {
                timestamp: FILE_TIMESTAMP,
            })
            .with_writer(move || sink.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(gti = 5, "assessment complete");
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.ends_with(
            " INFO  tax_assistant::logging::tests: assessment complete gti=5\n"
        ));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn explicit_level_is_accepted() {
        assert!(make_filter(Some("debug")).is_ok());
        assert!(make_filter(Some("info,tax_advisor=trace")).is_ok());
    }

    #[test]
    fn malformed_level_is_rejected() {
        let err = make_filter(Some("tax_core=loudest")).unwrap_err();

        assert!(err.to_string().contains("invalid log level"));
    }
}
