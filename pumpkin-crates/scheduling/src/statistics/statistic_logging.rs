//! Writes statistics as `{prefix} {name}={value}` lines to a configured writer.
//!
//! Nothing is written until [`configure_statistic_logging`] has been called.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;
use std::io::stdout;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

struct StatisticSink {
    /// Printed in front of every statistic line.
    prefix: &'static str,
    /// Printed once after a block of statistics, if present.
    closing_line: Option<&'static str>,
    /// The casing applied to statistic names.
    casing: Option<Case>,
    writer: Box<dyn Write + Send>,
}

impl Debug for StatisticSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticSink")
            .field("prefix", &self.prefix)
            .field("closing_line", &self.closing_line)
            .field("casing", &self.casing)
            .field("writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_SINK: OnceLock<Mutex<StatisticSink>> = OnceLock::new();

/// Configures the logging of the statistics.
///
/// Only the first call has an effect. When no writer is given, statistics go to stdout.
pub fn configure_statistic_logging(
    prefix: &'static str,
    closing_line: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send>>,
) {
    let _ = STATISTIC_SINK.get_or_init(|| {
        Mutex::new(StatisticSink {
            prefix,
            closing_line,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

/// Logs the statistic `name` with value `value`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(sink) = STATISTIC_SINK.get() else {
        return;
    };
    let Ok(mut sink) = sink.lock() else {
        return;
    };

    let name = match sink.casing {
        Some(casing) => name.to_string().to_case(casing),
        None => name.to_string(),
    };
    let prefix = sink.prefix;
    let _ = writeln!(sink.writer, "{prefix} {name}={value}");
}

/// Logs the closing line of a block of statistics, if one was configured.
pub fn log_statistic_postfix() {
    let Some(sink) = STATISTIC_SINK.get() else {
        return;
    };
    let Ok(mut sink) = sink.lock() else {
        return;
    };

    if let Some(closing_line) = sink.closing_line {
        let _ = writeln!(sink.writer, "{closing_line}");
    }
}

/// Returns whether [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    STATISTIC_SINK.get().is_some()
}
