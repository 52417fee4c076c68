//! Kernel logging backend.
//!
//! Implements [`log::Log`] on top of a single sink function registered at
//! boot. Library crates log through the `log` macros and never see the
//! hardware; the kernel decides where the bytes go (the debug UART).
//!
//! Record format: `<colour>[LEVEL]<reset> target: message`.
#![cfg_attr(not(test), no_std)]

use core::fmt::{self, Write};

use log::{Level, LevelFilter, Log, Metadata, Record};
use spin::Once;

/// Where formatted output goes. Must not log.
pub type Sink = fn(fmt::Arguments<'_>);

static SINK: Once<Sink> = Once::new();
static LOGGER: KernelLogger = KernelLogger;

const RESET: &str = "\x1b[0m";

fn label(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRACE",
        Level::Debug => "DEBUG",
        Level::Info => " INFO",
        Level::Warn => " WARN",
        Level::Error => "ERROR",
    }
}

fn color(level: Level) -> &'static str {
    match level {
        Level::Trace => "\x1b[90m", // Gray
        Level::Debug => "\x1b[36m", // Cyan
        Level::Info => "\x1b[32m",  // Green
        Level::Warn => "\x1b[33m",  // Yellow
        Level::Error => "\x1b[31m", // Red
    }
}

/// Write one record, newline included.
pub fn format_record(
    out: &mut impl Write,
    level: Level,
    target: &str,
    args: &fmt::Arguments<'_>,
) -> fmt::Result {
    write!(out, "{}[{}]{} ", color(level), label(level), RESET)?;
    if !target.is_empty() {
        write!(out, "{}: ", target)?;
    }
    writeln!(out, "{}", args)
}

struct KernelLogger;

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(sink) = SINK.get() else {
            return;
        };
        sink(format_args!(
            "{}",
            Formatted {
                level: record.level(),
                target: record.target(),
                args: record.args(),
            }
        ));
    }

    fn flush(&self) {}
}

struct Formatted<'a> {
    level: Level,
    target: &'a str,
    args: &'a fmt::Arguments<'a>,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_record(f, self.level, self.target, self.args)
    }
}

/// Install the logger. Only the first call has any effect.
pub fn init(sink: Sink, level: LevelFilter) {
    SINK.call_once(|| sink);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Print to the sink without formatting a record. Dropped before `init`.
pub fn print(args: fmt::Arguments<'_>) {
    if let Some(sink) = SINK.get() {
        sink(args);
    }
}

/// Print without newline
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::print(format_args!($($arg)*))
    };
}

/// Print with newline
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => {{
        $crate::print(format_args!($($arg)*));
        $crate::print(format_args!("\n"));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use spin::Mutex;

    static CAPTURED: Mutex<String> = Mutex::new(String::new());

    fn capture(args: fmt::Arguments<'_>) {
        CAPTURED.lock().write_fmt(args).unwrap();
    }

    #[test]
    fn record_layout() {
        let mut out = String::new();
        format_record(&mut out, Level::Warn, "khal::serial", &format_args!("x={}", 3)).unwrap();
        assert_eq!(out, "\x1b[33m[ WARN]\x1b[0m khal::serial: x=3\n");
    }

    #[test]
    fn empty_target_is_omitted() {
        let mut out = String::new();
        format_record(&mut out, Level::Trace, "", &format_args!("hi")).unwrap();
        assert_eq!(out, "\x1b[90m[TRACE]\x1b[0m hi\n");
    }

    #[test]
    fn init_routes_records_and_filters_by_level() {
        init(capture, LevelFilter::Info);

        log::info!(target: "boot", "hello {}", 7);
        log::debug!("hidden");
        println!("raw {}", 1);

        let captured = CAPTURED.lock().clone();
        assert!(captured.contains("[ INFO]\x1b[0m boot: hello 7\n"));
        assert!(!captured.contains("hidden"));
        assert!(captured.ends_with("raw 1\n"));
    }
}
