// src/logger.rs - Process-wide leveled diagnostic logger
//
// The logger writes human-readable lines to a diagnostic stream (stderr by
// default) and doubles as the `tracing` layer for the whole crate, so
// `tracing::info!` and friends are filtered by the same level ceiling.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Verbosity levels. Lower values are more severe; a message is written when
/// its level is at or below the logger's ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warning = 1,
    Info = 2,
    Verbose = 3,
    Debug = 4,
}

impl Level {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Error,
            1 => Level::Warning,
            2 => Level::Info,
            3 => Level::Verbose,
            _ => Level::Debug,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Level::Error => "[ERR]",
            Level::Warning => "[WARN]",
            Level::Info => "[INFO]",
            Level::Verbose => "[VER]",
            Level::Debug => "[DBG]",
        }
    }
}

impl From<&tracing::Level> for Level {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Verbose,
            tracing::Level::TRACE => Level::Debug,
        }
    }
}

type Sink = Box<dyn Write + Send>;

struct Inner {
    max_level: AtomicU8,
    writer: Mutex<Sink>,
}

/// Leveled logger that is safe to share between threads.
///
/// Cloning is cheap and every clone writes to the same sink with the same
/// level ceiling.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    pub fn new<W>(max_level: Level, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                max_level: AtomicU8::new(max_level as u8),
                writer: Mutex::new(Box::new(writer)),
            }),
        }
    }

    pub fn set_max_level(&self, level: Level) {
        self.inner.max_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn max_level(&self) -> Level {
        Level::from_u8(self.inner.max_level.load(Ordering::Relaxed))
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level()
    }

    /// Write one message at `level`. The whole line is written under the lock.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }

        let line = format!("{} {}\n", level.prefix(), message);
        let mut writer = self.inner.writer.lock();
        // Diagnostics must never fail the caller.
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn verbose(&self, message: impl fmt::Display) {
        self.log(Level::Verbose, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("max_level", &self.max_level())
            .finish_non_exhaustive()
    }
}

static GLOBAL: Lazy<Logger> = Lazy::new(|| Logger::new(Level::Info, io::stderr()));
static INSTALLED: OnceCell<()> = OnceCell::new();

/// The process-wide logger. Lives until process exit.
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Set the global level and install the global logger as the tracing subscriber.
///
/// Safe to call more than once; later calls only change the level.
/// Events from this crate only; dependencies such as hyper stay quiet.
pub fn crate_filter() -> Targets {
    Targets::new().with_target(env!("CARGO_CRATE_NAME"), tracing::Level::TRACE)
}

pub fn init(level: Level) {
    GLOBAL.set_max_level(level);
    INSTALLED.get_or_init(|| {
        let subscriber = tracing_subscriber::registry().with(global().clone().with_filter(crate_filter()));
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            GLOBAL.warn("a tracing subscriber was already installed");
        }
    });
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S: Subscriber> Layer<S> for Logger {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = Level::from(event.metadata().level());
        if !self.enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.log(level, format_args!("{}{}", visitor.message, visitor.fields));
    }
}
