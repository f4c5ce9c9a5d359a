//! Tracing setup. The parser emits spans per entry point and a `debug` event
//! per recorded parse error; nothing is printed unless a subscriber is
//! installed with one of the functions below.

use std::fmt::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, Layer, Registry};

pub type LevelHandle = reload::Handle<LevelFilter, Registry>;

/// Installs a global subscriber writing to stderr at `WARN`. The returned
/// handle changes the level later, see [`set_level`].
pub fn tracing_init() -> LevelHandle {
    let (filter, handle) = reload::Layer::new(LevelFilter::WARN);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if let Err(err) = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init() {
        // someone else got there first, their subscriber stays
        eprintln!("csscanon: tracing already initialized: {err}");
    }
    return handle;
}

pub fn set_level(handle: &LevelHandle, level: Level) -> Result<(), reload::Error> {
    return handle.modify(|filter| *filter = LevelFilter::from_level(level));
}

/// Logs everything to the test harness' captured output. Safe to call from
/// every test.
pub fn tracing_init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Layer keeping every event as a `file:line { field = value; }` line and
/// every new span as `name { field = value; }`, for callers that want the
/// parse log next to the error list.
#[derive(Debug, Clone, Default)]
pub struct CaptureLayer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureLayer {
    pub fn new() -> Self {
        return Self::default();
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }

    pub fn lines(&self) -> Vec<String> {
        return match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let mut line = format!("{} {{", attrs.metadata().name());
        attrs.record(&mut CaptureVisit { line: &mut line });
        line.push_str(" }");
        self.push(line);
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut line = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => format!("{file}:{line} {{"),
            (Some(file), None) => format!("{file} {{"),
            (None, _) => "{".to_owned(),
        };
        event.record(&mut CaptureVisit { line: &mut line });
        line.push_str(" }");
        self.push(line);
    }
}

struct CaptureVisit<'a> {
    line: &'a mut String,
}

impl Visit for CaptureVisit<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        let _ = write!(self.line, " {} = {};", field.name(), value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let _ = write!(self.line, " {} = {:?};", field.name(), value);
    }
}
