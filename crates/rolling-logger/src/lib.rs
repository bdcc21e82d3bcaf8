//! Rolling Logger
//!
//! `tracing-subscriber` fmt layer for browser applications. Keeps the most
//! recent lines in a circular buffer so they can be shown or attached to a
//! bug report, and forwards every line to the browser console (stderr on
//! native targets). `log` records are bridged in on init.

use std::collections::VecDeque;
use std::io;
use std::sync::{Mutex, OnceLock};

use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::Layer;

pub use tracing_subscriber::filter::LevelFilter;

/// Fixed-capacity line buffer, oldest lines are dropped first
pub struct LogBuffer {
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static BUFFER: OnceLock<LogBuffer> = OnceLock::new();

/// Install the rolling layer as the global subscriber and route `log`
/// records through it.
///
/// Fails if another subscriber or logger was installed first.
pub fn init_logger(capacity: usize, level: LevelFilter) -> Result<(), TryInitError> {
    let buffer = BUFFER.get_or_init(|| LogBuffer::new(capacity));
    tracing_subscriber::registry()
        .with(level)
        .with(rolling_layer(buffer))
        .try_init()
}

/// Lines currently held by the global buffer (empty before `init_logger`)
pub fn recent_lines() -> Vec<String> {
    BUFFER.get().map(LogBuffer::lines).unwrap_or_default()
}

fn rolling_layer<S>(buffer: &'static LogBuffer) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(BufferSink { buffer })
        .with_timer(WallClock)
        .with_ansi(false)
}

/// Time of day, `SystemTime` is not available in the browser
struct WallClock;

impl FormatTime for WallClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        w.write_str(&clock_label(now_millis()))
    }
}

fn clock_label(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| "--:--:--.---".to_string())
}

#[derive(Clone, Copy)]
struct BufferSink {
    buffer: &'static LogBuffer,
}

impl<'a> MakeWriter<'a> for BufferSink {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter::new(self.buffer, Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        LineWriter::new(self.buffer, *meta.level())
    }
}

/// Collects one formatted event; the line is stored when the writer drops
struct LineWriter {
    buffer: &'static LogBuffer,
    level: Level,
    bytes: Vec<u8>,
}

impl LineWriter {
    fn new(buffer: &'static LogBuffer, level: Level) -> Self {
        Self { buffer, level, bytes: Vec::new() }
    }
}

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.bytes).trim_end().to_string();
        if line.is_empty() {
            return;
        }
        emit(self.level, &line);
        self.buffer.push(line);
    }
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    match level {
        Level::ERROR => web_sys::console::error_1(&line.into()),
        Level::WARN => web_sys::console::warn_1(&line.into()),
        Level::INFO => web_sys::console::info_1(&line.into()),
        _ => web_sys::console::log_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}
