//! Structured logging with session context.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;

/// Severity of an entry. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered line's worth of data.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Browser session the entry belongs to.
    pub session_id: String,
    /// Page the session is running on (e.g. "cart", "shop").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Entry-specific fields, flattened into the JSON object.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LogEntry {
    /// One JSON object. Falls back to the bare message if encoding fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// `[LEVEL] message @page | key=value ...`
    pub fn to_human(&self) -> String {
        let mut line = format!("[{}] {}", self.level, self.message);
        if let Some(page) = &self.page {
            line.push_str(" @");
            line.push_str(page);
        }
        for (index, (key, value)) in self.fields.iter().enumerate() {
            line.push_str(if index == 0 { " | " } else { " " });
            line.push_str(&format!("{}={}", key, value));
        }
        line
    }
}

/// How entries are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Human,
}

/// Destination for rendered log lines.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    /// stderr natively, the browser console on wasm32.
    #[default]
    Console,
    /// Shared in-memory buffer, used by tests to inspect output.
    Buffer(Arc<Mutex<Vec<String>>>),
    /// Drop everything.
    Discard,
}

impl LogSink {
    /// Create a buffer sink and return a handle to its contents.
    pub fn buffer() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (LogSink::Buffer(Arc::clone(&lines)), lines)
    }

    fn write(&self, level: LogLevel, line: String) {
        match self {
            LogSink::Console => write_console(level, &line),
            LogSink::Buffer(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
            LogSink::Discard => {}
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: LogLevel, line: &str) {
    eprintln!("{}", line);
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Error => web_sys::console::error_1(&value),
        LogLevel::Warn => web_sys::console::warn_1(&value),
        _ => web_sys::console::log_1(&value),
    }
}

/// Structured logger with session context.
///
/// Cloning is cheap; clones share the sink.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    session_id: String,
    page: Option<String>,
    min_level: LogLevel,
    format: LogFormat,
    sink: LogSink,
}

impl StructuredLogger {
    /// Logger for a browser session: info and above, JSON, to the console.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            page: None,
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: LogSink::Console,
        }
    }

    /// Logger that drops every entry.
    pub fn disabled() -> Self {
        Self::new("disabled").with_sink(LogSink::Discard)
    }

    /// Tag every entry with the page it came from.
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    /// Check if entries at `level` would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            session_id: self.session_id.clone(),
            page: self.page.clone(),
            fields,
        };

        let line = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };
        self.sink.write(level, line);
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// An entry under construction. Nothing is written until [`emit`](Self::emit).
#[must_use = "call emit() to write the entry"]
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn field(self, key: &str, value: impl Into<String>) -> Self {
        self.with_value(key, serde_json::Value::String(value.into()))
    }

    pub fn field_u64(self, key: &str, value: u64) -> Self {
        self.with_value(key, serde_json::Value::from(value))
    }

    /// Non-finite values are recorded as `null`.
    pub fn field_f64(self, key: &str, value: f64) -> Self {
        self.with_value(key, serde_json::Value::from(value))
    }

    fn with_value(mut self, key: &str, value: serde_json::Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start an entry at `level`.
    pub fn entry(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, level, message)
    }

    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Debug, message)
    }

    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Info, message)
    }

    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Warn, message)
    }

    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Error, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffered(level: LogLevel) -> (StructuredLogger, Arc<Mutex<Vec<String>>>) {
        let (sink, lines) = LogSink::buffer();
        let logger = StructuredLogger::new("sess-1")
            .with_page("cart")
            .with_min_level(level)
            .with_sink(sink);
        (logger, lines)
    }

    #[test]
    fn test_json_entry_carries_context_and_fields() {
        let (logger, lines) = buffered(LogLevel::Debug);
        logger
            .info_builder("item added")
            .field("item_id", "boots-01")
            .field_u64("quantity", 2)
            .emit();

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["level"], "info");
        assert_eq!(value["session_id"], "sess-1");
        assert_eq!(value["page"], "cart");
        assert_eq!(value["item_id"], "boots-01");
        assert_eq!(value["quantity"], 2);
    }

    #[test]
    fn test_below_min_level_is_dropped() {
        let (logger, lines) = buffered(LogLevel::Warn);
        logger.debug("noise");
        logger.info("still noise");
        logger.warn("kept");

        assert_eq!(lines.lock().unwrap().len(), 1);
        assert!(!logger.enabled(LogLevel::Info));
    }

    #[test]
    fn test_human_format() {
        let (sink, lines) = LogSink::buffer();
        let logger = StructuredLogger::new("s")
            .with_page("shop")
            .with_format(LogFormat::Human)
            .with_sink(sink);
        logger.warn_builder("corrupt cart").field("key", "proWorkCart").emit();

        let lines = lines.lock().unwrap();
        assert_eq!(lines[0], r#"[WARN] corrupt cart @shop | key="proWorkCart""#);
    }

    #[test]
    fn test_disabled_logger_emits_nothing() {
        let logger = StructuredLogger::disabled();
        logger.error("ignored");
        assert_eq!(logger.session_id(), "disabled");
    }
}
