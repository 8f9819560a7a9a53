//! Structured logging with page context.
//!
//! Entries are emitted as one JSON object per line on stderr, or as a short
//! human-readable line during development. Tests route entries into a
//! [`LogCapture`] instead.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::rc::Rc;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::PageId;

/// Severity of an entry. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// One emitted log line.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Page load this entry belongs to.
    pub page_id: String,
    /// Emitting component, e.g. `cart-store`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Page path, e.g. `keranjang.html`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// The entry as a single JSON object.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// `[LEVEL] component: message (Nus) | k=v ...`
    pub fn to_human(&self) -> String {
        let mut line = format!("[{}] ", self.level);
        if let Some(component) = &self.component {
            let _ = write!(line, "{}: ", component);
        }
        line.push_str(&self.message);
        if let Some(us) = self.elapsed_us {
            let _ = write!(line, " ({}us)", us);
        }
        if !self.fields.is_empty() {
            let pairs: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            let _ = write!(line, " | {}", pairs.join(" "));
        }
        line
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Line format for stderr output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Human,
}

/// In-memory collector of log entries, shared between logger clones.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Captured entries at exactly `level`.
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        self.entries.borrow_mut().push(entry);
    }
}

#[derive(Debug, Clone, Default)]
enum Sink {
    #[default]
    Stderr,
    Capture(LogCapture),
}

/// Logger bound to one page load.
///
/// Clones share the page id and start time; `with_component` gives each
/// subsystem its own tag.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    page_id: PageId,
    component: Option<String>,
    page: Option<String>,
    started: Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: Sink,
}

impl StructuredLogger {
    /// Logger at `Info` level writing JSON to stderr.
    pub fn new(page_id: PageId) -> Self {
        Self {
            page_id,
            component: None,
            page: None,
            started: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: Sink::Stderr,
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Drop entries below `level`.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Send entries to `capture` instead of stderr.
    pub fn with_capture(mut self, capture: LogCapture) -> Self {
        self.sink = Sink::Capture(capture);
        self
    }

    pub fn page_id(&self) -> &PageId {
        &self.page_id
    }

    pub fn elapsed_us(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX)
    }

    /// Start an entry at `level`.
    pub fn entry(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
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

    fn write(&self, level: LogLevel, message: String, fields: BTreeMap<String, Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message,
            page_id: self.page_id.to_string(),
            component: self.component.clone(),
            page: self.page.clone(),
            fields,
            elapsed_us: Some(self.elapsed_us()),
        };

        match &self.sink {
            Sink::Stderr => match self.format {
                LogFormat::Json => eprintln!("{}", entry.to_json()),
                LogFormat::Human => eprintln!("{}", entry.to_human()),
            },
            Sink::Capture(capture) => capture.push(entry),
        }
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new(PageId::generate())
    }
}

/// An entry being assembled; nothing is written until [`LogBuilder::emit`].
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, Value>,
}

impl LogBuilder<'_> {
    /// Attach a field. Strings, integers, booleans and JSON values all work.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn emit(self) {
        self.logger.write(self.level, self.message, self.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn captured() -> (StructuredLogger, LogCapture) {
        let capture = LogCapture::new();
        let logger = StructuredLogger::new(PageId::new("page_test"))
            .with_component("cart-store")
            .with_capture(capture.clone());
        (logger, capture)
    }

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry {
            level,
            message: message.to_string(),
            page_id: "p".to_string(),
            component: Some("cart-store".to_string()),
            page: None,
            fields: BTreeMap::new(),
            elapsed_us: None,
        }
    }

    #[test]
    fn test_min_level_filters() {
        let (logger, capture) = captured();
        logger.debug_builder("hidden").emit();
        logger.info_builder("shown").emit();
        logger.error_builder("also shown").emit();

        let entries = capture.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "shown");
        assert_eq!(entries[1].level, LogLevel::Error);
    }

    #[test]
    fn test_builder_fields() {
        let (logger, capture) = captured();
        logger
            .warn_builder("Failed to parse cart from storage")
            .field("key", "benihcandi_cart_v1")
            .field("bytes", 9)
            .field("recovered", true)
            .field("doc", json!({"items": []}))
            .emit();

        let warns = capture.at_level(LogLevel::Warn);
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].field("key"), Some(&json!("benihcandi_cart_v1")));
        assert_eq!(warns[0].field("bytes"), Some(&json!(9)));
        assert_eq!(warns[0].field("doc"), Some(&json!({"items": []})));
        assert_eq!(warns[0].page_id, "page_test");
    }

    #[test]
    fn test_json_format_flattens_fields() {
        let mut e = entry(LogLevel::Info, "cart saved");
        e.fields.insert("count".to_string(), json!(3));

        let parsed: Value = serde_json::from_str(&e.to_json()).unwrap();
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["count"], 3);
        assert!(parsed.get("page").is_none());
    }

    #[test]
    fn test_human_format() {
        let mut e = entry(LogLevel::Warn, "corrupt");
        e.elapsed_us = Some(12);
        assert_eq!(e.to_human(), "[WARN] cart-store: corrupt (12us)");

        e.fields.insert("b".to_string(), json!(2));
        e.fields.insert("a".to_string(), json!("x"));
        assert_eq!(
            e.to_human(),
            r#"[WARN] cart-store: corrupt (12us) | a="x" b=2"#
        );
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
