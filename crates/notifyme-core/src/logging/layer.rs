//! Tracing layers that write events to JSONL files and the console,
//! redacting credentials in both.

use std::fmt::{self, Write as FmtWrite};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use super::entry::JsonLogEntry;
use super::writer::InstanceLogWriter;

pub const REDACTED: &str = "[REDACTED]";

/// Whether a field with this name may carry a credential.
pub fn is_sensitive_field(name: &str) -> bool {
    let name = name.to_ascii_lowercase().replace('-', "_");
    matches!(
        name.as_str(),
        "api_key" | "apikey" | "x_api_key" | "key" | "secret" | "secret_string" | "password" | "token"
    ) || name.ends_with("_key")
        || name.ends_with("_secret")
        || name.ends_with("_token")
        || name.ends_with("_password")
}

/// A tracing Layer that appends events to this instance's JSONL file.
pub struct JsonlLayer {
    writer: Arc<InstanceLogWriter>,
}

impl JsonlLayer {
    pub fn new(logs_dir: impl AsRef<Path>, instance: impl Into<String>) -> std::io::Result<Self> {
        let writer = InstanceLogWriter::new(logs_dir, instance)?;
        Ok(Self {
            writer: Arc::new(writer),
        })
    }

    pub fn log_path(&self) -> &Path {
        self.writer.path()
    }

    pub fn instance(&self) -> &str {
        self.writer.instance()
    }
}

impl<S> Layer<S> for JsonlLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = metadata.level().as_str().to_lowercase();

        let mut visitor = JsonVisitor::new();
        event.record(&mut visitor);

        let message = visitor.message.unwrap_or_default();
        let mut entry = JsonLogEntry::new(&level, self.writer.instance(), metadata.target(), message);

        if !visitor.fields.is_empty() {
            entry = entry.with_fields(serde_json::Value::Object(visitor.fields));
        }

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                entry = entry.with_span(spans.join(" > "));
            }
        }

        // Logging must never take the app down.
        let _ = self.writer.write(&entry);
    }
}

struct JsonVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl JsonVisitor {
    fn new() -> Self {
        Self {
            message: None,
            fields: serde_json::Map::new(),
        }
    }

    fn insert(&mut self, field: &Field, value: serde_json::Value) {
        let name = field.name();
        let value = if is_sensitive_field(name) {
            serde_json::Value::String(REDACTED.to_string())
        } else {
            value
        };
        self.fields.insert(name.to_string(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);

        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.insert(field, serde_json::Value::String(buf));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.insert(field, serde_json::Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, serde_json::Value::Number(value.into()));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, serde_json::Value::Number(value.into()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, serde_json::Value::Bool(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.insert(field, serde_json::Value::Number(n));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, serde_json::Value::String(value.to_string()));
    }
}

fn write_console_field(writer: &mut Writer<'_>, field: &Field, value: &dyn fmt::Debug) -> fmt::Result {
    match field.name() {
        "message" => write!(writer, "{:?}", value),
        name if is_sensitive_field(name) => write!(writer, "{}={}", name, REDACTED),
        name => write!(writer, "{}={:?}", name, value),
    }
}

/// Human-readable console layer with the same field redaction as [`JsonlLayer`].
pub fn console_layer<S, W>(make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .fmt_fields(format::debug_fn(write_console_field).delimited(" "))
        .with_writer(make_writer)
}

/// Installs the global subscriber: env filter, console output, JSONL file.
pub struct LoggingBuilder {
    instance: String,
    logs_dir: Option<PathBuf>,
    console_output: bool,
    env_filter: String,
}

impl LoggingBuilder {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            logs_dir: None,
            console_output: true,
            env_filter: "info".to_string(),
        }
    }

    /// Also write JSONL files under `logs_dir`.
    pub fn with_logs_dir(mut self, logs_dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = Some(logs_dir.into());
        self
    }

    /// Disable console output (only write to JSONL).
    pub fn no_console(mut self) -> Self {
        self.console_output = false;
        self
    }

    /// Default filter when `RUST_LOG` is unset (e.g., "notifyme_core=debug").
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = filter.into();
        self
    }

    /// Map a `-v` count to a filter: warn, info, debug, trace.
    pub fn with_verbosity(self, verbosity: u8) -> Self {
        let filter = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        self.with_filter(filter)
    }

    pub fn build_layer(&self) -> std::io::Result<Option<JsonlLayer>> {
        self.logs_dir
            .as_ref()
            .map(|dir| JsonlLayer::new(dir, &self.instance))
            .transpose()
    }

    /// Install as the global default. Returns the JSONL file path, if any.
    pub fn init(self) -> std::io::Result<Option<PathBuf>> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.env_filter));

        let jsonl = self.build_layer()?;
        let path = jsonl.as_ref().map(|layer| layer.log_path().to_path_buf());

        let console = self
            .console_output
            .then(|| console_layer(std::io::stderr));

        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(jsonl)
            .try_init()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::AlreadyExists, e))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sensitive_field_names() {
        assert!(is_sensitive_field("api_key"));
        assert!(is_sensitive_field("x-api-key"));
        assert!(is_sensitive_field("NEXT_PUBLIC_APPSYNC_API_KEY"));
        assert!(is_sensitive_field("session_token"));
        assert!(!is_sensitive_field("secret_id"));
        assert!(!is_sensitive_field("api_url"));
        assert!(!is_sensitive_field("email"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_layer_redacts() {
        let captured = Captured::default();
        let make_writer = {
            let captured = captured.clone();
            move || captured.clone()
        };

        let subscriber = tracing_subscriber::registry().with(console_layer(make_writer));
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("bootstrap", session_token = "tok-123");
            let _guard = span.enter();
            tracing::info!(api_url = "https://a/graphql", api_key = "da2-topsecret", "Credentials resolved");
        });

        let output = String::from_utf8(captured.0.lock().clone()).unwrap();
        assert!(output.contains("Credentials resolved"));
        assert!(output.contains("https://a/graphql"));
        assert!(output.contains(REDACTED));
        assert!(!output.contains("da2-topsecret"));
        assert!(!output.contains("tok-123"));
    }

    #[test]
    fn test_jsonl_layer_captures_and_redacts() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path(), "test").unwrap();
        let log_path = layer.log_path().to_path_buf();

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("bootstrap");
            let _guard = span.enter();
            tracing::info!(api_url = "https://a/graphql", api_key = "da2-topsecret", "Credentials resolved");
            tracing::warn!(attempts = 1u64, "Duplicate check failed");
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<_> = content.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Credentials resolved"));
        assert!(lines[0].contains("https://a/graphql"));
        assert!(lines[0].contains(REDACTED));
        assert!(!content.contains("da2-topsecret"));
        assert!(lines[0].contains("\"span\":\"bootstrap\""));
        assert!(lines[1].contains("\"level\":\"warn\""));
        assert!(lines[1].contains("\"attempts\":1"));
    }

    #[test]
    fn test_builder_without_logs_dir_has_no_layer() {
        let builder = LoggingBuilder::new("cli").with_verbosity(2);
        assert!(builder.build_layer().unwrap().is_none());
        assert_eq!(builder.env_filter, "debug");
    }
}
