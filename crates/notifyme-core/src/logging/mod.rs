//! Leveled logging with a per-instance JSONL file.
//!
//! ```text
//! logs/
//! └── raw/
//!     ├── 2026-10-19_desktop.jsonl
//!     └── 2026-10-19_cli.jsonl
//! ```
//!
//! Fields that look like credentials (`api_key`, `*_token`, ...) are written
//! as `[REDACTED]` on the console and in the JSONL file; `Credentials`
//! itself redacts its key in `Debug`.
//!
//! ```ignore
//! use notifyme_core::logging::LoggingBuilder;
//!
//! LoggingBuilder::new("cli")
//!     .with_verbosity(1)
//!     .with_logs_dir("./logs")
//!     .init()?;
//! ```
//!
//! ```bash
//! # Every failed submission
//! jq 'select(.level == "warn" or .level == "error")' logs/raw/*.jsonl
//! ```

pub mod entry;
pub mod layer;
pub mod writer;

pub use entry::JsonLogEntry;
pub use layer::{console_layer, is_sensitive_field, JsonlLayer, LoggingBuilder, REDACTED};
pub use writer::{read_all_entries, InstanceLogWriter};
