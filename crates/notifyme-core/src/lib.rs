//! NotifyMe Core Library
//!
//! Launch-signup workflow for a "coming soon" page backed by an AppSync
//! GraphQL API.
//!
//! ## Overview
//!
//! A visitor submits name, surname and email. The workflow checks whether
//! the email is already registered (`GetNotifymedb`) and, if not, stores a
//! record keyed by the email (`CreateNotifymedb`). The outcome is shown as a
//! status line that clears itself a few seconds later.
//!
//! The API endpoint and key are either configured directly or fetched once
//! at start-up from AWS Secrets Manager.
//!
//! ## Quick Start
//!
//! ```ignore
//! use notifyme_core::{FormField, NotifyConfig, SignupSession, SignupWorkflow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NotifyConfig::from_env()?;
//!     let session = SignupSession::new(SignupWorkflow::connect(&config).await);
//!
//!     session.set_field(FormField::Name, "Ada");
//!     session.set_field(FormField::Surname, "Lovelace");
//!     session.set_field(FormField::Email, "ada@example.com");
//!
//!     let outcome = session.submit().await?;
//!     println!("{}", outcome.status_message());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod credentials;
pub mod error;
pub mod graphql;
pub mod logging;
pub mod session;
pub mod types;
pub mod workflow;

// Re-exports
pub use backend::{AppSyncBackend, SignupBackend};
pub use config::{ApiSource, DuplicateCheckPolicy, NotifyConfig, SecretStoreConfig};
pub use credentials::{AwsSecretStore, Credentials, SecretStore};
pub use error::{SignupError, SignupResult};
pub use graphql::AppSyncClient;
pub use session::{FormState, SignupSession, SubmissionState};
pub use types::*;
pub use workflow::SignupWorkflow;
