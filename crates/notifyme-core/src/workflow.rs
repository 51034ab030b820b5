//! Duplicate-check-then-create signup workflow.
//!
//! ```ignore
//! let config = NotifyConfig::from_env()?;
//! let workflow = SignupWorkflow::connect(&config).await;
//!
//! let fields = SignupFields::new("Ada", "Lovelace", "ada@example.com");
//! let outcome = workflow.run(&fields, |_| {}).await;
//! println!("{}", outcome.status_message());
//! ```

use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::backend::{AppSyncBackend, SignupBackend};
use crate::config::{ApiSource, DuplicateCheckPolicy, NotifyConfig};
use crate::credentials::{resolve_credentials, AwsSecretStore, SecretStore};
use crate::error::{SignupError, SignupResult};
use crate::session::SubmissionState;
use crate::types::{SignupFields, SignupRecord, SubmissionOutcome};

/// One backend plus the policies that govern a submission.
///
/// Without a backend (credentials never resolved) every submission settles
/// as [`SubmissionOutcome::ConfigurationMissing`] without any request.
pub struct SignupWorkflow<B> {
    backend: Option<B>,
    policy: DuplicateCheckPolicy,
    reset_delay: Duration,
}

impl<B: SignupBackend> SignupWorkflow<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
            policy: DuplicateCheckPolicy::default(),
            reset_delay: crate::config::DEFAULT_RESET_DELAY,
        }
    }

    /// A workflow with no backend.
    pub fn unconfigured() -> Self {
        Self {
            backend: None,
            policy: DuplicateCheckPolicy::default(),
            reset_delay: crate::config::DEFAULT_RESET_DELAY,
        }
    }

    pub fn with_policy(mut self, policy: DuplicateCheckPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn policy(&self) -> DuplicateCheckPolicy {
        self.policy
    }

    /// How long a settled submission stays on screen.
    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// True iff the backend returned a record for `email`.
    ///
    /// Any failure, including missing configuration, reads as `false`.
    #[instrument(skip(self))]
    pub async fn check_exists(&self, email: &str) -> bool {
        let Some(backend) = &self.backend else {
            warn!("Duplicate check skipped: API configuration is missing");
            return false;
        };
        match backend.find_record(email).await {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!(error = %e, "Duplicate check failed; treating email as unregistered");
                false
            }
        }
    }

    /// Store a record for `signup` with `CustomerID` set to the email.
    #[instrument(skip(self, signup), fields(email = %signup.email))]
    pub async fn create(&self, signup: &SignupFields) -> SignupResult<SignupRecord> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| SignupError::Config("API configuration is missing".to_string()))?;

        let record = SignupRecord::from(signup);
        match backend.create_record(&record).await {
            Ok(stored) => {
                info!(customer_id = %stored.customer_id, "Signup record created");
                Ok(stored)
            }
            Err(e) => {
                error!(error = %e, "Error creating signup record");
                Err(e)
            }
        }
    }

    /// Run one submission to its outcome, reporting each stage to `progress`.
    ///
    /// Never fails: every error path settles into an outcome.
    #[instrument(skip(self, signup, progress), fields(email = %signup.email))]
    pub async fn run<F>(&self, signup: &SignupFields, mut progress: F) -> SubmissionOutcome
    where
        F: FnMut(SubmissionState),
    {
        let Some(backend) = &self.backend else {
            warn!("Submission rejected: API configuration is missing");
            return SubmissionOutcome::ConfigurationMissing;
        };

        progress(SubmissionState::Checking);
        let exists = match backend.find_record(&signup.email).await {
            Ok(found) => found.is_some(),
            Err(e) => match self.policy {
                DuplicateCheckPolicy::FailOpen => {
                    warn!(error = %e, "Duplicate check failed; proceeding to create (fail-open)");
                    false
                }
                DuplicateCheckPolicy::FailClosed => {
                    warn!(error = %e, "Duplicate check failed; not creating (fail-closed)");
                    return SubmissionOutcome::Failed;
                }
            },
        };

        if exists {
            progress(SubmissionState::Duplicate);
            info!("Email already registered");
            return SubmissionOutcome::Duplicate;
        }

        progress(SubmissionState::Creating);
        match self.create(signup).await {
            Ok(record) => SubmissionOutcome::Created(record),
            Err(_) => SubmissionOutcome::Failed,
        }
    }
}

impl SignupWorkflow<AppSyncBackend> {
    /// Resolve credentials for `config` and build the workflow.
    ///
    /// For the secret-store variant this makes exactly one store call.
    pub async fn connect(config: &NotifyConfig) -> Self {
        match &config.api {
            ApiSource::SecretStore(secret) => {
                let store = AwsSecretStore::new(secret.region.clone()).await;
                let store: &dyn SecretStore = &store;
                Self::connect_with_store(config, Some(store)).await
            }
            _ => Self::connect_with_store(config, None).await,
        }
    }

    /// As [`connect`](Self::connect) with an explicit secret store.
    pub async fn connect_with_store(
        config: &NotifyConfig,
        store: Option<&dyn SecretStore>,
    ) -> Self {
        let workflow = match resolve_credentials(&config.api, store).await {
            Some(credentials) => match AppSyncBackend::new(credentials, config.request_timeout) {
                Ok(backend) => Self::new(backend),
                Err(e) => {
                    error!(error = %e, "Failed to build AppSync backend");
                    Self::unconfigured()
                }
            },
            None => Self::unconfigured(),
        };

        workflow
            .with_policy(config.duplicate_policy)
            .with_reset_delay(config.reset_delay)
    }
}
