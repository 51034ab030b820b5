//! Workflow configuration parsed from environment variables.
//!
//! | Variable                          | Default     |
//! |-----------------------------------|-------------|
//! | `APPSYNC_API_URL`                 | (none)      |
//! | `APPSYNC_API_KEY`                 | (none)      |
//! | `NOTIFYME_SECRET_ID`              | (none)      |
//! | `NOTIFYME_SECRET_REGION`          | `us-east-1` |
//! | `NOTIFYME_REQUEST_TIMEOUT_SECS`   | `10`        |
//! | `NOTIFYME_RESET_DELAY_SECS`       | `5`         |
//! | `NOTIFYME_DUPLICATE_CHECK_POLICY` | `fail-open` |
//!
//! The `NEXT_PUBLIC_` prefixed credential names are accepted as aliases.

use std::time::Duration;

use crate::credentials::Credentials;
use crate::error::{SignupError, SignupResult};

pub const ENV_API_URL: &str = "APPSYNC_API_URL";
pub const ENV_API_KEY: &str = "APPSYNC_API_KEY";
pub const ENV_PUBLIC_API_URL: &str = "NEXT_PUBLIC_APPSYNC_API_URL";
pub const ENV_PUBLIC_API_KEY: &str = "NEXT_PUBLIC_APPSYNC_API_KEY";
pub const ENV_SECRET_ID: &str = "NOTIFYME_SECRET_ID";
pub const ENV_SECRET_REGION: &str = "NOTIFYME_SECRET_REGION";
pub const ENV_REQUEST_TIMEOUT: &str = "NOTIFYME_REQUEST_TIMEOUT_SECS";
pub const ENV_RESET_DELAY: &str = "NOTIFYME_RESET_DELAY_SECS";
pub const ENV_DUPLICATE_POLICY: &str = "NOTIFYME_DUPLICATE_CHECK_POLICY";

pub const DEFAULT_SECRET_REGION: &str = "us-east-1";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(5);

/// What to do when the duplicate check itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateCheckPolicy {
    /// Treat the email as unregistered and go on to create.
    ///
    /// May register an email twice on transient network failure.
    #[default]
    FailOpen,
    /// Settle the submission as failed without creating.
    FailClosed,
}

impl DuplicateCheckPolicy {
    /// Parse from string value (case-insensitive).
    pub fn from_str_value(s: &str) -> SignupResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "fail-open" | "open" | "proceed" => Ok(Self::FailOpen),
            "fail-closed" | "closed" | "block" => Ok(Self::FailClosed),
            other => Err(SignupError::Config(format!(
                "Unknown {ENV_DUPLICATE_POLICY} value '{other}'. Valid options: fail-open, fail-closed"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailOpen => "fail-open",
            Self::FailClosed => "fail-closed",
        }
    }
}

/// Location of the credentials secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretStoreConfig {
    pub secret_id: String,
    pub region: String,
}

/// Where the API endpoint and key come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiSource {
    /// Supplied directly at build/deploy time
    Static(Credentials),
    /// Fetched once at start-up from the secret store
    SecretStore(SecretStoreConfig),
    /// Nothing configured; every submission reports missing configuration
    Unconfigured,
}

impl ApiSource {
    /// Pick a source from the individual settings.
    ///
    /// Direct credentials win when both are present; otherwise a secret id
    /// selects the secret-store variant.
    pub fn select(
        api_url: Option<String>,
        api_key: Option<String>,
        secret_id: Option<String>,
        region: Option<String>,
    ) -> Self {
        let api_url = api_url.filter(|v| !v.trim().is_empty());
        let api_key = api_key.filter(|v| !v.trim().is_empty());
        let secret_id = secret_id.filter(|v| !v.trim().is_empty());

        match (api_url, api_key, secret_id) {
            (Some(url), Some(key), _) => ApiSource::Static(Credentials::new(url, key)),
            (_, _, Some(secret_id)) => ApiSource::SecretStore(SecretStoreConfig {
                secret_id,
                region: region
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SECRET_REGION.to_string()),
            }),
            _ => ApiSource::Unconfigured,
        }
    }

    /// Short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiSource::Static(_) => "static",
            ApiSource::SecretStore(_) => "secret-store",
            ApiSource::Unconfigured => "unconfigured",
        }
    }
}

/// Everything the workflow needs, passed in at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub api: ApiSource,
    pub request_timeout: Duration,
    pub reset_delay: Duration,
    pub duplicate_policy: DuplicateCheckPolicy,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            api: ApiSource::Unconfigured,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            reset_delay: DEFAULT_RESET_DELAY,
            duplicate_policy: DuplicateCheckPolicy::default(),
        }
    }
}

impl NotifyConfig {
    pub fn new(api: ApiSource) -> Self {
        Self {
            api,
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> SignupResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> SignupResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = ApiSource::select(
            lookup(ENV_API_URL).or_else(|| lookup(ENV_PUBLIC_API_URL)),
            lookup(ENV_API_KEY).or_else(|| lookup(ENV_PUBLIC_API_KEY)),
            lookup(ENV_SECRET_ID),
            lookup(ENV_SECRET_REGION),
        );

        let request_timeout = match lookup(ENV_REQUEST_TIMEOUT) {
            Some(v) => parse_timeout(ENV_REQUEST_TIMEOUT, &v)?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };
        let reset_delay = match lookup(ENV_RESET_DELAY) {
            Some(v) => parse_secs(ENV_RESET_DELAY, &v)?,
            None => DEFAULT_RESET_DELAY,
        };
        let duplicate_policy = match lookup(ENV_DUPLICATE_POLICY) {
            Some(v) => DuplicateCheckPolicy::from_str_value(&v)?,
            None => DuplicateCheckPolicy::default(),
        };

        Ok(Self {
            api,
            request_timeout,
            reset_delay,
            duplicate_policy,
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicateCheckPolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

/// A zero timeout would fail every request, so it is rejected.
fn parse_timeout(name: &str, value: &str) -> SignupResult<Duration> {
    let timeout = parse_secs(name, value)?;
    if timeout.is_zero() {
        return Err(SignupError::Config(format!("{name} must be at least 1 second")));
    }
    Ok(timeout)
}

fn parse_secs(name: &str, value: &str) -> SignupResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| SignupError::Config(format!("{name} must be a whole number of seconds: {e}")))
}
