//! Core types for the signup workflow

use serde::{Deserialize, Serialize};

use crate::error::{SignupError, SignupResult};

/// A notification signup as stored by the backend.
///
/// The same shape is sent as `CreateNotifymedbInput` and returned by the
/// `createNotifymedb` mutation. `customer_id` is always the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRecord {
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "Email")]
    pub email: String,
}

impl From<&SignupFields> for SignupRecord {
    fn from(fields: &SignupFields) -> Self {
        Self {
            customer_id: fields.email.clone(),
            name: fields.name.clone(),
            surname: fields.surname.clone(),
            email: fields.email.clone(),
        }
    }
}

/// The three inputs of the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupFields {
    pub name: String,
    pub surname: String,
    pub email: String,
}

impl SignupFields {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
        }
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.surname.is_empty() && self.email.is_empty()
    }

    /// Check that all fields are present and the email is well formed.
    pub fn validate(&self) -> SignupResult<()> {
        if self.name.is_empty() {
            return Err(SignupError::InvalidInput("name is required".to_string()));
        }
        if self.surname.is_empty() {
            return Err(SignupError::InvalidInput("surname is required".to_string()));
        }
        if !is_well_formed_email(&self.email) {
            return Err(SignupError::InvalidInput(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

/// Which form input an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Surname,
    Email,
}

/// Same acceptance rules as an HTML `type="email"` input: one `@`, a
/// non-empty local part and domain, no whitespace.
pub fn is_well_formed_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains("..")
        }
        None => false,
    }
}

/// User-visible status line shown under the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    Registered,
    AlreadyRegistered,
    Failed,
    ConfigurationMissing,
}

impl StatusMessage {
    pub fn text(&self) -> &'static str {
        match self {
            StatusMessage::Registered => "Thank you, we will notify you prior to the launch!",
            StatusMessage::AlreadyRegistered => {
                "This email is already being used. We will notify you prior to the launch. Thank you!"
            }
            StatusMessage::Failed => "Something went wrong. Please try again.",
            StatusMessage::ConfigurationMissing => "API configuration is missing.",
        }
    }

    /// Whether the message reports a problem rather than a signup.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            StatusMessage::Failed | StatusMessage::ConfigurationMissing
        )
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// How a single submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A new record was stored
    Created(SignupRecord),
    /// The email was already registered; nothing was created
    Duplicate,
    /// Creation (or a fail-closed duplicate check) failed
    Failed,
    /// Credentials were never resolved; no request was made
    ConfigurationMissing,
}

impl SubmissionOutcome {
    pub fn status_message(&self) -> StatusMessage {
        match self {
            SubmissionOutcome::Created(_) => StatusMessage::Registered,
            SubmissionOutcome::Duplicate => StatusMessage::AlreadyRegistered,
            SubmissionOutcome::Failed => StatusMessage::Failed,
            SubmissionOutcome::ConfigurationMissing => StatusMessage::ConfigurationMissing,
        }
    }

    /// The stored record, if this submission created one.
    pub fn record(&self) -> Option<&SignupRecord> {
        match self {
            SubmissionOutcome::Created(record) => Some(record),
            _ => None,
        }
    }
}
