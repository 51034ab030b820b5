//! GraphQL-over-HTTPS client for the AppSync endpoint.
//!
//! Requests are `POST {query, variables}` with an `x-api-key` header.
//! Responses are `{data, errors?}`; a non-empty `errors` array is a failure
//! whatever the HTTP status.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::credentials::Credentials;
use crate::error::{SignupError, SignupResult};

pub const API_KEY_HEADER: &str = "x-api-key";

pub const GET_NOTIFYMEDB: &str = r#"
query GetNotifymedb($CustomerID: String!) {
    getNotifymedb(CustomerID: $CustomerID) {
        CustomerID
    }
}
"#;

pub const CREATE_NOTIFYMEDB: &str = r#"
mutation CreateNotifymedb($input: CreateNotifymedbInput!) {
    createNotifymedb(input: $input) {
        CustomerID
        Name
        Surname
        Email
    }
}
"#;

/// Request body.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// One entry of the response `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "errorType", default)]
    pub error_type: Option<String>,
}

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    /// Split into data or a backend error.
    ///
    /// Any `errors` collection is a failure, including an empty one.
    pub fn into_result(self) -> SignupResult<Option<T>> {
        match self.errors {
            Some(errors) if errors.is_empty() => Err(SignupError::Backend(
                "response carried an empty errors collection".to_string(),
            )),
            Some(errors) => {
                let joined = errors
                    .iter()
                    .map(|e| match &e.error_type {
                        Some(kind) => format!("{kind}: {}", e.message),
                        None => e.message.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(SignupError::Backend(joined))
            }
            _ => Ok(self.data),
        }
    }
}

/// HTTP client bound to one endpoint and API key.
pub struct AppSyncClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl std::fmt::Debug for AppSyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSyncClient")
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl AppSyncClient {
    /// Creates a client whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials, timeout: Duration) -> SignupResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SignupError::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self::with_http_client(credentials, http))
    }

    pub fn with_http_client(credentials: Credentials, http: reqwest::Client) -> Self {
        Self { http, credentials }
    }

    pub fn endpoint(&self) -> &str {
        &self.credentials.api_url
    }

    /// Run one operation and decode its `data`.
    #[instrument(skip(self, query, variables), fields(endpoint = %self.credentials.api_url))]
    pub async fn execute<V, T>(&self, operation: &str, query: &str, variables: V) -> SignupResult<Option<T>>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.credentials.api_url)
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body: GraphQlResponse<T> = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(operation, %status, "Unparseable GraphQL response");
            SignupError::Serialization(format!("{operation} response (HTTP {status}): {e}"))
        })?;

        let data = body.into_result().inspect_err(|e| {
            warn!(operation, %status, error = %e, "GraphQL operation returned errors");
        })?;

        debug!(operation, %status, has_data = data.is_some(), "GraphQL operation completed");
        Ok(data)
    }
}
