//! API credentials and the secret store they can be fetched from.
//!
//! The secret holds a JSON object:
//!
//! ```json
//! {
//!   "NEXT_PUBLIC_APPSYNC_API_URL": "https://xyz.appsync-api.us-east-1.amazonaws.com/graphql",
//!   "NEXT_PUBLIC_APPSYNC_API_KEY": "da2-..."
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{ApiSource, SecretStoreConfig};
use crate::error::{SignupError, SignupResult};

/// GraphQL endpoint and API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_url: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
struct SecretPayload {
    #[serde(rename = "NEXT_PUBLIC_APPSYNC_API_URL", alias = "APPSYNC_API_URL")]
    api_url: Option<String>,
    #[serde(rename = "NEXT_PUBLIC_APPSYNC_API_KEY", alias = "APPSYNC_API_KEY")]
    api_key: Option<String>,
}

/// Decode the JSON secret string into credentials.
pub fn parse_secret_payload(raw: &str) -> SignupResult<Credentials> {
    let payload: SecretPayload = serde_json::from_str(raw)?;

    let api_url = payload
        .api_url
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SignupError::SecretStore("secret has no API URL".to_string()))?;
    let api_key = payload
        .api_key
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SignupError::SecretStore("secret has no API key".to_string()))?;

    Ok(Credentials::new(api_url, api_key))
}

/// A service that hands out secret strings by id.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret_string(&self, secret_id: &str) -> SignupResult<String>;

    /// Provider name for diagnostics.
    fn provider_type(&self) -> &'static str;
}

/// Secret store backed by AWS Secrets Manager.
#[derive(Debug)]
pub struct AwsSecretStore {
    client: aws_sdk_secretsmanager::Client,
    region: String,
}

impl AwsSecretStore {
    /// Build a client for `region` using the ambient AWS credential chain.
    pub async fn new(region: impl Into<String>) -> Self {
        let region = region.into();
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .load()
            .await;
        let client = aws_sdk_secretsmanager::Client::new(&sdk_config);

        tracing::debug!(region = %region, "AWS Secrets Manager client initialized");

        Self { client, region }
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn get_secret_string(&self, secret_id: &str) -> SignupResult<String> {
        let result = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                SignupError::SecretStore(format!(
                    "failed to get secret '{}' (region: {}): {}",
                    secret_id, self.region, e
                ))
            })?;

        let value = result.secret_string().ok_or_else(|| {
            SignupError::SecretStore(format!("secret '{secret_id}' has no SecretString"))
        })?;

        tracing::info!(
            secret_id = %secret_id,
            version = ?result.version_id(),
            "Secret loaded from AWS Secrets Manager"
        );

        Ok(value.to_string())
    }

    fn provider_type(&self) -> &'static str {
        "aws"
    }
}

/// Read and decode the credentials secret. Exactly one store call.
pub async fn fetch_credentials(
    store: &dyn SecretStore,
    secret: &SecretStoreConfig,
) -> SignupResult<Credentials> {
    let raw = store.get_secret_string(&secret.secret_id).await?;
    parse_secret_payload(&raw)
}

/// Resolve credentials for `source`, fetching from `store` when needed.
///
/// Failures are logged and yield `None`; callers then run unconfigured.
pub async fn resolve_credentials(
    source: &ApiSource,
    store: Option<&dyn SecretStore>,
) -> Option<Credentials> {
    match source {
        ApiSource::Static(credentials) => Some(credentials.clone()),
        ApiSource::Unconfigured => {
            tracing::warn!("No API credentials configured");
            None
        }
        ApiSource::SecretStore(secret) => {
            let Some(store) = store else {
                tracing::warn!(secret_id = %secret.secret_id, "No secret store available");
                return None;
            };
            match fetch_credentials(store, secret).await {
                Ok(credentials) => {
                    tracing::info!(
                        provider = store.provider_type(),
                        api_url = %credentials.api_url,
                        "API credentials resolved"
                    );
                    Some(credentials)
                }
                Err(e) => {
                    tracing::error!(
                        provider = store.provider_type(),
                        secret_id = %secret.secret_id,
                        error = %e,
                        "Failed to resolve API credentials"
                    );
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::new("https://api.example.com/graphql", "da2-supersecret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("https://api.example.com/graphql"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("supersecret"));
    }

    #[test]
    fn test_parse_public_names() {
        let creds = parse_secret_payload(
            r#"{"NEXT_PUBLIC_APPSYNC_API_URL":"https://a/graphql","NEXT_PUBLIC_APPSYNC_API_KEY":"k"}"#,
        )
        .unwrap();
        assert_eq!(creds, Credentials::new("https://a/graphql", "k"));
    }

    #[test]
    fn test_parse_plain_names() {
        let creds =
            parse_secret_payload(r#"{"APPSYNC_API_URL":"https://a/graphql","APPSYNC_API_KEY":"k"}"#)
                .unwrap();
        assert_eq!(creds.api_key, "k");
    }

    #[test]
    fn test_parse_missing_key() {
        let err = parse_secret_payload(r#"{"NEXT_PUBLIC_APPSYNC_API_URL":"https://a/graphql"}"#)
            .unwrap_err();
        assert!(matches!(err, SignupError::SecretStore(_)));
    }

    #[test]
    fn test_parse_not_json() {
        let err = parse_secret_payload("https://a/graphql").unwrap_err();
        assert!(matches!(err, SignupError::Serialization(_)));
    }
}
