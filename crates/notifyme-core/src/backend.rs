//! Backend seam: the two operations the workflow needs from the store.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::credentials::Credentials;
use crate::error::SignupResult;
use crate::graphql::{AppSyncClient, CREATE_NOTIFYMEDB, GET_NOTIFYMEDB};
use crate::types::SignupRecord;

/// Storage for signup records, keyed by customer id.
#[async_trait]
pub trait SignupBackend: Send + Sync {
    /// Look up a record by customer id. `Ok(None)` when absent.
    async fn find_record(&self, customer_id: &str) -> SignupResult<Option<String>>;

    /// Store a new record and return what the backend persisted.
    async fn create_record(&self, record: &SignupRecord) -> SignupResult<SignupRecord>;
}

#[derive(Debug, Deserialize)]
struct RecordKey {
    #[serde(rename = "CustomerID")]
    customer_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetNotifymedbData {
    get_notifymedb: Option<RecordKey>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateNotifymedbData {
    create_notifymedb: Option<SignupRecord>,
}

/// `SignupBackend` over the `Notifymedb` AppSync API.
#[derive(Debug)]
pub struct AppSyncBackend {
    client: AppSyncClient,
}

impl AppSyncBackend {
    pub fn new(credentials: Credentials, timeout: Duration) -> SignupResult<Self> {
        Ok(Self {
            client: AppSyncClient::new(credentials, timeout)?,
        })
    }

    pub fn from_client(client: AppSyncClient) -> Self {
        Self { client }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

#[async_trait]
impl SignupBackend for AppSyncBackend {
    async fn find_record(&self, customer_id: &str) -> SignupResult<Option<String>> {
        let data: Option<GetNotifymedbData> = self
            .client
            .execute(
                "GetNotifymedb",
                GET_NOTIFYMEDB,
                json!({ "CustomerID": customer_id }),
            )
            .await?;

        Ok(data
            .and_then(|d| d.get_notifymedb)
            .map(|key| key.customer_id))
    }

    async fn create_record(&self, record: &SignupRecord) -> SignupResult<SignupRecord> {
        let data: Option<CreateNotifymedbData> = self
            .client
            .execute(
                "CreateNotifymedb",
                CREATE_NOTIFYMEDB,
                json!({ "input": record }),
            )
            .await?;

        // A clean response with a null payload still counts as stored.
        Ok(data
            .and_then(|d| d.create_notifymedb)
            .unwrap_or_else(|| record.clone()))
    }
}
