use async_trait::async_trait;

use crate::{DonationRecord, errors::FetchError};

/// Read access to one donation table. The aggregator only ever needs a full
/// unfiltered read; keeping the seam this narrow lets tests swap in a stub.
#[async_trait]
pub trait DonationSource: Send + Sync {
    async fn fetch_all_rows(&self, table: &str) -> Result<Vec<DonationRecord>, FetchError>;
}

/// Supabase table reader over the PostgREST endpoint.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        SupabaseClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl DonationSource for SupabaseClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_all_rows(&self, table: &str) -> Result<Vec<DonationRecord>, FetchError> {
        let endpoint = format!("{}/rest/v1/{}", self.base_url, table);
        let response = self
            .http
            .get(endpoint)
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.json().await?)
    }
}
