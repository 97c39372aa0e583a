//! HTTP client for the auction API.

use crate::{
    api::AuctionApi,
    config::{api as api_config, settings::ApiConfig},
    core::{BidderRegistration, Payment},
    entities::{
        ApiResponse, PaymentRecord, PullOutRequest, RegistrationRecord, payment::into_payments,
    },
    errors::{Error, Result},
};
use reqwest::{RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

/// Talks JSON to the auction API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAuctionApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpAuctionApi {
    /// Creates a client for `base_url`, sending `token` as a bearer token when set.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: api_config::normalize_base_url(base_url),
            token,
        }
    }

    /// Builds a client from configuration and the `AUCTION_API_TOKEN` variable.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = api_config::create_http_client(config)?;
        Ok(Self::new(
            client,
            &config.base_url,
            api_config::get_api_token(),
        ))
    }

    /// Base URL every path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self.authorize(self.client.get(&url)).send().await?;
        read_response(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {url}");
        let response = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await?;
        read_response(response).await
    }
}

impl AuctionApi for HttpAuctionApi {
    #[instrument(skip(self))]
    async fn registration(&self, auction_bidders_id: i64) -> Result<BidderRegistration> {
        let record: RegistrationRecord = self
            .get(&format!("auction-bidders/{auction_bidders_id}"))
            .await?;
        BidderRegistration::try_from(record)
    }

    #[instrument(skip(self))]
    async fn transactions(&self, bidder_id: i64) -> Result<Vec<Payment>> {
        let records: Vec<PaymentRecord> =
            self.get(&format!("bidders/{bidder_id}/payments")).await?;
        debug!("Fetched {} payments for bidder {bidder_id}", records.len());
        into_payments(records)
    }

    #[instrument(skip(self))]
    async fn payment(&self, payment_id: i64) -> Result<Payment> {
        let record: PaymentRecord = self.get(&format!("payments/{payment_id}")).await?;
        Payment::try_from(record)
    }

    #[instrument(skip(self, request), fields(items = request.item_ids.len()))]
    async fn submit_pull_out(
        &self,
        auction_bidders_id: i64,
        request: &PullOutRequest,
    ) -> Result<Payment> {
        let record: PaymentRecord = self
            .post(
                &format!("auction-bidders/{auction_bidders_id}/pull-out"),
                request,
            )
            .await?;
        Payment::try_from(record)
    }
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        warn!("Auction API error {status}: {message}");
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    let wrapped: ApiResponse<T> = response.json().await?;
    Ok(wrapped.data)
}

/// Pulls a readable message out of an error body: the `message` field of a
/// JSON object, or the raw text when it is not JSON.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}
