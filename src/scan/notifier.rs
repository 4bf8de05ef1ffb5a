//! Outbound campaign notification dispatch.
//!
//! One notification is posted per classified vault. Delivery failures never
//! escalate past the scan loop; the scanner logs them and moves on. The HTTP
//! notifier retries transport errors and 5xx responses with bounded
//! exponential backoff and stamps each request with an idempotency key so a
//! rescan of the same range can be deduplicated downstream.

use crate::scan::classifier::Campaign;
use backoff::ExponentialBackoff;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

/// Partner name the reward service attributes events to.
pub const PARTNER_NAME: &str = "calc";

/// One campaign completion event, constructed fresh per vault and never
/// persisted. The campaign tag selects the endpoint rather than appearing in
/// the request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub chain: String,
    pub address: String,
    pub partner_name: String,
    pub partner_key: String,
    #[serde(skip)]
    pub campaign: Campaign,
}

impl NotificationEvent {
    /// Key identifying this delivery for downstream deduplication. Repeated
    /// scans produce the same key for the same vault and campaign.
    pub fn idempotency_key(&self) -> String {
        format!("{}:{}", self.address, self.campaign)
    }
}

/// Error types for notification delivery
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Campaign service returned {0}")]
    StatusError(reqwest::StatusCode),
}

/// Seam over notification delivery, mocked in scanner tests.
#[async_trait::async_trait]
pub trait CampaignNotifier: Send + Sync {
    /// Attempt delivery of one notification event.
    async fn notify(&self, event: &NotificationEvent) -> Result<(), NotifyError>;
}

/// Notifier posting campaign events to the reward service over HTTP.
#[derive(Clone)]
pub struct HttpCampaignNotifier {
    http_client: reqwest::Client,
    base_url: String,
    max_retry_elapsed: Duration,
}

impl HttpCampaignNotifier {
    /// Create a notifier for the given reward-service base URL.
    pub fn new(base_url: String) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url,
            max_retry_elapsed: Duration::from_secs(10),
        }
    }

    fn endpoint(&self, campaign: Campaign) -> String {
        format!("{}/api/campaigns/{}/events", self.base_url, campaign)
    }

    async fn send_once(
        &self,
        url: &str,
        event: &NotificationEvent,
    ) -> Result<(), backoff::Error<NotifyError>> {
        let response = self
            .http_client
            .post(url)
            .header("Idempotency-Key", event.idempotency_key())
            .json(event)
            .send()
            .await
            .map_err(|e| backoff::Error::transient(NotifyError::HttpError(e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.is_server_error() {
            warn!("Campaign service returned {}, retrying", status);
            Err(backoff::Error::transient(NotifyError::StatusError(status)))
        } else {
            Err(backoff::Error::permanent(NotifyError::StatusError(status)))
        }
    }
}

#[async_trait::async_trait]
impl CampaignNotifier for HttpCampaignNotifier {
    async fn notify(&self, event: &NotificationEvent) -> Result<(), NotifyError> {
        let url = self.endpoint(event.campaign);

        let policy = ExponentialBackoff {
            initial_interval: Duration::from_millis(500),
            max_elapsed_time: Some(self.max_retry_elapsed),
            ..ExponentialBackoff::default()
        };

        backoff::future::retry(policy, || self.send_once(&url, event)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(address: &str, campaign: Campaign) -> NotificationEvent {
        NotificationEvent {
            chain: "kujira".to_string(),
            address: address.to_string(),
            partner_name: PARTNER_NAME.to_string(),
            partner_key: "partner-key".to_string(),
            campaign,
        }
    }

    #[test]
    fn test_endpoint_is_parameterized_by_campaign() {
        let notifier = HttpCampaignNotifier::new("https://campaign.example".to_string());

        assert_eq!(
            notifier.endpoint(Campaign::Accumulate),
            "https://campaign.example/api/campaigns/calc_accumulate/events"
        );
        assert_eq!(
            notifier.endpoint(Campaign::TakeProfit),
            "https://campaign.example/api/campaigns/calc_takeprofit/events"
        );
    }

    #[test]
    fn test_idempotency_key_is_stable_per_vault_and_campaign() {
        let first = event("kujira1abc", Campaign::Accumulate);
        let again = event("kujira1abc", Campaign::Accumulate);
        let other = event("kujira1abc", Campaign::TakeProfit);

        assert_eq!(first.idempotency_key(), again.idempotency_key());
        assert_ne!(first.idempotency_key(), other.idempotency_key());
        assert_eq!(first.idempotency_key(), "kujira1abc:calc_accumulate");
    }

    #[test]
    fn test_body_serializes_partner_fields_in_camel_case() {
        let body = serde_json::to_value(event("kujira1abc", Campaign::Accumulate)).unwrap();

        assert_eq!(body["chain"], "kujira");
        assert_eq!(body["address"], "kujira1abc");
        assert_eq!(body["partnerName"], "calc");
        assert_eq!(body["partnerKey"], "partner-key");
        // The campaign selects the endpoint, not a body field.
        assert!(body.get("campaign").is_none());
    }
}
