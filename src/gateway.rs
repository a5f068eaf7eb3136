//! The submission boundary: the one network-shaped interface in the app.
//!
//! Controllers only ever see [`Outcome`] (application-level accept/reject)
//! or [`GatewayError`] (transport-level fault) and treat the latter like a
//! rejection with a generic message, so swapping the simulated gateway for
//! the HTTP one changes nothing above this module.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

use crate::models::{InternshipApplication, OfferLetter};

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);
pub const DEFAULT_SUCCESS_RATE: f64 = 0.8;

const SUCCESS_MESSAGE: &str = "Operation completed successfully!";
const FAILURE_MESSAGE: &str = "Operation failed. Please try again.";
const FAILURE_DETAIL: &str = "Network error or server unavailable";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("gateway returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("gateway accepted the submission but returned no data")]
    MissingData,
}

/// Application-level result of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Accepted { data: T, message: String },
    Rejected { message: String, detail: Option<String> },
}

/// The wire shape both endpoints answer with:
/// `{ success, data?, message, error? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_outcome(self) -> Result<Outcome<T>, GatewayError> {
        if self.success {
            let data = self.data.ok_or(GatewayError::MissingData)?;
            Ok(Outcome::Accepted {
                data,
                message: self.message,
            })
        } else {
            Ok(Outcome::Rejected {
                message: self.message,
                detail: self.error,
            })
        }
    }
}

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn submit_application(
        &self,
        application: InternshipApplication,
    ) -> Result<Outcome<InternshipApplication>, GatewayError>;

    async fn submit_offer(&self, offer: OfferLetter)
    -> Result<Outcome<OfferLetter>, GatewayError>;
}

/// Simulated gateway: waits a fixed latency, then accepts with the
/// configured probability, assigning a fresh id on acceptance. The 0.8
/// default is demo behavior, not a contract.
#[derive(Debug, Clone)]
pub struct MockGateway {
    latency: Duration,
    success_rate: f64,
}

impl MockGateway {
    pub fn new(latency: Duration, success_rate: f64) -> Self {
        Self {
            latency,
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }

    fn new_id() -> String {
        chrono::Local::now().timestamp_millis().to_string()
    }

    async fn simulate<T>(
        &self,
        mut data: T,
        set_id: impl FnOnce(&mut T) + Send,
    ) -> Result<Outcome<T>, GatewayError> {
        sleep(self.latency).await;
        if rand::thread_rng().gen_bool(self.success_rate) {
            set_id(&mut data);
            Ok(Outcome::Accepted {
                data,
                message: SUCCESS_MESSAGE.to_string(),
            })
        } else {
            Ok(Outcome::Rejected {
                message: FAILURE_MESSAGE.to_string(),
                detail: Some(FAILURE_DETAIL.to_string()),
            })
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY, DEFAULT_SUCCESS_RATE)
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn submit_application(
        &self,
        application: InternshipApplication,
    ) -> Result<Outcome<InternshipApplication>, GatewayError> {
        self.simulate(application, |a| a.id = Some(Self::new_id()))
            .await
    }

    async fn submit_offer(
        &self,
        offer: OfferLetter,
    ) -> Result<Outcome<OfferLetter>, GatewayError> {
        self.simulate(offer, |o| o.id = Some(Self::new_id())).await
    }
}

/// Real gateway: POSTs the record as JSON and decodes the [`ApiResponse`]
/// shape. Selected with `--endpoint`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn post_record<T>(&self, path: &str, record: &T) -> Result<Outcome<T>, GatewayError>
    where
        T: Serialize + DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status, body });
        }

        let api_response: ApiResponse<T> = response.json().await?;
        api_response.into_outcome()
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn submit_application(
        &self,
        application: InternshipApplication,
    ) -> Result<Outcome<InternshipApplication>, GatewayError> {
        self.post_record("internship-applications", &application)
            .await
    }

    async fn submit_offer(
        &self,
        offer: OfferLetter,
    ) -> Result<Outcome<OfferLetter>, GatewayError> {
        self.post_record("offer-letters", &offer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_mock_accepts_at_rate_one_and_assigns_id() {
        let gateway = MockGateway::new(Duration::from_millis(1500), 1.0);
        let outcome = gateway
            .submit_application(InternshipApplication::default())
            .await
            .unwrap();
        match outcome {
            Outcome::Accepted { data, message } => {
                assert!(data.id.is_some());
                assert_eq!(message, SUCCESS_MESSAGE);
            }
            Outcome::Rejected { .. } => panic!("rate 1.0 must accept"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_rejects_at_rate_zero_with_fixed_messages() {
        let gateway = MockGateway::new(Duration::from_millis(1500), 0.0);
        let outcome = gateway.submit_offer(OfferLetter::default()).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Rejected {
                message: FAILURE_MESSAGE.to_string(),
                detail: Some(FAILURE_DETAIL.to_string()),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_assigns_id_to_offers_too() {
        let gateway = MockGateway::new(Duration::ZERO, 1.0);
        match gateway.submit_offer(OfferLetter::default()).await.unwrap() {
            Outcome::Accepted { data, .. } => assert!(data.id.is_some()),
            Outcome::Rejected { .. } => panic!("rate 1.0 must accept"),
        }
    }

    #[test]
    fn test_api_response_failure_maps_to_rejected() {
        let response: ApiResponse<OfferLetter> = serde_json::from_str(
            r#"{"success":false,"message":"Operation failed. Please try again.","error":"Network error or server unavailable"}"#,
        )
        .unwrap();
        let outcome = response.into_outcome().unwrap();
        assert_eq!(
            outcome,
            Outcome::Rejected {
                message: FAILURE_MESSAGE.to_string(),
                detail: Some(FAILURE_DETAIL.to_string()),
            }
        );
    }

    #[test]
    fn test_api_response_success_without_data_is_an_error() {
        let response: ApiResponse<OfferLetter> =
            serde_json::from_str(r#"{"success":true,"message":"ok"}"#).unwrap();
        assert!(matches!(
            response.into_outcome(),
            Err(GatewayError::MissingData)
        ));
    }

    #[test]
    fn test_api_response_success_round_trip() {
        let mut offer = OfferLetter::default();
        offer.id = Some("123".into());
        let body = ApiResponse {
            success: true,
            data: Some(offer.clone()),
            message: SUCCESS_MESSAGE.to_string(),
            error: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        let decoded: ApiResponse<OfferLetter> = serde_json::from_str(&json).unwrap();
        match decoded.into_outcome().unwrap() {
            Outcome::Accepted { data, .. } => assert_eq!(data, offer),
            Outcome::Rejected { .. } => panic!("success body must map to Accepted"),
        }
    }
}
