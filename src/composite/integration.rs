//! Upstream integration — the seam between the aggregator and the three
//! data services.
//!
//! Absence of data is represented in the result types (`None`, empty
//! `Vec`), never as an error; only genuine transport failures surface as
//! `IntegrationError`.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{Product, Recommendation, Review};

/// Error type for upstream calls. Absence is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationError {
    /// The upstream could not be reached.
    Transport(String),
    /// The upstream answered with a body that failed to decode.
    Decode(String),
    /// The upstream answered with a status the client does not handle.
    UnexpectedStatus { service: &'static str, status: u16 },
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationError::Transport(msg) => write!(f, "upstream transport error: {}", msg),
            IntegrationError::Decode(msg) => write!(f, "upstream decode error: {}", msg),
            IntegrationError::UnexpectedStatus { service, status } => {
                write!(f, "unexpected status {} from {} service", status, service)
            }
        }
    }
}

impl std::error::Error for IntegrationError {}

/// The three independent upstream reads the aggregator composes.
#[async_trait]
pub trait CompositeSources: Send + Sync {
    /// The product with the given id, or `None` if no such product exists.
    async fn product(&self, product_id: i32) -> Result<Option<Product>, IntegrationError>;

    /// All recommendations for the product. Empty when there are none.
    async fn recommendations(
        &self,
        product_id: i32,
    ) -> Result<Vec<Recommendation>, IntegrationError>;

    /// All reviews for the product. Empty when there are none.
    async fn reviews(&self, product_id: i32) -> Result<Vec<Review>, IntegrationError>;
}

/// HTTP-backed sources calling the three services by base URL.
pub struct HttpSources {
    client: reqwest::Client,
    product_base: String,
    recommendation_base: String,
    review_base: String,
}

impl HttpSources {
    pub fn new(
        product_base: impl Into<String>,
        recommendation_base: impl Into<String>,
        review_base: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            product_base: product_base.into(),
            recommendation_base: recommendation_base.into(),
            review_base: review_base.into(),
        }
    }

    async fn get_list<T: serde::de::DeserializeOwned>(
        &self,
        service: &'static str,
        url: String,
    ) -> Result<Vec<T>, IntegrationError> {
        debug!("calling {} service: {}", service, url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| IntegrationError::Transport(e.to_string()))?;

        match response.status().as_u16() {
            200 => response
                .json()
                .await
                .map_err(|e| IntegrationError::Decode(e.to_string())),
            404 => Ok(Vec::new()),
            status => Err(IntegrationError::UnexpectedStatus { service, status }),
        }
    }
}

#[async_trait]
impl CompositeSources for HttpSources {
    async fn product(&self, product_id: i32) -> Result<Option<Product>, IntegrationError> {
        let url = format!("{}/product/{}", self.product_base, product_id);
        debug!("calling product service: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| IntegrationError::Transport(e.to_string()))?;

        match response.status().as_u16() {
            200 => response
                .json()
                .await
                .map(Some)
                .map_err(|e| IntegrationError::Decode(e.to_string())),
            404 => Ok(None),
            status => Err(IntegrationError::UnexpectedStatus {
                service: "product",
                status,
            }),
        }
    }

    async fn recommendations(
        &self,
        product_id: i32,
    ) -> Result<Vec<Recommendation>, IntegrationError> {
        let url = format!(
            "{}/recommendation?productId={}",
            self.recommendation_base, product_id
        );
        self.get_list("recommendation", url).await
    }

    async fn reviews(&self, product_id: i32) -> Result<Vec<Review>, IntegrationError> {
        let url = format!("{}/review?productId={}", self.review_base, product_id);
        self.get_list("review", url).await
    }
}
