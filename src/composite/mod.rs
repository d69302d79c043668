//! Composite aggregation — fan out to the product, recommendation, and
//! review services and assemble one view of a product.
//!
//! The product is the anchor entity: without it the aggregate is
//! meaningless and the whole request fails as not-found. Recommendations
//! and reviews are optional — an empty result from either is a valid
//! outcome, carried as an empty summary list, never an error.

mod aggregator;
mod integration;

use serde::{Deserialize, Serialize};

/// Narrowed view of a recommendation inside the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub recommendation_id: i32,
    pub author: String,
    pub rate: i32,
}

/// Narrowed view of a review inside the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub review_id: i32,
    pub author: String,
    pub subject: String,
}

/// Which service instance answered each of the upstream calls, plus the
/// aggregator's own address. Empty string when a list-valued upstream
/// returned nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAddresses {
    pub composite_address: String,
    pub product_address: String,
    pub review_address: String,
    pub recommendation_address: String,
}

/// The assembled composite view of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    pub product_id: i32,
    pub name: String,
    pub weight: i32,
    pub recommendation_summaries: Vec<RecommendationSummary>,
    pub review_summaries: Vec<ReviewSummary>,
    pub service_addresses: ServiceAddresses,
}

pub use aggregator::ProductCompositeService;
pub use integration::{CompositeSources, HttpSources, IntegrationError};
