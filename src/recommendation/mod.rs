//! Recommendation persistence — the document entity, the repository that
//! emulates relational guarantees over a plain key-value backend, and the
//! pass-through service facade.
//!
//! The backend offers nothing beyond per-key get/put/remove and a full
//! scan, so two guarantees the entity needs are built here in check-then-act
//! style: uniqueness of the `(productId, recommendationId)` natural key on
//! create, and an optimistic version check on update.

mod repository;
mod service;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::Recommendation;
use crate::store::StoreError;

/// The stored recommendation document.
///
/// `id` is the storage key: opaque, assigned by the repository on create,
/// immutable afterwards, and `None` on caller-constructed new records.
/// `(product_id, recommendation_id)` is the natural key — at most one
/// record may carry a given pair. `version` starts at 0 and moves up by
/// exactly 1 on every successful update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationEntity {
    pub id: Option<String>,
    pub product_id: i32,
    pub recommendation_id: i32,
    pub author: String,
    pub rate: i32,
    pub content: String,
    #[serde(default)]
    pub version: i32,
}

impl RecommendationEntity {
    /// Build a new (unsaved) entity from wire data. The repository assigns
    /// `id` and `version` when the entity is first saved.
    pub fn from_api(api: &Recommendation) -> Self {
        Self {
            id: None,
            product_id: api.product_id,
            recommendation_id: api.recommendation_id,
            author: api.author.clone(),
            rate: api.rate,
            content: api.content.clone(),
            version: 0,
        }
    }

    /// Project this entity to its wire shape, stamped with the address of
    /// the serving instance.
    pub fn to_api(&self, service_address: &str) -> Recommendation {
        Recommendation {
            product_id: self.product_id,
            recommendation_id: self.recommendation_id,
            author: self.author.clone(),
            rate: self.rate,
            content: self.content.clone(),
            service_address: service_address.to_string(),
        }
    }
}

/// Error type for repository operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Create would violate natural-key uniqueness.
    DuplicateKey { product_id: i32, recommendation_id: i32 },
    /// Update's version does not match the stored version.
    OptimisticLock {
        id: String,
        expected: i32,
        actual: i32,
    },
    /// Store adapter failure, propagated unchanged.
    Store(StoreError),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::DuplicateKey {
                product_id,
                recommendation_id,
            } => write!(
                f,
                "duplicate key, product id: {}, recommendation id: {}",
                product_id, recommendation_id
            ),
            RepositoryError::OptimisticLock {
                id,
                expected,
                actual,
            } => write!(
                f,
                "record {} was updated by someone else (expected version {}, stored version {})",
                id, expected, actual
            ),
            RepositoryError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepositoryError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        RepositoryError::Store(err)
    }
}

pub use repository::RecommendationRepository;
pub use service::RecommendationService;
