//! RecommendationService — pass-through facade over the repository.

use super::{RecommendationEntity, RecommendationRepository, RepositoryError};
use crate::store::KeyValueStore;

/// Service layer exposing the repository's operations to callers.
pub struct RecommendationService<S> {
    repository: RecommendationRepository<S>,
}

impl<S: KeyValueStore> RecommendationService<S> {
    pub fn new(store: S) -> Self {
        Self {
            repository: RecommendationRepository::new(store),
        }
    }

    pub async fn save(
        &self,
        entity: RecommendationEntity,
    ) -> Result<Option<RecommendationEntity>, RepositoryError> {
        self.repository.save(entity).await
    }

    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<RecommendationEntity>, RepositoryError> {
        self.repository.find_by_id(id).await
    }

    pub async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Vec<RecommendationEntity>, RepositoryError> {
        self.repository.find_by_product_id(product_id).await
    }

    pub async fn delete_by_product_id(&self, product_id: i32) -> Result<usize, RepositoryError> {
        self.repository.delete_by_product_id(product_id).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<bool, RepositoryError> {
        self.repository.delete_by_id(id).await
    }

    pub async fn delete(&self, entity: &RecommendationEntity) -> Result<bool, RepositoryError> {
        self.repository.delete(entity).await
    }

    pub async fn delete_all(&self) -> Result<usize, RepositoryError> {
        self.repository.delete_all().await
    }

    pub async fn count(&self) -> Result<usize, RepositoryError> {
        self.repository.count().await
    }

    pub async fn exists_by_id(&self, id: &str) -> Result<bool, RepositoryError> {
        self.repository.exists_by_id(id).await
    }
}
