//! RecommendationRepository — CRUD with emulated relational guarantees.
//!
//! The backend has no secondary index, no transactions, and no
//! compare-and-swap, so:
//!
//! - natural-key lookups (`find_by_product_id`, `find_by_natural_key`) are
//!   full scans filtered in memory;
//! - uniqueness on create and the version check on update are
//!   check-then-act sequences of non-atomic adapter calls. Two concurrent
//!   creates racing on the same natural key can both pass the existence
//!   check; a concurrent create during `delete_by_product_id`'s sweep may
//!   or may not survive it. The version check on update is the only
//!   conflict detection the repository offers.

use uuid::Uuid;

use super::{RecommendationEntity, RepositoryError};
use crate::store::{KeyValueStore, StoreError};

/// Logical collection name for recommendation documents.
const COLLECTION: &str = "recommendations";

/// Repository for recommendation documents over a key-value store.
///
/// All operations are async and non-blocking; no locks are held across
/// adapter calls.
pub struct RecommendationRepository<S> {
    store: S,
}

impl<S: KeyValueStore> RecommendationRepository<S> {
    /// Create a repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Generate a new storage id: a 128-bit random token without separators.
    fn new_entity_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Decode and return every document in the collection. Full scan.
    async fn scan(&self) -> Result<Vec<RecommendationEntity>, RepositoryError> {
        let values = self.store.values(COLLECTION).await?;
        let mut entities = Vec::with_capacity(values.len());
        for bytes in values {
            let entity = serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Serde(e.to_string()))?;
            entities.push(entity);
        }
        Ok(entities)
    }

    async fn put(&self, id: &str, entity: &RecommendationEntity) -> Result<(), RepositoryError> {
        let bytes =
            serde_json::to_vec(entity).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.store.put(COLLECTION, id, bytes).await?;
        Ok(())
    }

    /// All recommendations for a product, sorted by product id ascending.
    ///
    /// Every match shares the same product id; the sort keeps the output
    /// order stable across repeated calls against a stable snapshot.
    pub async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Vec<RecommendationEntity>, RepositoryError> {
        let mut matches: Vec<_> = self
            .scan()
            .await?
            .into_iter()
            .filter(|r| r.product_id == product_id)
            .collect();
        matches.sort_by_key(|r| r.product_id);
        Ok(matches)
    }

    /// All recommendations with the given recommendation id, sorted by it.
    pub async fn find_by_recommendation_id(
        &self,
        recommendation_id: i32,
    ) -> Result<Vec<RecommendationEntity>, RepositoryError> {
        let mut matches: Vec<_> = self
            .scan()
            .await?
            .into_iter()
            .filter(|r| r.recommendation_id == recommendation_id)
            .collect();
        matches.sort_by_key(|r| r.recommendation_id);
        Ok(matches)
    }

    /// The record with the given natural key, or `None`.
    ///
    /// Uniqueness (enforced on create) means at most one match; if the
    /// store was corrupted from outside, the first match scanned wins.
    pub async fn find_by_natural_key(
        &self,
        product_id: i32,
        recommendation_id: i32,
    ) -> Result<Option<RecommendationEntity>, RepositoryError> {
        Ok(self
            .scan()
            .await?
            .into_iter()
            .find(|r| r.product_id == product_id && r.recommendation_id == recommendation_id))
    }

    /// Whether a record with the given natural key exists.
    pub async fn exists_by_natural_key(
        &self,
        product_id: i32,
        recommendation_id: i32,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .find_by_natural_key(product_id, recommendation_id)
            .await?
            .is_some())
    }

    /// Get a record by storage id.
    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<RecommendationEntity>, RepositoryError> {
        match self.store.get(COLLECTION, id).await? {
            Some(bytes) => {
                let entity = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Serde(e.to_string()))?;
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    /// Whether a record with the given storage id exists.
    pub async fn exists_by_id(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(self.store.get(COLLECTION, id).await?.is_some())
    }

    /// Every record in the collection, in scan order.
    pub async fn find_all(&self) -> Result<Vec<RecommendationEntity>, RepositoryError> {
        self.scan().await
    }

    /// Number of records in the collection.
    pub async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.store.values(COLLECTION).await?.len())
    }

    /// Save a record: create when `id` is unset, versioned update otherwise.
    ///
    /// Create assigns a fresh id and version 0, then fails with
    /// `DuplicateKey` (writing nothing) if the natural key is already
    /// taken. Update fails with `OptimisticLock` (writing nothing) when the
    /// caller's version does not match the stored one, and returns
    /// `Ok(None)` when no record with that id exists — absence on update is
    /// an empty outcome, not an error.
    pub async fn save(
        &self,
        entity: RecommendationEntity,
    ) -> Result<Option<RecommendationEntity>, RepositoryError> {
        match entity.id.clone() {
            None => self.create(entity).await.map(Some),
            Some(id) => self.update(entity, &id).await,
        }
    }

    async fn create(
        &self,
        mut entity: RecommendationEntity,
    ) -> Result<RecommendationEntity, RepositoryError> {
        // Candidate is fully formed before the uniqueness check runs.
        let id = Self::new_entity_id();
        entity.id = Some(id.clone());
        entity.version = 0;

        if self
            .exists_by_natural_key(entity.product_id, entity.recommendation_id)
            .await?
        {
            return Err(RepositoryError::DuplicateKey {
                product_id: entity.product_id,
                recommendation_id: entity.recommendation_id,
            });
        }

        self.put(&id, &entity).await?;
        Ok(entity)
    }

    async fn update(
        &self,
        mut entity: RecommendationEntity,
        id: &str,
    ) -> Result<Option<RecommendationEntity>, RepositoryError> {
        let stored = match self.find_by_id(id).await? {
            Some(stored) => stored,
            None => return Ok(None),
        };

        if stored.version != entity.version {
            return Err(RepositoryError::OptimisticLock {
                id: id.to_string(),
                expected: entity.version,
                actual: stored.version,
            });
        }

        entity.version = stored.version + 1;
        self.put(id, &entity).await?;
        Ok(Some(entity))
    }

    /// Delete a record by storage id. Returns whether it existed; deleting
    /// a missing id is a no-op, never an error.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(self.store.remove(COLLECTION, id).await?)
    }

    /// Delete the given record by its id. An unsaved record (no id) is a
    /// no-op.
    pub async fn delete(&self, entity: &RecommendationEntity) -> Result<bool, RepositoryError> {
        match &entity.id {
            Some(id) => self.delete_by_id(id).await,
            None => Ok(false),
        }
    }

    /// Delete every record for a product. Scan-then-remove; not atomic as
    /// a batch. Returns the number of records removed.
    pub async fn delete_by_product_id(&self, product_id: i32) -> Result<usize, RepositoryError> {
        let matches = self.find_by_product_id(product_id).await?;
        let mut removed = 0;
        for entity in &matches {
            if let Some(id) = &entity.id {
                if self.store.remove(COLLECTION, id).await? {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }

    /// Delete every record in the collection. Scan-then-remove; not atomic
    /// as a batch.
    pub async fn delete_all(&self) -> Result<usize, RepositoryError> {
        let all = self.scan().await?;
        let mut removed = 0;
        for entity in &all {
            if let Some(id) = &entity.id {
                if self.store.remove(COLLECTION, id).await? {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }
}
