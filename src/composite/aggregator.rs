//! ProductCompositeService — concurrent fan-out and merge.

use tracing::debug;

use super::{
    CompositeSources, ProductAggregate, RecommendationSummary, ReviewSummary, ServiceAddresses,
};
use crate::api::{Product, Recommendation, Review};
use crate::error::ApiError;

/// Aggregates one product with its recommendations and reviews.
///
/// The three upstream reads are issued concurrently; none depends on
/// another. When the product read decides the outcome, the sibling reads
/// are not cancelled — their results are discarded.
pub struct ProductCompositeService<I> {
    sources: I,
    service_address: String,
}

impl<I: CompositeSources> ProductCompositeService<I> {
    pub fn new(sources: I, service_address: impl Into<String>) -> Self {
        Self {
            sources,
            service_address: service_address.into(),
        }
    }

    /// Fetch and assemble the composite view for `product_id`.
    ///
    /// Fails with `InvalidInput` for a non-positive id before any upstream
    /// call, and with `NotFound` when the product does not exist —
    /// regardless of what the other two reads returned.
    pub async fn get_product(&self, product_id: i32) -> Result<ProductAggregate, ApiError> {
        if product_id < 1 {
            return Err(ApiError::InvalidInput(format!(
                "invalid productId: {}",
                product_id
            )));
        }

        let (product, recommendations, reviews) = tokio::join!(
            self.sources.product(product_id),
            self.sources.recommendations(product_id),
            self.sources.reviews(product_id),
        );

        let product = product?.ok_or_else(|| {
            ApiError::NotFound(format!("no product found for productId: {}", product_id))
        })?;
        let recommendations = recommendations?;
        let reviews = reviews?;

        debug!(
            "assembling aggregate for productId={}: {} recommendations, {} reviews",
            product_id,
            recommendations.len(),
            reviews.len()
        );

        Ok(self.assemble(product, recommendations, reviews))
    }

    fn assemble(
        &self,
        product: Product,
        recommendations: Vec<Recommendation>,
        reviews: Vec<Review>,
    ) -> ProductAggregate {
        let recommendation_summaries = recommendations
            .iter()
            .map(|r| RecommendationSummary {
                recommendation_id: r.recommendation_id,
                author: r.author.clone(),
                rate: r.rate,
            })
            .collect();

        let review_summaries = reviews
            .iter()
            .map(|r| ReviewSummary {
                review_id: r.review_id,
                author: r.author.clone(),
                subject: r.subject.clone(),
            })
            .collect();

        let recommendation_address = recommendations
            .first()
            .map(|r| r.service_address.clone())
            .unwrap_or_default();
        let review_address = reviews
            .first()
            .map(|r| r.service_address.clone())
            .unwrap_or_default();

        ProductAggregate {
            product_id: product.product_id,
            name: product.name,
            weight: product.weight,
            recommendation_summaries,
            review_summaries,
            service_addresses: ServiceAddresses {
                composite_address: self.service_address.clone(),
                product_address: product.service_address,
                review_address,
                recommendation_address,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::IntegrationError;
    use async_trait::async_trait;

    /// Configurable in-process sources.
    struct StubSources {
        product: Option<Product>,
        recommendations: Vec<Recommendation>,
        reviews: Vec<Review>,
        recommendations_fail: bool,
    }

    impl StubSources {
        fn with_product(product_id: i32) -> Self {
            Self {
                product: Some(Product {
                    product_id,
                    name: format!("name-{}", product_id),
                    weight: 123,
                    service_address: "product-host:7001".into(),
                }),
                recommendations: Vec::new(),
                reviews: Vec::new(),
                recommendations_fail: false,
            }
        }

        fn without_product() -> Self {
            Self {
                product: None,
                recommendations: Vec::new(),
                reviews: Vec::new(),
                recommendations_fail: false,
            }
        }
    }

    #[async_trait]
    impl CompositeSources for StubSources {
        async fn product(&self, _product_id: i32) -> Result<Option<Product>, IntegrationError> {
            Ok(self.product.clone())
        }

        async fn recommendations(
            &self,
            _product_id: i32,
        ) -> Result<Vec<Recommendation>, IntegrationError> {
            if self.recommendations_fail {
                return Err(IntegrationError::Transport("connection refused".into()));
            }
            Ok(self.recommendations.clone())
        }

        async fn reviews(&self, _product_id: i32) -> Result<Vec<Review>, IntegrationError> {
            Ok(self.reviews.clone())
        }
    }

    fn recommendation(product_id: i32, recommendation_id: i32) -> Recommendation {
        Recommendation {
            product_id,
            recommendation_id,
            author: format!("author-{}", recommendation_id),
            rate: recommendation_id,
            content: "c".into(),
            service_address: "rec-host:7002".into(),
        }
    }

    fn review(product_id: i32, review_id: i32) -> Review {
        Review {
            product_id,
            review_id,
            author: format!("author-{}", review_id),
            subject: format!("subject-{}", review_id),
            content: "c".into(),
            service_address: "review-host:7003".into(),
        }
    }

    fn service(sources: StubSources) -> ProductCompositeService<StubSources> {
        ProductCompositeService::new(sources, "composite-host:7000")
    }

    #[tokio::test]
    async fn merges_all_three_sources() {
        let mut sources = StubSources::with_product(1);
        sources.recommendations = vec![recommendation(1, 1), recommendation(1, 2)];
        sources.reviews = vec![review(1, 1)];

        let aggregate = service(sources).get_product(1).await.unwrap();

        assert_eq!(aggregate.product_id, 1);
        assert_eq!(aggregate.name, "name-1");
        assert_eq!(aggregate.weight, 123);
        assert_eq!(aggregate.recommendation_summaries.len(), 2);
        assert_eq!(aggregate.review_summaries.len(), 1);
    }

    #[tokio::test]
    async fn summary_projection_narrows_fields() {
        let mut sources = StubSources::with_product(1);
        sources.recommendations = vec![recommendation(1, 7)];
        sources.reviews = vec![review(1, 9)];

        let aggregate = service(sources).get_product(1).await.unwrap();

        assert_eq!(
            aggregate.recommendation_summaries[0],
            RecommendationSummary {
                recommendation_id: 7,
                author: "author-7".into(),
                rate: 7,
            }
        );
        assert_eq!(
            aggregate.review_summaries[0],
            ReviewSummary {
                review_id: 9,
                author: "author-9".into(),
                subject: "subject-9".into(),
            }
        );
    }

    #[tokio::test]
    async fn empty_recommendations_are_tolerated() {
        let mut sources = StubSources::with_product(1);
        sources.reviews = vec![review(1, 1)];

        let aggregate = service(sources).get_product(1).await.unwrap();

        assert!(aggregate.recommendation_summaries.is_empty());
        assert_eq!(aggregate.review_summaries.len(), 1);
        // Provenance for the empty upstream is blank, not missing.
        assert_eq!(aggregate.service_addresses.recommendation_address, "");
        assert_eq!(
            aggregate.service_addresses.review_address,
            "review-host:7003"
        );
    }

    #[tokio::test]
    async fn missing_product_is_fatal_even_with_reviews_present() {
        let mut sources = StubSources::without_product();
        sources.reviews = vec![review(13, 1)];

        let err = service(sources).get_product(13).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn non_positive_id_is_rejected_before_any_upstream_call() {
        let err = service(StubSources::without_product())
            .get_product(0)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));

        let err = service(StubSources::without_product())
            .get_product(-1)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn upstream_transport_failure_propagates() {
        let mut sources = StubSources::with_product(1);
        sources.recommendations_fail = true;

        let err = service(sources).get_product(1).await.unwrap_err();
        assert!(matches!(err, ApiError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn provenance_reports_all_four_addresses() {
        let mut sources = StubSources::with_product(1);
        sources.recommendations = vec![recommendation(1, 1)];
        sources.reviews = vec![review(1, 1)];

        let aggregate = service(sources).get_product(1).await.unwrap();

        let addresses = &aggregate.service_addresses;
        assert_eq!(addresses.composite_address, "composite-host:7000");
        assert_eq!(addresses.product_address, "product-host:7001");
        assert_eq!(addresses.recommendation_address, "rec-host:7002");
        assert_eq!(addresses.review_address, "review-host:7003");
    }
}
