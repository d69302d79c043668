mod api;
mod composite;
mod error;
mod http;
mod product;
mod recommendation;
mod review;
mod service_util;
mod store;

pub use api::{Product, Recommendation, Review};
pub use composite::{
    CompositeSources, HttpSources, IntegrationError, ProductAggregate, ProductCompositeService,
    RecommendationSummary, ReviewSummary, ServiceAddresses,
};
pub use error::{ApiError, HttpErrorInfo};
pub use http::{
    composite_router, product_router, recommendation_router, review_router, serve,
    RecommendationApp,
};
pub use product::ProductService;
pub use recommendation::{
    RecommendationEntity, RecommendationRepository, RecommendationService, RepositoryError,
};
pub use review::ReviewService;
pub use service_util::ServiceUtil;
pub use store::{InMemoryKeyValueStore, KeyValueStore, StoreError};
