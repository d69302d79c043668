//! HTTP transport — axum routers for the four services.
//!
//! Each router maps its service's typed errors to a status code and the
//! shared error body `{path, httpStatus, message, timestamp}`.
//!
//! ## Routes
//!
//! - composite: `GET /product/:id` — the assembled aggregate.
//! - product: `GET /product/:id` — one generated product.
//! - review: `GET /review?productId=N` — generated reviews.
//! - recommendation: `GET /recommendation?productId=N`,
//!   `POST /recommendation`, `DELETE /recommendation?productId=N`.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::api::Recommendation;
use crate::composite::{CompositeSources, ProductCompositeService};
use crate::error::{ApiError, HttpErrorInfo};
use crate::product::ProductService;
use crate::recommendation::{RecommendationEntity, RecommendationService};
use crate::review::ReviewService;
use crate::service_util::ServiceUtil;
use crate::store::KeyValueStore;

/// Map a service error to a status code plus the shared error body.
fn error_response(path: &str, err: &ApiError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = HttpErrorInfo::new(path, status.as_u16(), err.to_string());
    (status, Json(body)).into_response()
}

/// Serve a router at the given address (e.g. `"0.0.0.0:7000"`).
pub async fn serve(app: Router, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}

#[derive(Deserialize)]
struct ProductIdQuery {
    #[serde(rename = "productId")]
    product_id: i32,
}

// =============================================================================
// Composite service
// =============================================================================

/// Router for the composite service: `GET /product/:id`.
pub fn composite_router<I: CompositeSources + 'static>(
    service: Arc<ProductCompositeService<I>>,
) -> Router {
    Router::new()
        .route("/product/:id", get(composite_get_product))
        .with_state(service)
}

async fn composite_get_product<I: CompositeSources + 'static>(
    State(service): State<Arc<ProductCompositeService<I>>>,
    Path(product_id): Path<i32>,
    uri: Uri,
) -> Response {
    match service.get_product(product_id).await {
        Ok(aggregate) => Json(aggregate).into_response(),
        Err(e) => error_response(uri.path(), &e),
    }
}

// =============================================================================
// Product service (stub)
// =============================================================================

/// Router for the product service: `GET /product/:id`.
pub fn product_router(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/product/:id", get(product_get))
        .with_state(service)
}

async fn product_get(
    State(service): State<Arc<ProductService>>,
    Path(product_id): Path<i32>,
    uri: Uri,
) -> Response {
    match service.get_product(product_id) {
        Ok(product) => Json(product).into_response(),
        Err(e) => error_response(uri.path(), &e),
    }
}

// =============================================================================
// Review service (stub)
// =============================================================================

/// Router for the review service: `GET /review?productId=N`.
pub fn review_router(service: Arc<ReviewService>) -> Router {
    Router::new()
        .route("/review", get(review_get))
        .with_state(service)
}

async fn review_get(
    State(service): State<Arc<ReviewService>>,
    Query(query): Query<ProductIdQuery>,
    uri: Uri,
) -> Response {
    match service.get_reviews(query.product_id) {
        Ok(reviews) => Json(reviews).into_response(),
        Err(e) => error_response(uri.path(), &e),
    }
}

// =============================================================================
// Recommendation service
// =============================================================================

/// Shared state for the recommendation router: the service facade plus the
/// instance's own address for stamping responses.
pub struct RecommendationApp<S> {
    pub service: RecommendationService<S>,
    pub service_util: ServiceUtil,
}

impl<S: KeyValueStore> RecommendationApp<S> {
    pub fn new(store: S, service_util: ServiceUtil) -> Self {
        Self {
            service: RecommendationService::new(store),
            service_util,
        }
    }
}

/// Router for the recommendation service.
pub fn recommendation_router<S: KeyValueStore + 'static>(
    app: Arc<RecommendationApp<S>>,
) -> Router {
    Router::new()
        .route(
            "/recommendation",
            get(recommendation_list)
                .post(recommendation_create)
                .delete(recommendation_delete),
        )
        .with_state(app)
}

async fn recommendation_list<S: KeyValueStore + 'static>(
    State(app): State<Arc<RecommendationApp<S>>>,
    Query(query): Query<ProductIdQuery>,
    uri: Uri,
) -> Response {
    if query.product_id < 1 {
        let err = ApiError::InvalidInput(format!("invalid productId: {}", query.product_id));
        return error_response(uri.path(), &err);
    }

    match app.service.find_by_product_id(query.product_id).await {
        Ok(entities) => {
            let list: Vec<Recommendation> = entities
                .iter()
                .map(|e| e.to_api(app.service_util.address()))
                .collect();
            Json(list).into_response()
        }
        Err(e) => error_response(uri.path(), &ApiError::from(e)),
    }
}

async fn recommendation_create<S: KeyValueStore + 'static>(
    State(app): State<Arc<RecommendationApp<S>>>,
    uri: Uri,
    Json(body): Json<Recommendation>,
) -> Response {
    let entity = RecommendationEntity::from_api(&body);
    match app.service.save(entity).await {
        Ok(Some(saved)) => Json(saved.to_api(app.service_util.address())).into_response(),
        Ok(None) => {
            let err = ApiError::NotFound("no recommendation found for the given id".to_string());
            error_response(uri.path(), &err)
        }
        Err(e) => error_response(uri.path(), &ApiError::from(e)),
    }
}

async fn recommendation_delete<S: KeyValueStore + 'static>(
    State(app): State<Arc<RecommendationApp<S>>>,
    Query(query): Query<ProductIdQuery>,
    uri: Uri,
) -> Response {
    match app.service.delete_by_product_id(query.product_id).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => error_response(uri.path(), &ApiError::from(e)),
    }
}
