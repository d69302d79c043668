//! Review service — stub data generator behind the review boundary.

use tracing::debug;

use crate::api::Review;
use crate::error::ApiError;
use crate::service_util::ServiceUtil;

/// Product id that deterministically has no reviews.
const NO_REVIEWS_PRODUCT_ID: i32 = 213;

/// Serves generated reviews by product id.
pub struct ReviewService {
    service_util: ServiceUtil,
}

impl ReviewService {
    pub fn new(service_util: ServiceUtil) -> Self {
        Self { service_util }
    }

    pub fn get_reviews(&self, product_id: i32) -> Result<Vec<Review>, ApiError> {
        debug!("/review return reviews for productId={}", product_id);

        if product_id < 1 {
            return Err(ApiError::InvalidInput(format!(
                "invalid productId: {}",
                product_id
            )));
        }
        if product_id == NO_REVIEWS_PRODUCT_ID {
            return Ok(Vec::new());
        }

        let reviews = (1..=3)
            .map(|n| Review {
                product_id,
                review_id: n,
                author: format!("author-{}", n),
                subject: format!("subject-{}", n),
                content: format!("content-{}", n),
                service_address: self.service_util.address().to_string(),
            })
            .collect();

        Ok(reviews)
    }
}
