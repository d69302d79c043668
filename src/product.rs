//! Product service — stub data generator behind the product boundary.

use tracing::debug;

use crate::api::Product;
use crate::error::ApiError;
use crate::service_util::ServiceUtil;

/// Product id that deterministically does not exist.
const MISSING_PRODUCT_ID: i32 = 13;

/// Serves generated products by id.
pub struct ProductService {
    service_util: ServiceUtil,
}

impl ProductService {
    pub fn new(service_util: ServiceUtil) -> Self {
        Self { service_util }
    }

    pub fn get_product(&self, product_id: i32) -> Result<Product, ApiError> {
        debug!("/product return the found product for productId={}", product_id);

        if product_id < 1 {
            return Err(ApiError::InvalidInput(format!(
                "invalid productId: {}",
                product_id
            )));
        }
        if product_id == MISSING_PRODUCT_ID {
            return Err(ApiError::NotFound(format!(
                "no product found for productId: {}",
                product_id
            )));
        }

        Ok(Product {
            product_id,
            name: format!("name-{}", product_id),
            weight: 123,
            service_address: self.service_util.address().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ProductService {
        ProductService::new(ServiceUtil::with_address("test-host:7001"))
    }

    #[test]
    fn returns_generated_product() {
        let product = service().get_product(7).unwrap();
        assert_eq!(product.product_id, 7);
        assert_eq!(product.name, "name-7");
        assert_eq!(product.weight, 123);
        assert_eq!(product.service_address, "test-host:7001");
    }

    #[test]
    fn non_positive_id_is_invalid() {
        assert!(matches!(
            service().get_product(0),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn id_13_is_not_found() {
        assert!(matches!(
            service().get_product(13),
            Err(ApiError::NotFound(_))
        ));
    }
}
