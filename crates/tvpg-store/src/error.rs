//! Store error types.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    #[error("Variation not found: product {product_id}, variation {variation_id}")]
    VariationNotFound { product_id: u64, variation_id: u64 },
}
