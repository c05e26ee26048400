use thiserror::Error;

use crate::inventory::ProductId;

/// Error type for request validation and inventory store failures.
///
/// Sorting and searching never fail; a search miss is reported through
/// [`SearchOutcome::NoMatch`](crate::request::SearchOutcome), not here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    #[error("invalid field '{given}': allowed values are {allowed}")]
    InvalidField { given: String, allowed: String },
    #[error("invalid order '{given}': allowed values are {allowed}")]
    InvalidDirection { given: String, allowed: String },
    #[error("value '{value}' for field '{field}' must be a number")]
    NonNumericValue { field: String, value: String },
    #[error("invalid product: {0}")]
    InvalidProduct(String),
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("collection of {count} records exceeds the limit of {limit}")]
    TooManyRecords { count: usize, limit: usize },
}

impl InventoryError {
    /// HTTP status a transport should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            InventoryError::InvalidField { .. }
            | InventoryError::InvalidDirection { .. }
            | InventoryError::NonNumericValue { .. }
            | InventoryError::InvalidProduct(_) => 400,
            InventoryError::NotFound(_) => 404,
            InventoryError::TooManyRecords { .. } => 413,
        }
    }

    /// Returns `true` when the caller sent something invalid.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
