//! Form definitions backing the orders routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod list;
pub mod order;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid order id")]
    InvalidOrderId,

    #[error("invalid description")]
    InvalidDescription,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("invalid value")]
    InvalidValue,

    #[error("invalid page size")]
    InvalidPageSize,
}
