//! # Services
//!
//! Multi-step operations composed from store primitives.
//!
//! - [`catalog`] - supplier/warehouse/product creation, reference checks
//! - [`order`] - the order transaction engine
//!
//! Both return [`ServiceError`], which keeps domain rejections (the operator
//! asked for something that can't be done) apart from storage failures.

pub mod catalog;
pub mod order;

use thiserror::Error;

use crate::error::DbError;
use stockpile_core::{CoreError, ValidationError};

/// Error returned by service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was refused; nothing was written.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The store failed; any open transaction was rolled back.
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Rejected(CoreError::Validation(err))
    }
}

impl ServiceError {
    /// The domain rejection, if this is one.
    pub fn as_rejection(&self) -> Option<&CoreError> {
        match self {
            ServiceError::Rejected(err) => Some(err),
            ServiceError::Storage(_) => None,
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
