//! Error types for the empresa-api crate.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use empresa_core::ValidationError;
use empresa_store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("A manager with email {0} already exists")]
    DuplicateEmail(String),

    #[error("A department named {0} already exists")]
    DuplicateDepartment(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Machine-readable code placed in the GraphQL error `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateEmail(_) | Self::DuplicateDepartment(_) => "DUPLICATE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(ValidationError::NotUnique { field: "email", value }) => {
                Self::DuplicateEmail(value)
            }
            StoreError::Validation(ValidationError::NotUnique { field: "nombre", value }) => {
                Self::DuplicateDepartment(value)
            }
            StoreError::Validation(v) => Self::Validation(v),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        let error = async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code));
        match self {
            Self::Validation(v) => error.extend_with(|_, e| e.set("field", v.field())),
            _ => error,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
