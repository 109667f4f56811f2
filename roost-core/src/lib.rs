pub mod session;
pub mod search;
pub mod repository;
pub mod favorites;
pub mod pricing;
pub mod booking;
pub mod reporting;

#[cfg(test)]
mod test_support;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFoundError(String),
    #[error("Forbidden: {0}")]
    ForbiddenError(String),
    #[error("Document store error: {0}")]
    StoreError(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::StoreError(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
