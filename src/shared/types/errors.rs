use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: id.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure of a paginated read: either the fetch or the count failed.
///
/// Carries the originating error unchanged in kind; its message is
/// prefixed so callers can tell a pagination failure apart.
#[derive(Debug, Error)]
#[error("Pagination error: {cause}")]
pub struct PaginationError {
    #[source]
    cause: DomainError,
}

impl PaginationError {
    pub fn new(cause: DomainError) -> Self {
        Self { cause }
    }

    pub fn cause(&self) -> &DomainError {
        &self.cause
    }
}

impl From<DomainError> for PaginationError {
    fn from(cause: DomainError) -> Self {
        Self::new(cause)
    }
}
