use thiserror::Error;

/// Failures surfaced by the service layer.
///
/// A missing record is not an error here: lookups return `Option`/`bool`
/// and the caller decides how to report absence.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }
}
