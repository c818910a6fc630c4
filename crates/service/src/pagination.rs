//! Offset/limit parameters for listing pets.
//!
//! Bounds are checked by the caller before reaching the data access layer,
//! which applies whatever it is given.

use serde::Deserialize;

use crate::errors::ServiceError;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 1000;
/// Largest offset the store accepts.
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// records to skip
    #[serde(default)]
    pub skip: u64,
    /// maximum records to return, `1..=MAX_LIMIT`
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 { DEFAULT_LIMIT }

impl Pagination {
    /// Reject a limit outside `1..=MAX_LIMIT` or a skip above `MAX_SKIP`; returns `(skip, limit)`.
    pub fn validate(self) -> Result<(u64, u64), ServiceError> {
        if self.skip > MAX_SKIP {
            return Err(ServiceError::validation(format!(
                "skip must be at most {MAX_SKIP}, got {}",
                self.skip
            )));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ServiceError::validation(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }
        Ok((self.skip, self.limit))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { skip: 0, limit: DEFAULT_LIMIT } }
}
