//! Service layer for the pet store.
//! - `schemas`: request/response shapes and payload validation.
//! - `db`: data access and statistics, one store interaction per call.
//! - `pagination`: caller-side bounds for list queries.

pub mod errors;
pub mod pagination;
pub mod schemas;
pub mod db;
#[cfg(test)]
pub mod test_support;
