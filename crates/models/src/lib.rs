//! Persistence model for the pet store: the `pet` entity, connection
//! setup and create-if-missing schema bootstrap.

pub mod db;
pub mod pet;
pub mod schema;
