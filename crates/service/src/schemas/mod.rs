//! Request and response shapes, independent of the store.
pub mod pet;
