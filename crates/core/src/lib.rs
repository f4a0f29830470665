//! Functional core for authtodo.
//!
//! Domain types, the service traits shared by every store and decorator, and
//! the pure functions (validation, pagination, token generation, error
//! mapping) that the shell crate composes. Nothing in here performs I/O.

pub mod cache;
pub mod identity;
pub mod service;
pub mod todo;
