//! Storage backends and the decorators layered over them.
//!
//! The in-memory stores implement the service traits from
//! `authtodo_core::service` directly; the cached decorator wraps any
//! `TodoService`.

pub mod cached;
pub mod inmemory;

pub use cached::CachedTodoService;
pub use inmemory::{InMemoryIdentityStore, InMemoryTodoStore};
