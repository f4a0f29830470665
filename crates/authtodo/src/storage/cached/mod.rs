//! Caching decorators over the storage backends.

mod todos;

pub use todos::CachedTodoService;
