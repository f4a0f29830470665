mod identity;
mod todos;

pub use identity::InMemoryIdentityStore;
pub use todos::InMemoryTodoStore;
