use async_trait::async_trait;

use crate::identity::{SessionToken, UserId};
use crate::todo::{TodoId, TodoPage};

use super::Result;

/// Account registration and session issuance.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new account and returns its identifier.
    async fn signup(&self, email: &str, password: &str) -> Result<UserId>;

    /// Checks credentials and issues a fresh session token.
    async fn login(&self, email: &str, password: &str) -> Result<SessionToken>;

    /// Resolves a session token to its owner.
    async fn validate_token(&self, token: &str) -> Result<UserId>;
}

/// Per-user todo lists.
#[async_trait]
pub trait TodoService: Send + Sync {
    /// Creates an open todo owned by `user_id`.
    async fn create_todo(&self, user_id: UserId, text: &str) -> Result<TodoId>;

    /// Lists one page of the user's todos, newest first.
    ///
    /// `limit` and `offset` are raw request values; implementations
    /// normalize them with [`crate::todo::PageWindow::normalize`].
    async fn list_todos(&self, user_id: UserId, limit: i64, offset: i64) -> Result<TodoPage>;

    /// Marks a todo completed. Only the owner may complete it.
    async fn complete_todo(&self, user_id: UserId, todo_id: TodoId) -> Result<()>;
}
