//! Structured logging decorators.
//!
//! One event per call. Success is logged at `info`, failure at `warn`.
//! Passwords and session tokens never reach the log.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use authtodo_core::identity::{SessionToken, UserId};
use authtodo_core::service::{AuthService, Result, TodoService};
use authtodo_core::todo::{TodoId, TodoPage};

pub struct LoggingAuthService {
    next: Arc<dyn AuthService>,
}

impl LoggingAuthService {
    pub fn new(next: Arc<dyn AuthService>) -> Self {
        Self { next }
    }
}

#[async_trait]
impl AuthService for LoggingAuthService {
    async fn signup(&self, email: &str, password: &str) -> Result<UserId> {
        let start = Instant::now();
        let result = self.next.signup(email, password).await;
        let took = start.elapsed();

        match &result {
            Ok(user_id) => tracing::info!(method = "signup", email, %user_id, ?took, "ok"),
            Err(err) => tracing::warn!(method = "signup", email, error = %err, ?took, "failed"),
        }
        result
    }

    async fn login(&self, email: &str, password: &str) -> Result<SessionToken> {
        let start = Instant::now();
        let result = self.next.login(email, password).await;
        let took = start.elapsed();

        match &result {
            Ok(_) => tracing::info!(method = "login", email, token_issued = true, ?took, "ok"),
            Err(err) => tracing::warn!(method = "login", email, error = %err, ?took, "failed"),
        }
        result
    }

    async fn validate_token(&self, token: &str) -> Result<UserId> {
        let start = Instant::now();
        let result = self.next.validate_token(token).await;
        let took = start.elapsed();

        match &result {
            Ok(user_id) => tracing::info!(method = "validate_token", %user_id, ?took, "ok"),
            Err(err) => tracing::warn!(method = "validate_token", error = %err, ?took, "failed"),
        }
        result
    }
}

pub struct LoggingTodoService {
    next: Arc<dyn TodoService>,
}

impl LoggingTodoService {
    pub fn new(next: Arc<dyn TodoService>) -> Self {
        Self { next }
    }
}

#[async_trait]
impl TodoService for LoggingTodoService {
    async fn create_todo(&self, user_id: UserId, text: &str) -> Result<TodoId> {
        let start = Instant::now();
        let result = self.next.create_todo(user_id, text).await;
        let took = start.elapsed();

        match &result {
            Ok(todo_id) => {
                tracing::info!(method = "create_todo", %user_id, %todo_id, ?took, "ok")
            }
            Err(err) => {
                tracing::warn!(method = "create_todo", %user_id, error = %err, ?took, "failed")
            }
        }
        result
    }

    async fn list_todos(&self, user_id: UserId, limit: i64, offset: i64) -> Result<TodoPage> {
        let start = Instant::now();
        let result = self.next.list_todos(user_id, limit, offset).await;
        let took = start.elapsed();

        match &result {
            Ok(page) => tracing::info!(
                method = "list_todos",
                %user_id,
                limit,
                offset,
                count = page.items.len(),
                total = page.total,
                ?took,
                "ok"
            ),
            Err(err) => tracing::warn!(
                method = "list_todos",
                %user_id,
                limit,
                offset,
                error = %err,
                ?took,
                "failed"
            ),
        }
        result
    }

    async fn complete_todo(&self, user_id: UserId, todo_id: TodoId) -> Result<()> {
        let start = Instant::now();
        let result = self.next.complete_todo(user_id, todo_id).await;
        let took = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(method = "complete_todo", %user_id, %todo_id, ?took, "ok"),
            Err(err) => tracing::warn!(
                method = "complete_todo",
                %user_id,
                %todo_id,
                error = %err,
                ?took,
                "failed"
            ),
        }
        result
    }
}
