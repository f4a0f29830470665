//! Metrics decorators: one counter increment and one latency sample per call.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use authtodo_core::identity::{SessionToken, UserId};
use authtodo_core::service::{AuthService, Result, TodoService};
use authtodo_core::todo::{TodoId, TodoPage};

use crate::metrics::record_service_call;

const AUTH: &str = "auth";
const TODO: &str = "todo";

pub struct InstrumentedAuthService {
    next: Arc<dyn AuthService>,
}

impl InstrumentedAuthService {
    pub fn new(next: Arc<dyn AuthService>) -> Self {
        Self { next }
    }
}

#[async_trait]
impl AuthService for InstrumentedAuthService {
    async fn signup(&self, email: &str, password: &str) -> Result<UserId> {
        let start = Instant::now();
        let result = self.next.signup(email, password).await;
        record_service_call(AUTH, "signup", start.elapsed());
        result
    }

    async fn login(&self, email: &str, password: &str) -> Result<SessionToken> {
        let start = Instant::now();
        let result = self.next.login(email, password).await;
        record_service_call(AUTH, "login", start.elapsed());
        result
    }

    async fn validate_token(&self, token: &str) -> Result<UserId> {
        let start = Instant::now();
        let result = self.next.validate_token(token).await;
        record_service_call(AUTH, "validate_token", start.elapsed());
        result
    }
}

pub struct InstrumentedTodoService {
    next: Arc<dyn TodoService>,
}

impl InstrumentedTodoService {
    pub fn new(next: Arc<dyn TodoService>) -> Self {
        Self { next }
    }
}

#[async_trait]
impl TodoService for InstrumentedTodoService {
    async fn create_todo(&self, user_id: UserId, text: &str) -> Result<TodoId> {
        let start = Instant::now();
        let result = self.next.create_todo(user_id, text).await;
        record_service_call(TODO, "create_todo", start.elapsed());
        result
    }

    async fn list_todos(&self, user_id: UserId, limit: i64, offset: i64) -> Result<TodoPage> {
        let start = Instant::now();
        let result = self.next.list_todos(user_id, limit, offset).await;
        record_service_call(TODO, "list_todos", start.elapsed());
        result
    }

    async fn complete_todo(&self, user_id: UserId, todo_id: TodoId) -> Result<()> {
        let start = Instant::now();
        let result = self.next.complete_todo(user_id, todo_id).await;
        record_service_call(TODO, "complete_todo", start.elapsed());
        result
    }
}
