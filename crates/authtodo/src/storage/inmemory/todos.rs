//! In-memory todo store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use authtodo_core::identity::UserId;
use authtodo_core::service::{Result, ServiceError, TodoService};
use authtodo_core::todo::{
    paginate, sort_newest_first, validate_todo_text, PageWindow, Todo, TodoId, TodoPage,
};

/// Both views over the same records. `by_owner` holds identifiers into
/// `by_id`, so a todo's state lives in exactly one place.
#[derive(Debug, Default)]
struct TodoTables {
    by_id: HashMap<TodoId, Todo>,
    by_owner: HashMap<UserId, Vec<TodoId>>,
}

/// In-memory storage for todos.
#[derive(Debug, Clone)]
pub struct InMemoryTodoStore {
    tables: Arc<RwLock<TodoTables>>,
    next_todo_id: Arc<AtomicU64>,
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTodoStore {
    /// Creates an empty store. Identifiers start at 1.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(TodoTables::default())),
            next_todo_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Inserts a fully built todo. Used to seed fixed timestamps in tests.
    #[cfg(test)]
    async fn insert(&self, todo: Todo) {
        let mut tables = self.tables.write().await;
        tables.by_owner.entry(todo.user_id).or_default().push(todo.id);
        tables.by_id.insert(todo.id, todo);
    }
}

#[async_trait]
impl TodoService for InMemoryTodoStore {
    async fn create_todo(&self, user_id: UserId, text: &str) -> Result<TodoId> {
        validate_todo_text(text)?;

        let id = TodoId::new(self.next_todo_id.fetch_add(1, Ordering::SeqCst));
        let todo = Todo::new(id, user_id, text);

        let mut tables = self.tables.write().await;
        tables.by_owner.entry(user_id).or_default().push(id);
        tables.by_id.insert(id, todo);
        Ok(id)
    }

    async fn list_todos(&self, user_id: UserId, limit: i64, offset: i64) -> Result<TodoPage> {
        let window = PageWindow::normalize(limit, offset);

        let mut todos: Vec<Todo> = {
            let tables = self.tables.read().await;
            let Some(ids) = tables.by_owner.get(&user_id) else {
                return Ok(TodoPage::empty());
            };
            ids.iter()
                .filter_map(|id| tables.by_id.get(id).cloned())
                .collect()
        };

        sort_newest_first(&mut todos);
        Ok(paginate(todos, window))
    }

    async fn complete_todo(&self, user_id: UserId, todo_id: TodoId) -> Result<()> {
        let mut tables = self.tables.write().await;
        let todo = tables
            .by_id
            .get_mut(&todo_id)
            .ok_or(ServiceError::TodoNotFound)?;

        if todo.user_id != user_id {
            return Err(ServiceError::Unauthorized);
        }

        todo.completed = true;
        Ok(())
    }
}
