use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Unique, monotonically assigned todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates an open todo stamped with the current time.
    pub fn new(id: TodoId, user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Sets a specific creation time (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// One page of a user's todos plus the user's full todo count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPage {
    #[serde(rename = "todos")]
    pub items: Vec<Todo>,
    pub total: usize,
}

impl TodoPage {
    pub fn new(items: Vec<Todo>, total: usize) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
