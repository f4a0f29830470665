//! Pure listing functions: window normalization, ordering and slicing.

use crate::service::{Result, ServiceError};

use super::{Todo, TodoPage};

/// Page size used when the caller asks for zero or a negative limit.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Largest page a single listing call returns.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A normalized `[offset, offset + limit)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: usize,
    pub offset: usize,
}

impl PageWindow {
    /// Normalizes raw request values.
    ///
    /// Non-positive limits become [`DEFAULT_PAGE_LIMIT`], limits above
    /// [`MAX_PAGE_LIMIT`] are capped, negative offsets become zero.
    pub fn normalize(limit: i64, offset: i64) -> Self {
        let limit = if limit <= 0 {
            DEFAULT_PAGE_LIMIT
        } else {
            limit.min(MAX_PAGE_LIMIT)
        };
        let offset = offset.max(0);

        Self {
            limit: limit as usize,
            offset: usize::try_from(offset).unwrap_or(usize::MAX),
        }
    }
}

/// Sorts todos most recent first.
///
/// Ties on the creation timestamp break on the identifier, newest first, so
/// the order is total and pagination is reproducible.
pub fn sort_newest_first(todos: &mut [Todo]) {
    todos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Cuts one window out of an already sorted list.
pub fn paginate(todos: Vec<Todo>, window: PageWindow) -> TodoPage {
    let total = todos.len();
    let items = todos
        .into_iter()
        .skip(window.offset)
        .take(window.limit)
        .collect();
    TodoPage::new(items, total)
}

/// Reject empty todo text.
pub fn validate_todo_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(ServiceError::EmptyText);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::UserId;
    use crate::todo::TodoId;
    use chrono::{Duration, TimeZone, Utc};

    fn todo_at(id: u64, seconds: i64) -> Todo {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Todo::new(TodoId::new(id), UserId::new(1), format!("todo {id}"))
            .with_created_at(base + Duration::seconds(seconds))
    }

    fn ids(page: &TodoPage) -> Vec<u64> {
        page.items.iter().map(|t| t.id.get()).collect()
    }

    #[test]
    fn test_normalize_defaults_non_positive_limit() {
        assert_eq!(PageWindow::normalize(0, 0).limit, 50);
        assert_eq!(PageWindow::normalize(-5, 0).limit, 50);
    }

    #[test]
    fn test_normalize_caps_limit() {
        assert_eq!(PageWindow::normalize(101, 0).limit, 100);
        assert_eq!(PageWindow::normalize(100, 0).limit, 100);
        assert_eq!(PageWindow::normalize(7, 0).limit, 7);
    }

    #[test]
    fn test_normalize_clamps_negative_offset() {
        assert_eq!(PageWindow::normalize(10, -3).offset, 0);
        assert_eq!(PageWindow::normalize(10, 4).offset, 4);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut todos = vec![todo_at(1, 0), todo_at(2, 20), todo_at(3, 10)];
        sort_newest_first(&mut todos);

        let order: Vec<u64> = todos.iter().map(|t| t.id.get()).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_breaks_timestamp_ties_by_id() {
        let mut todos = vec![todo_at(4, 5), todo_at(9, 5), todo_at(6, 5), todo_at(1, 6)];
        sort_newest_first(&mut todos);

        let order: Vec<u64> = todos.iter().map(|t| t.id.get()).collect();
        assert_eq!(order, vec![1, 9, 6, 4]);
    }

    #[test]
    fn test_paginate_window_and_total() {
        let todos: Vec<Todo> = (1..=5).map(|i| todo_at(i, i as i64)).collect();
        let page = paginate(todos, PageWindow::normalize(2, 1));

        assert_eq!(page.total, 5);
        assert_eq!(ids(&page), vec![2, 3]);
    }

    #[test]
    fn test_paginate_clips_to_available_length() {
        let todos: Vec<Todo> = (1..=3).map(|i| todo_at(i, i as i64)).collect();
        let page = paginate(todos, PageWindow::normalize(10, 2));

        assert_eq!(page.total, 3);
        assert_eq!(ids(&page), vec![3]);
    }

    #[test]
    fn test_paginate_offset_past_end_is_empty() {
        let todos: Vec<Todo> = (1..=3).map(|i| todo_at(i, i as i64)).collect();
        let page = paginate(todos, PageWindow::normalize(10, 30));

        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_validate_todo_text() {
        assert_eq!(validate_todo_text(""), Err(ServiceError::EmptyText));
        assert_eq!(validate_todo_text("milk"), Ok(()));
    }
}
