mod pagination;
mod types;

pub use pagination::{
    paginate, sort_newest_first, validate_todo_text, PageWindow, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
pub use types::{Todo, TodoId, TodoPage};
