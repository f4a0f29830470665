pub mod auth;
pub mod error;
pub mod health;
pub mod todos;

pub use error::AppError;
