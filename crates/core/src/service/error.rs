use thiserror::Error;

/// Errors surfaced by the auth and todo services.
///
/// The display strings are part of the HTTP contract and are returned
/// verbatim in `{"error": ...}` bodies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("email cannot be empty")]
    EmptyEmail,
    #[error("password cannot be empty")]
    EmptyPassword,
    #[error("todo text cannot be empty")]
    EmptyText,
    #[error("user already exists")]
    UserExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("todo not found")]
    TodoNotFound,
    #[error("unauthorized")]
    Unauthorized,
}

/// Coarse category of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Authentication,
    NotFound,
    Authorization,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Authentication => "authentication",
            ErrorKind::NotFound => "not-found",
            ErrorKind::Authorization => "authorization",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::EmptyEmail | ServiceError::EmptyPassword | ServiceError::EmptyText => {
                ErrorKind::Validation
            }
            ServiceError::UserExists => ErrorKind::Conflict,
            ServiceError::InvalidCredentials | ServiceError::InvalidToken => {
                ErrorKind::Authentication
            }
            ServiceError::TodoNotFound => ErrorKind::NotFound,
            ServiceError::Unauthorized => ErrorKind::Authorization,
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
