use rand::{distr::Alphanumeric, Rng};

use crate::service::{Result, ServiceError};

use super::SessionToken;

/// Length of generated session tokens.
pub const TOKEN_LENGTH: usize = 32;

/// Generate a cryptographically random session token.
pub fn generate_token() -> SessionToken {
    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    SessionToken::new(token)
}

/// Reject empty email or password. Email is checked first.
pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.is_empty() {
        return Err(ServiceError::EmptyEmail);
    }
    if password.is_empty() {
        return Err(ServiceError::EmptyPassword);
    }
    Ok(())
}
