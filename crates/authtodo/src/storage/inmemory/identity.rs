//! In-memory identity store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use authtodo_core::identity::{generate_token, validate_credentials, SessionToken, User, UserId};
use authtodo_core::service::{AuthService, Result, ServiceError};

/// Users keyed by email plus live session tokens.
///
/// The two tables are guarded independently. When both are needed the user
/// table is taken first and released before the token table is locked.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityStore {
    users: Arc<RwLock<HashMap<String, User>>>,
    tokens: Arc<RwLock<HashMap<String, UserId>>>,
    next_user_id: Arc<AtomicU64>,
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentityStore {
    /// Creates an empty store. Identifiers start at 1.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            tokens: Arc::new(RwLock::new(HashMap::new())),
            next_user_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

#[async_trait]
impl AuthService for InMemoryIdentityStore {
    async fn signup(&self, email: &str, password: &str) -> Result<UserId> {
        validate_credentials(email, password)?;

        // Check and insert under one write guard so concurrent signups for the
        // same email cannot both pass the existence check.
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(ServiceError::UserExists);
        }

        let id = UserId::new(self.next_user_id.fetch_add(1, Ordering::SeqCst));
        users.insert(email.to_string(), User::new(id, email, password));
        Ok(id)
    }

    async fn login(&self, email: &str, password: &str) -> Result<SessionToken> {
        validate_credentials(email, password)?;

        let user_id = {
            let users = self.users.read().await;
            match users.get(email) {
                Some(user) if user.password_matches(password) => user.id,
                _ => return Err(ServiceError::InvalidCredentials),
            }
        };

        let token = generate_token();
        self.tokens
            .write()
            .await
            .insert(token.as_str().to_string(), user_id);
        Ok(token)
    }

    async fn validate_token(&self, token: &str) -> Result<UserId> {
        let tokens = self.tokens.read().await;
        tokens.get(token).copied().ok_or(ServiceError::InvalidToken)
    }
}
