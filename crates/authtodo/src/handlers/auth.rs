//! Signup, login and token validation handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use authtodo_core::identity::UserId;

use crate::{handlers::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserIdResponse {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(default)]
    token: String,
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<UserIdResponse>), AppError> {
    let user_id = state
        .auth
        .signup(&credentials.email, &credentials.password)
        .await?;
    Ok((StatusCode::CREATED, Json(UserIdResponse { user_id })))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state
        .auth
        .login(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(TokenResponse {
        token: token.into_inner(),
    }))
}

/// GET|POST /validate
///
/// The token comes from the `Authorization` header (raw or `Bearer `
/// prefixed), falling back to a JSON `{"token": ...}` body. A missing token
/// validates as the empty string, which is always invalid.
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UserIdResponse>, AppError> {
    let token = token_from_request(&headers, &body);
    let user_id = state.auth.validate_token(&token).await?;
    Ok(Json(UserIdResponse { user_id }))
}

fn token_from_request(headers: &HeaderMap, body: &[u8]) -> String {
    let from_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value))
        .filter(|token| !token.is_empty());

    if let Some(token) = from_header {
        return token.to_string();
    }

    serde_json::from_slice::<TokenBody>(body)
        .map(|body| body.token)
        .unwrap_or_default()
}
