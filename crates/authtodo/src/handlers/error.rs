use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use authtodo_core::service::{service_error_to_status_code, ServiceError};

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(service_error) = self.0.downcast_ref::<ServiceError>() {
            let code = service_error_to_status_code(service_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            tracing::error!(error = %self.0, "Application error");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status_code, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
