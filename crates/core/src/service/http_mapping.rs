//! Pure mapping from service errors to HTTP status codes.

use super::{ErrorKind, ServiceError};

/// Maps a [`ServiceError`] to an HTTP status code by its kind.
///
/// - validation -> 400
/// - authentication -> 401
/// - authorization -> 403
/// - not-found -> 404
/// - conflict -> 409
///
/// ```
/// use authtodo_core::service::{service_error_to_status_code, ServiceError};
///
/// assert_eq!(service_error_to_status_code(&ServiceError::UserExists), 409);
/// ```
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error.kind() {
        ErrorKind::Validation => 400,
        ErrorKind::Authentication => 401,
        ErrorKind::Authorization => 403,
        ErrorKind::NotFound => 404,
        ErrorKind::Conflict => 409,
    }
}
