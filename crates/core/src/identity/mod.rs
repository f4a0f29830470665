mod functions;
mod types;

pub use functions::{generate_token, validate_credentials, TOKEN_LENGTH};
pub use types::{SessionToken, User, UserId};
