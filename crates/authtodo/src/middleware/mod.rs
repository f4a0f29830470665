//! Service decorators and HTTP middleware.

mod instrumented;
mod logging;
mod rate_limit;

pub use instrumented::{InstrumentedAuthService, InstrumentedTodoService};
pub use logging::{LoggingAuthService, LoggingTodoService};
pub use rate_limit::{rate_limit, RateLimit};
