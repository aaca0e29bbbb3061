mod auth;
mod error_handler;
mod session;

pub use auth::{TOKEN_COOKIE, auth_middleware};
pub use error_handler::log_errors;
pub use session::session_middleware;
