mod token;

pub use token::{Claims, TokenError, issue_token, verify_token};
