use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthMessage {
    pub message: String,
}

impl AuthMessage {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
