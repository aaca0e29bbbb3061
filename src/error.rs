use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::session::SessionError;

/// Erreur applicative commune aux services et aux handlers.
///
/// Le `Display` porte le message destiné à l'utilisateur : c'est lui qui est
/// stocké dans les slots flash et renvoyé dans les corps d'erreur JSON. Les
/// erreurs d'infrastructure sont volontairement réduites à "Erreur serveur".
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Accès non autorisé, token manquant")]
    Unauthorized,

    #[error("Token invalide")]
    Forbidden,

    #[error("Erreur serveur")]
    Database(#[from] sqlx::Error),

    #[error("Erreur serveur")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Erreur serveur")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Erreur serveur")]
    Session(#[from] SessionError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Database(_)
            | AppError::Hash(_)
            | AppError::Token(_)
            | AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Erreur interne : {:?}", self);
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
