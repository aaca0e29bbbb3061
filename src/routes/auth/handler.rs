use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

use crate::AppState;
use crate::auth::issue_token;
use crate::middleware::TOKEN_COOKIE;
use crate::routes::users::User;
use crate::utils::verify_password;

use super::model::{AuthMessage, AuthenticateRequest};

/// Authentifie par email et mot de passe.
///
/// En cas de succès, le token est posé dans un cookie HTTP-only
/// SameSite=Strict et la réponse est une redirection vers le tableau de
/// bord.
#[axum::debug_handler]
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<AuthenticateRequest>,
) -> Response {
    let email = req.email.filter(|v| !v.trim().is_empty());
    let password = req.password.filter(|v| !v.trim().is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthMessage::new("Email et mot de passe requis")),
        )
            .into_response();
    };

    let user = match User::find_by_email(&state.pool, &email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(AuthMessage::new("Utilisateur non trouvé")),
            )
                .into_response();
        }
        Err(err) => {
            tracing::error!("Erreur lors de l'authentification : {:?}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthMessage::new("Erreur serveur")),
            )
                .into_response();
        }
    };

    match verify_password(&password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::FORBIDDEN,
                Json(AuthMessage::new("Mot de passe incorrect")),
            )
                .into_response();
        }
        Err(err) => {
            tracing::error!("Erreur lors de la vérification du mot de passe : {:?}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthMessage::new("Erreur serveur")),
            )
                .into_response();
        }
    }

    let token = match issue_token(&user.id.to_string(), &state.config) {
        Ok(token) => token,
        Err(err) => {
            tracing::error!("Erreur lors de la génération du token : {:?}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthMessage::new("Erreur serveur")),
            )
                .into_response();
        }
    };

    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();

    (jar.add(cookie), Redirect::to("/dashboard")).into_response()
}
