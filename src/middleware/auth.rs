use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::AppState;
use crate::auth::verify_token;
use crate::error::AppError;
use crate::routes::users::User;

/// Nom du cookie portant le token JWT.
pub const TOKEN_COOKIE: &str = "token";

/// Garde d'authentification des routes protégées.
///
/// Machine à états par requête : pas de token → 401 sans invoquer le
/// handler ; token présent mais malformé ou expiré → 403 ; token valide →
/// les claims décodées sont attachées à la requête et le pipeline continue.
/// Le token fait foi : l'existence du sujet n'est pas revérifiée en base,
/// sauf si `REVALIDATE_SUBJECT` est activé.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let claims = verify_token(&token, &state.config).map_err(|_| AppError::Forbidden)?;

    if state.config.revalidate_subject {
        let exists = User::find_by_id_str(&state.pool, &claims.sub).await?.is_some();
        if !exists {
            tracing::warn!("Token valide pour un utilisateur disparu : {}", claims.sub);
            return Err(AppError::Forbidden);
        }
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
