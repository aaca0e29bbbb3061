use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use uuid::Uuid;

use crate::session::{SESSION_COOKIE, SessionId};

/// Attache un identifiant de session à chaque requête.
///
/// L'identifiant vient du cookie `session` s'il existe, sinon il est créé
/// et posé sur la réponse. Le cookie n'a pas de Max-Age : il vit le temps
/// de la session du navigateur, l'expiration des messages flash étant
/// gérée côté serveur.
pub async fn session_middleware(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let (session_id, is_new) = match jar.get(SESSION_COOKIE) {
        Some(cookie) => (cookie.value().to_string(), false),
        None => (Uuid::new_v4().to_string(), true),
    };

    request
        .extensions_mut()
        .insert(SessionId(session_id.clone()));

    let response = next.run(request).await;

    if is_new {
        let cookie = Cookie::build((SESSION_COOKIE, session_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .build();
        (jar.add(cookie), response).into_response()
    } else {
        response
    }
}
