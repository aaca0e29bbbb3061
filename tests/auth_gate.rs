//! La garde d'authentification : 401 sans cookie, 403 sur token invalide
//! ou expiré, passage au handler sur token valide.

mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use marina_backend::auth::{Claims, issue_token};
use marina_backend::session::slots;
use serde_json::Value;
use tower::ServiceExt;

use common::{app, session_cookie, test_state};

fn post_delete_reservation(cookie: Option<String>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/dashboard/delete-reservation")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_token_is_rejected_with_401_and_the_handler_never_runs() {
    let state = test_state();
    let sessions = state.sessions.clone();
    let app = app(state);

    let response = app
        .oneshot(post_delete_reservation(None, "reservationId=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let session_id = session_cookie(&response).expect("cookie de session");
    let body = json_body(response).await;
    assert_eq!(body["error"], "Accès non autorisé, token manquant");

    // Aucun effet de bord : aucun slot flash n'a été écrit.
    for slot in slots::ALL {
        assert_eq!(sessions.read(&session_id, slot).await.unwrap(), None);
    }
}

#[tokio::test]
async fn malformed_token_is_rejected_with_403() {
    let state = test_state();
    let app = app(state);

    let response = app
        .oneshot(post_delete_reservation(
            Some("token=nimporte-quoi".into()),
            "reservationId=abc",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Token invalide");
}

#[tokio::test]
async fn expired_token_is_rejected_with_403() {
    let state = test_state();
    let config = state.config.clone();
    let app = app(state);

    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "3f2c8a10-0000-0000-0000-000000000000".into(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
    .unwrap();

    let response = app
        .oneshot(post_delete_reservation(
            Some(format!("token={token}")),
            "reservationId=abc",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Token invalide");
}

#[tokio::test]
async fn valid_token_admits_the_request_to_the_handler() {
    let state = test_state();
    let config = state.config.clone();
    let sessions = state.sessions.clone();
    let app = app(state);

    let token = issue_token("3f2c8a10-0000-0000-0000-000000000000", &config).unwrap();
    let response = app
        .oneshot(post_delete_reservation(
            Some(format!("token={token}")),
            "reservationId=pas-un-uuid",
        ))
        .await
        .unwrap();

    // Le handler a tourné : redirection et flash d'erreur en place.
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");

    let session_id = session_cookie(&response).expect("cookie de session");
    let flash = sessions
        .read(&session_id, slots::ERROR_DELETE_RESERVATION)
        .await
        .unwrap();
    assert_eq!(
        flash.as_deref(),
        Some("L'ID de la réservation fourni est invalide.")
    );
}
