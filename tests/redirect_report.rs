//! Cycle rapport-redirection : chaque action mutante écrit son résultat
//! dans un slot flash puis redirige vers le tableau de bord.

mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use marina_backend::auth::issue_token;
use marina_backend::session::slots;
use serde_json::Value;
use tower::ServiceExt;

use common::{app, session_cookie, test_state};

fn form_post(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn invalid_reservation_id_redirects_with_the_expected_flash() {
    let state = test_state();
    let config = state.config.clone();
    let sessions = state.sessions.clone();
    let app = app(state);

    let token = issue_token("3f2c8a10-0000-0000-0000-000000000000", &config).unwrap();
    let response = app
        .oneshot(form_post(
            "/dashboard/delete-reservation",
            &format!("token={token}"),
            "reservationId=pas-un-identifiant",
        ))
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");

    let session_id = session_cookie(&response).expect("cookie de session");
    assert_eq!(
        sessions
            .read(&session_id, slots::ERROR_DELETE_RESERVATION)
            .await
            .unwrap()
            .as_deref(),
        Some("L'ID de la réservation fourni est invalide.")
    );
}

#[tokio::test]
async fn missing_fields_on_create_user_report_a_validation_flash() {
    let state = test_state();
    let config = state.config.clone();
    let sessions = state.sessions.clone();
    let app = app(state);

    let token = issue_token("3f2c8a10-0000-0000-0000-000000000000", &config).unwrap();
    let response = app
        .oneshot(form_post(
            "/dashboard/create-user",
            &format!("token={token}"),
            "name=Jean+Dupont",
        ))
        .await
        .unwrap();

    assert!(response.status().is_redirection());

    let session_id = session_cookie(&response).expect("cookie de session");
    assert_eq!(
        sessions
            .read(&session_id, slots::ERROR_CREATE_USER)
            .await
            .unwrap()
            .as_deref(),
        Some("Tous les champs doivent être remplis.")
    );
}

#[tokio::test]
async fn delete_catway_distinguishes_empty_and_invalid_numbers() {
    let state = test_state();
    let config = state.config.clone();
    let sessions = state.sessions.clone();
    let app = app(state);

    let token = issue_token("3f2c8a10-0000-0000-0000-000000000000", &config).unwrap();

    let response = app
        .clone()
        .oneshot(form_post(
            "/dashboard/delete-catway",
            &format!("token={token}"),
            "catwayNumber=",
        ))
        .await
        .unwrap();
    let session_id = session_cookie(&response).expect("cookie de session");
    assert_eq!(
        sessions
            .read(&session_id, slots::ERROR_DELETE_CATWAY)
            .await
            .unwrap()
            .as_deref(),
        Some("Numéro du catway requis.")
    );

    let response = app
        .oneshot(form_post(
            "/dashboard/delete-catway",
            &format!("token={token}"),
            "catwayNumber=abc",
        ))
        .await
        .unwrap();
    let session_id = session_cookie(&response).expect("cookie de session");
    assert_eq!(
        sessions
            .read(&session_id, slots::ERROR_DELETE_CATWAY)
            .await
            .unwrap()
            .as_deref(),
        Some("Numéro de catway invalide.")
    );
}

#[tokio::test]
async fn an_existing_session_cookie_is_reused() {
    let state = test_state();
    let config = state.config.clone();
    let sessions = state.sessions.clone();
    let app = app(state);

    let token = issue_token("3f2c8a10-0000-0000-0000-000000000000", &config).unwrap();
    let response = app
        .oneshot(form_post(
            "/dashboard/delete-reservation",
            &format!("token={token}; session=ma-session-existante"),
            "reservationId=",
        ))
        .await
        .unwrap();

    // Pas de nouveau cookie de session : celui de la requête est repris.
    assert!(session_cookie(&response).is_none());
    assert_eq!(
        sessions
            .read("ma-session-existante", slots::ERROR_DELETE_RESERVATION)
            .await
            .unwrap()
            .as_deref(),
        Some("L'ID est requis.")
    );
}

#[tokio::test]
async fn reservation_details_with_an_invalid_id_returns_400() {
    let state = test_state();
    let app = app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/dashboard/reservation-details/pas-un-identifiant")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "L'ID de la réservation fourni est invalide.");
}
