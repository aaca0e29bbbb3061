pub mod auth;
pub mod catways;
pub mod dashboard;
pub mod reservations;
pub mod users;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::AppState;
use crate::middleware::{auth_middleware, log_errors, session_middleware};

/// Assemble le routeur : routes publiques, routes protégées derrière la
/// garde d'authentification, puis les middlewares de session et de
/// journalisation autour de l'ensemble.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/authenticate", post(auth::authenticate))
        .route("/dashboard", get(dashboard::dashboard))
        .route(
            "/dashboard/next-catway-number",
            get(dashboard::next_catway_number),
        )
        .route(
            "/dashboard/catway-details/{catway_number}",
            get(dashboard::catway_details),
        )
        .route(
            "/dashboard/reservation-details/{reservation_id}",
            get(dashboard::reservation_details),
        )
        .route("/catways", get(catways::list_catways))
        .route("/catways/{catway_number}", get(catways::catway_detail))
        .route(
            "/catways/{catway_number}/reservations",
            get(catways::catway_reservations),
        )
        .route(
            "/catways/{catway_number}/reservations/{reservation_id}",
            get(catways::reservation_detail),
        );

    let protected_routes = Router::new()
        .route("/dashboard/create-user", post(dashboard::create_user))
        .route("/dashboard/update-user", post(dashboard::update_user))
        .route("/dashboard/delete-user", post(dashboard::delete_user))
        .route("/dashboard/create-catway", post(dashboard::create_catway))
        .route(
            "/dashboard/update-catway-state",
            post(dashboard::update_catway_state),
        )
        .route("/dashboard/delete-catway", post(dashboard::delete_catway))
        .route(
            "/dashboard/save-reservation",
            post(dashboard::save_reservation),
        )
        .route(
            "/dashboard/delete-reservation",
            post(dashboard::delete_reservation),
        )
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn(session_middleware))
        .layer(from_fn(log_errors))
        .with_state(state)
}
