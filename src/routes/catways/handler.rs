use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::AppState;
use crate::error::{AppError, ErrorBody};

use super::model::Catway;
use crate::routes::reservations::Reservation;

#[derive(Debug, Serialize)]
pub struct CatwayReservationsResponse {
    #[serde(rename = "catwayNumber")]
    pub catway_number: i64,
    pub reservations: Vec<Reservation>,
}

fn server_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[axum::debug_handler]
pub async fn list_catways(State(state): State<AppState>) -> Response {
    match Catway::list(&state.pool).await {
        Ok(catways) => Json(catways).into_response(),
        Err(err) => {
            tracing::error!("Erreur lors de la récupération des catways : {:?}", err);
            server_error("Erreur serveur lors de la récupération des catways.")
        }
    }
}

#[axum::debug_handler]
pub async fn catway_detail(
    State(state): State<AppState>,
    Path(catway_number): Path<String>,
) -> Response {
    let result: Result<Catway, AppError> = async {
        let number = catway_number
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::NotFound("Catway non trouvé.".into()))?;
        Catway::find_by_number(&state.pool, number)
            .await?
            .ok_or_else(|| AppError::NotFound("Catway non trouvé.".into()))
    }
    .await;

    match result {
        Ok(catway) => Json(catway).into_response(),
        Err(err) => {
            tracing::error!("Erreur lors de la récupération du catway : {:?}", err);
            server_error("Erreur serveur lors de la récupération du catway.")
        }
    }
}

#[axum::debug_handler]
pub async fn catway_reservations(
    State(state): State<AppState>,
    Path(catway_number): Path<String>,
) -> Response {
    let result: Result<(i64, Vec<Reservation>), AppError> = async {
        let number = catway_number
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Validation("Numéro de catway invalide.".into()))?;
        let reservations = Reservation::list_by_catway(&state.pool, number).await?;
        Ok((number, reservations))
    }
    .await;

    match result {
        Ok((number, reservations)) => Json(CatwayReservationsResponse {
            catway_number: number,
            reservations,
        })
        .into_response(),
        Err(err) => {
            tracing::error!("Erreur lors de la récupération des réservations : {:?}", err);
            server_error("Erreur serveur lors de la récupération des réservations.")
        }
    }
}

#[axum::debug_handler]
pub async fn reservation_detail(
    State(state): State<AppState>,
    Path((catway_number, reservation_id)): Path<(String, String)>,
) -> Response {
    let result: Result<Option<Reservation>, AppError> = async {
        let number = catway_number
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Validation("Numéro de catway invalide.".into()))?;
        Reservation::find_by_id_and_catway(&state.pool, &reservation_id, number).await
    }
    .await;

    match result {
        Ok(Some(reservation)) => Json(reservation).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: "Réservation non trouvée.".into(),
            }),
        )
            .into_response(),
        Err(err) => server_error(&err.to_string()),
    }
}
