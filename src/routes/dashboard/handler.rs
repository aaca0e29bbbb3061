use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Extension, Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::AppState;
use crate::error::{AppError, ErrorBody};
use crate::routes::catways::Catway;
use crate::routes::reservations::{Reservation, SaveReservationRequest};
use crate::routes::users::User;
use crate::session::{SessionId, slots};

use super::model::{
    CreateCatwayRequest, CreateUserRequest, DashboardResponse, DeleteCatwayRequest,
    DeleteReservationRequest, DeleteUserRequest, NextCatwayNumberResponse, UpdateCatwayStateRequest,
    UpdateUserRequest,
};

/// Cycle rapport-redirection commun à toutes les actions mutantes :
/// valider, exécuter, écrire le flash (succès ou échec), puis rediriger
/// vers le tableau de bord quel que soit le résultat. L'écriture du flash
/// précède toujours la redirection ; sa perte n'est pas fatale.
async fn report(
    state: &AppState,
    session: &SessionId,
    success_slot: &str,
    error_slot: &str,
    outcome: Result<String, AppError>,
) -> Redirect {
    let (slot, message) = match outcome {
        Ok(message) => (success_slot, message),
        Err(err) => {
            tracing::error!("Action refusée ({}) : {}", error_slot, err);
            (error_slot, err.to_string())
        }
    };

    if let Err(err) = state.sessions.set(&session.0, slot, &message).await {
        tracing::error!("Écriture du message flash impossible : {}", err);
    }

    Redirect::to("/dashboard")
}

fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::Validation(message.into())),
    }
}

const ALL_FIELDS_REQUIRED: &str = "Tous les champs doivent être remplis.";

#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<DashboardResponse>, AppError> {
    let catways = Catway::list(&state.pool).await?;
    let reservations = Reservation::list(&state.pool).await?;

    let mut flash = BTreeMap::new();
    for slot in slots::ALL {
        match state.sessions.read(&session.0, slot).await {
            Ok(Some(message)) => {
                flash.insert(slot.to_string(), message);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("Lecture du message flash impossible : {}", err);
            }
        }
    }

    Ok(Json(DashboardResponse {
        title: "Tableau de bord".into(),
        catways,
        reservations,
        flash,
    }))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(req): Form<CreateUserRequest>,
) -> Redirect {
    let outcome: Result<String, AppError> = async {
        let name = required(req.name, ALL_FIELDS_REQUIRED)?;
        let email = required(req.email, ALL_FIELDS_REQUIRED)?;
        let password = required(req.password, ALL_FIELDS_REQUIRED)?;

        User::create(&state.pool, &name, &email, &password).await?;
        Ok("Utilisateur créé avec succès.".to_string())
    }
    .await;

    report(
        &state,
        &session,
        slots::SUCCESS_CREATE_USER,
        slots::ERROR_CREATE_USER,
        outcome,
    )
    .await
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(req): Form<UpdateUserRequest>,
) -> Redirect {
    let outcome: Result<String, AppError> = async {
        let user_id = required(req.user_id, ALL_FIELDS_REQUIRED)?;
        let name = required(req.name, ALL_FIELDS_REQUIRED)?;
        let email = required(req.email, ALL_FIELDS_REQUIRED)?;

        User::update(&state.pool, &user_id, &name, &email).await?;
        Ok("Utilisateur mis à jour avec succès.".to_string())
    }
    .await;

    report(
        &state,
        &session,
        slots::SUCCESS_UPDATE_USER,
        slots::ERROR_UPDATE_USER,
        outcome,
    )
    .await
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(req): Form<DeleteUserRequest>,
) -> Redirect {
    let outcome: Result<String, AppError> = async {
        let user_id = required(req.user_id, ALL_FIELDS_REQUIRED)?;
        let _name = required(req.name, ALL_FIELDS_REQUIRED)?;
        let _email = required(req.email, ALL_FIELDS_REQUIRED)?;

        User::delete(&state.pool, &user_id).await?;
        Ok("Utilisateur supprimé avec succès.".to_string())
    }
    .await;

    report(
        &state,
        &session,
        slots::SUCCESS_DELETE_USER,
        slots::ERROR_DELETE_USER,
        outcome,
    )
    .await
}

#[axum::debug_handler]
pub async fn create_catway(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(req): Form<CreateCatwayRequest>,
) -> Redirect {
    const TYPE_AND_STATE_REQUIRED: &str =
        "Le type du catway et la description de l'état du catway sont requis.";

    let outcome: Result<String, AppError> = async {
        let catway_type = required(req.catway_type, TYPE_AND_STATE_REQUIRED)?;
        let catway_state = required(req.catway_state, TYPE_AND_STATE_REQUIRED)?;

        Catway::create(&state.pool, &catway_type, &catway_state).await?;
        Ok("Catway créé avec succès.".to_string())
    }
    .await;

    report(
        &state,
        &session,
        slots::SUCCESS_CREATE_CATWAY,
        slots::ERROR_CREATE_CATWAY,
        outcome,
    )
    .await
}

#[axum::debug_handler]
pub async fn update_catway_state(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(req): Form<UpdateCatwayStateRequest>,
) -> Redirect {
    let outcome: Result<String, AppError> = async {
        let catway_id = required(req.catway_id, "Tous les champs sont requis.")?;
        let catway_state = required(req.catway_state, "Tous les champs sont requis.")?;

        Catway::update_state(&state.pool, &catway_id, &catway_state).await?;
        Ok("État du catway mis à jour avec succès.".to_string())
    }
    .await;

    report(
        &state,
        &session,
        slots::SUCCESS_UPDATE_CATWAY,
        slots::ERROR_UPDATE_CATWAY,
        outcome,
    )
    .await
}

#[axum::debug_handler]
pub async fn delete_catway(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(req): Form<DeleteCatwayRequest>,
) -> Redirect {
    let outcome: Result<String, AppError> = async {
        let number = match req.catway_number.as_deref().map(str::trim) {
            Some("") => Err(AppError::Validation("Numéro du catway requis.".into())),
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::Validation("Numéro de catway invalide.".into())),
            None => Err(AppError::Validation("Numéro de catway invalide.".into())),
        }?;

        Catway::delete_by_number(&state.pool, number).await?;
        Ok("Catway supprimé avec succès.".to_string())
    }
    .await;

    report(
        &state,
        &session,
        slots::SUCCESS_DELETE_CATWAY,
        slots::ERROR_DELETE_CATWAY,
        outcome,
    )
    .await
}

#[axum::debug_handler]
pub async fn save_reservation(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(req): Form<SaveReservationRequest>,
) -> Redirect {
    let outcome: Result<String, AppError> = async {
        Reservation::create(&state.pool, req).await?;
        Ok("Réservation enregistrée avec succès.".to_string())
    }
    .await;

    report(
        &state,
        &session,
        slots::SUCCESS_SAVE_RESERVATION,
        slots::ERROR_SAVE_RESERVATION,
        outcome,
    )
    .await
}

#[axum::debug_handler]
pub async fn delete_reservation(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(req): Form<DeleteReservationRequest>,
) -> Redirect {
    let outcome: Result<String, AppError> = async {
        Reservation::delete(&state.pool, req.reservation_id.as_deref()).await?;
        Ok("Réservation supprimée avec succès.".to_string())
    }
    .await;

    report(
        &state,
        &session,
        slots::SUCCESS_DELETE_RESERVATION,
        slots::ERROR_DELETE_RESERVATION,
        outcome,
    )
    .await
}

#[axum::debug_handler]
pub async fn next_catway_number(State(state): State<AppState>) -> Response {
    match Catway::next_number(&state.pool).await {
        Ok(next) => Json(NextCatwayNumberResponse {
            next_catway_number: next,
        })
        .into_response(),
        Err(err) => {
            tracing::error!("Erreur serveur : {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Erreur serveur".into(),
                }),
            )
                .into_response()
        }
    }
}

#[axum::debug_handler]
pub async fn catway_details(
    State(state): State<AppState>,
    Path(catway_number): Path<String>,
) -> Response {
    let result: Result<_, AppError> = async {
        let number = catway_number
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::NotFound("Catway non trouvé".into()))?;
        Catway::details(&state.pool, number).await
    }
    .await;

    match result {
        Ok(details) => Json(details).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: "Catway non trouvé".into(),
            }),
        )
            .into_response(),
    }
}

/// Les erreurs de ce point d'accès sortent toutes en 400 avec le message
/// en corps, le sélecteur de réservations du tableau de bord les affiche
/// tel quel.
#[axum::debug_handler]
pub async fn reservation_details(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
) -> Response {
    match Reservation::details(&state.pool, &reservation_id).await {
        Ok(details) => Json(details).into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}
