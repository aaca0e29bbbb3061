use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::routes::catways::Catway;
use crate::routes::reservations::Reservation;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub title: String,
    pub catways: Vec<Catway>,
    pub reservations: Vec<Reservation>,
    /// Messages flash non nuls au moment du rendu, par slot.
    pub flash: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct NextCatwayNumberResponse {
    #[serde(rename = "nextCatwayNumber")]
    pub next_catway_number: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCatwayRequest {
    #[serde(rename = "type")]
    pub catway_type: Option<String>,
    #[serde(rename = "catwayState")]
    pub catway_state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCatwayStateRequest {
    #[serde(rename = "catwayId")]
    pub catway_id: Option<String>,
    #[serde(rename = "catwayState")]
    pub catway_state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteCatwayRequest {
    #[serde(rename = "catwayNumber")]
    pub catway_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteReservationRequest {
    #[serde(rename = "reservationId")]
    pub reservation_id: Option<String>,
}
