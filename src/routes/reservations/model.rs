use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::catways::Catway;

#[derive(Debug, Serialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    #[serde(rename = "catwayNumber")]
    pub catway_number: i64,
    #[serde(rename = "clientName")]
    pub client_name: String,
    #[serde(rename = "boatName")]
    pub boat_name: String,
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReservationDetails {
    #[serde(rename = "catwayNumber")]
    pub catway_number: i64,
    #[serde(rename = "clientName")]
    pub client_name: String,
    #[serde(rename = "boatName")]
    pub boat_name: String,
    #[serde(rename = "checkIn")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOut")]
    pub check_out: NaiveDate,
}

/// Formulaire d'enregistrement d'une réservation. Tous les champs sont
/// optionnels au niveau du type : la validation se fait dans
/// [`Reservation::create`], champ par champ, avec les messages attendus.
#[derive(Debug, Deserialize)]
pub struct SaveReservationRequest {
    #[serde(rename = "catwayNumber")]
    pub catway_number: Option<String>,
    #[serde(rename = "clientName")]
    pub client_name: Option<String>,
    #[serde(rename = "boatName")]
    pub boat_name: Option<String>,
    #[serde(rename = "checkIn")]
    pub check_in: Option<String>,
    #[serde(rename = "checkOut")]
    pub check_out: Option<String>,
}

fn required(value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::Validation("Tous les champs sont requis.".into())),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Format de date invalide.".into()))
}

impl Reservation {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, catway_number, client_name, boat_name, check_in, check_out, created_at
            FROM reservations
            ORDER BY check_in
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(reservations)
    }

    pub async fn list_by_catway(pool: &PgPool, catway_number: i64) -> Result<Vec<Self>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, catway_number, client_name, boat_name, check_in, check_out, created_at
            FROM reservations
            WHERE catway_number = $1
            ORDER BY check_in
            "#,
        )
        .bind(catway_number)
        .fetch_all(pool)
        .await?;

        Ok(reservations)
    }

    /// Enregistre une réservation après validation : numéro de catway
    /// analysable, catway existant, champs tous présents, dates valides.
    pub async fn create(pool: &PgPool, req: SaveReservationRequest) -> Result<Self, AppError> {
        let catway_number = req
            .catway_number
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .ok_or_else(|| AppError::Validation("Numéro de catway invalide.".into()))?;

        if !Catway::exists(pool, catway_number).await? {
            return Err(AppError::Validation(
                "Ce numéro de catway n'existe pas.".into(),
            ));
        }

        let client_name = required(req.client_name)?;
        let boat_name = required(req.boat_name)?;
        let check_in = parse_date(&required(req.check_in)?)?;
        let check_out = parse_date(&required(req.check_out)?)?;

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (id, catway_number, client_name, boat_name, check_in, check_out)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, catway_number, client_name, boat_name, check_in, check_out, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(catway_number)
        .bind(&client_name)
        .bind(&boat_name)
        .bind(check_in)
        .bind(check_out)
        .fetch_one(pool)
        .await?;

        Ok(reservation)
    }

    pub async fn delete(pool: &PgPool, reservation_id: Option<&str>) -> Result<Self, AppError> {
        let raw = match reservation_id {
            Some(raw) if !raw.trim().is_empty() => raw.trim(),
            _ => return Err(AppError::Validation("L'ID est requis.".into())),
        };

        let id = Uuid::parse_str(raw).map_err(|_| {
            AppError::Validation("L'ID de la réservation fourni est invalide.".into())
        })?;

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            DELETE FROM reservations
            WHERE id = $1
            RETURNING id, catway_number, client_name, boat_name, check_in, check_out, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        reservation.ok_or_else(|| AppError::NotFound("Réservation non trouvée.".into()))
    }

    pub async fn details(
        pool: &PgPool,
        reservation_id: &str,
    ) -> Result<ReservationDetails, AppError> {
        if reservation_id.trim().is_empty() {
            return Err(AppError::Validation(
                "L'ID de la réservation est requis.".into(),
            ));
        }

        let id = Uuid::parse_str(reservation_id.trim()).map_err(|_| {
            AppError::Validation("L'ID de la réservation fourni est invalide.".into())
        })?;

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, catway_number, client_name, boat_name, check_in, check_out, created_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Réservation non trouvée.".into()))?;

        Ok(ReservationDetails {
            catway_number: reservation.catway_number,
            client_name: reservation.client_name,
            boat_name: reservation.boat_name,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
        })
    }

    pub async fn find_by_id_and_catway(
        pool: &PgPool,
        reservation_id: &str,
        catway_number: i64,
    ) -> Result<Option<Self>, AppError> {
        let id = Uuid::parse_str(reservation_id.trim()).map_err(|_| {
            AppError::Validation("L'ID de la réservation fourni est invalide.".into())
        })?;

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, catway_number, client_name, boat_name, check_in, check_out, created_at
            FROM reservations
            WHERE id = $1 AND catway_number = $2
            "#,
        )
        .bind(id)
        .bind(catway_number)
        .fetch_optional(pool)
        .await?;

        Ok(reservation)
    }
}
