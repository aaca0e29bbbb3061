use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

/// Catway : appontement identifié par un numéro séquentiel.
#[derive(Debug, Serialize, FromRow)]
pub struct Catway {
    pub id: Uuid,
    #[serde(rename = "catwayNumber")]
    pub catway_number: i64,
    #[serde(rename = "type")]
    pub catway_type: String,
    #[serde(rename = "catwayState")]
    pub catway_state: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CatwayDetails {
    #[serde(rename = "type")]
    pub catway_type: String,
    #[serde(rename = "catwayState")]
    pub catway_state: String,
}

impl Catway {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let catways = sqlx::query_as::<_, Catway>(
            r#"
            SELECT id, catway_number, catway_type, catway_state, created_at, updated_at
            FROM catways
            ORDER BY catway_number
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(catways)
    }

    /// Prochain numéro affiché dans le formulaire de création. Lecture
    /// seule : l'attribution effective passe par [`Catway::allocate_number`].
    pub async fn next_number(pool: &PgPool) -> Result<i64, AppError> {
        let (next,): (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(MAX(catway_number), 0) + 1
            FROM catways
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(next)
    }

    /// Attribution atomique du prochain numéro de catway.
    ///
    /// Un compteur dédié, incrémenté par un `INSERT .. ON CONFLICT ..
    /// RETURNING`, garantit que deux créations concurrentes ne peuvent pas
    /// obtenir le même numéro.
    pub async fn allocate_number(pool: &PgPool) -> Result<i64, AppError> {
        let (number,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO counters (name, value)
            VALUES ('catway_number', 1)
            ON CONFLICT (name) DO UPDATE SET value = counters.value + 1
            RETURNING value
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(number)
    }

    pub async fn create(
        pool: &PgPool,
        catway_type: &str,
        catway_state: &str,
    ) -> Result<Self, AppError> {
        let number = Self::allocate_number(pool).await?;

        let catway = sqlx::query_as::<_, Catway>(
            r#"
            INSERT INTO catways (id, catway_number, catway_type, catway_state)
            VALUES ($1, $2, $3, $4)
            RETURNING id, catway_number, catway_type, catway_state, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(number)
        .bind(catway_type)
        .bind(catway_state)
        .fetch_one(pool)
        .await?;

        Ok(catway)
    }

    pub async fn update_state(
        pool: &PgPool,
        catway_id: &str,
        catway_state: &str,
    ) -> Result<Self, AppError> {
        let id = Uuid::parse_str(catway_id.trim())
            .map_err(|_| AppError::Validation("L'ID du catway fourni est invalide.".into()))?;

        let catway = sqlx::query_as::<_, Catway>(
            r#"
            UPDATE catways
            SET catway_state = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, catway_number, catway_type, catway_state, created_at, updated_at
            "#,
        )
        .bind(catway_state)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        catway.ok_or_else(|| AppError::NotFound("Catway non trouvé.".into()))
    }

    pub async fn delete_by_number(pool: &PgPool, catway_number: i64) -> Result<Self, AppError> {
        let catway = sqlx::query_as::<_, Catway>(
            r#"
            DELETE FROM catways
            WHERE catway_number = $1
            RETURNING id, catway_number, catway_type, catway_state, created_at, updated_at
            "#,
        )
        .bind(catway_number)
        .fetch_optional(pool)
        .await?;

        catway.ok_or_else(|| AppError::NotFound("Catway non trouvé.".into()))
    }

    pub async fn find_by_number(pool: &PgPool, catway_number: i64) -> Result<Option<Self>, AppError> {
        let catway = sqlx::query_as::<_, Catway>(
            r#"
            SELECT id, catway_number, catway_type, catway_state, created_at, updated_at
            FROM catways
            WHERE catway_number = $1
            "#,
        )
        .bind(catway_number)
        .fetch_optional(pool)
        .await?;

        Ok(catway)
    }

    pub async fn details(pool: &PgPool, catway_number: i64) -> Result<CatwayDetails, AppError> {
        let catway = Self::find_by_number(pool, catway_number)
            .await?
            .ok_or_else(|| AppError::NotFound("Catway non trouvé.".into()))?;

        Ok(CatwayDetails {
            catway_type: catway.catway_type,
            catway_state: catway.catway_state,
        })
    }

    pub async fn exists(pool: &PgPool, catway_number: i64) -> Result<bool, AppError> {
        Ok(Self::find_by_number(pool, catway_number).await?.is_some())
    }
}
