use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::utils::hash_password;

/// Utilisateur du port. Le hash du mot de passe n'est jamais sérialisé.
#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn parse_user_id(user_id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(user_id.trim())
        .map_err(|_| AppError::Validation("L'ID utilisateur fourni est invalide.".into()))
}

impl User {
    /// Crée un utilisateur avec un mot de passe haché.
    ///
    /// L'email est normalisé en minuscules et son unicité est vérifiée
    /// avant insertion.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AppError> {
        let email = email.trim().to_lowercase();

        if Self::find_by_email(pool, &email).await?.is_some() {
            return Err(AppError::Validation(
                "Un utilisateur avec cet email existe déjà.".into(),
            ));
        }

        let password_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Recherche par identifiant textuel ; un identifiant inanalysable est
    /// traité comme un utilisateur inexistant.
    pub async fn find_by_id_str(pool: &PgPool, user_id: &str) -> Result<Option<Self>, AppError> {
        let Ok(id) = Uuid::parse_str(user_id.trim()) else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn update(
        pool: &PgPool,
        user_id: &str,
        name: &str,
        email: &str,
    ) -> Result<Self, AppError> {
        let id = parse_user_id(user_id)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, email = $2, updated_at = now()
            WHERE id = $3
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email.trim().to_lowercase())
        .bind(id)
        .fetch_optional(pool)
        .await?;

        user.ok_or_else(|| AppError::NotFound("Utilisateur non trouvé.".into()))
    }

    pub async fn delete(pool: &PgPool, user_id: &str) -> Result<Self, AppError> {
        let id = parse_user_id(user_id)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        user.ok_or_else(|| AppError::NotFound("Utilisateur non trouvé.".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_user_id_is_a_validation_error() {
        let err = parse_user_id("pas-un-uuid").unwrap_err();
        assert_eq!(err.to_string(), "L'ID utilisateur fourni est invalide.");
    }
}
