//! Peuplement de la base : purge les tables puis insère les jeux de
//! données embarqués (catways, réservations, utilisateurs) et recale le
//! compteur de numéros de catway sur le maximum inséré.

use marina_backend::config::Config;
use marina_backend::utils::hash_password;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

#[derive(Deserialize)]
struct SeedCatway {
    #[serde(rename = "catwayNumber")]
    catway_number: i64,
    #[serde(rename = "type")]
    catway_type: String,
    #[serde(rename = "catwayState")]
    catway_state: String,
}

#[derive(Deserialize)]
struct SeedReservation {
    #[serde(rename = "catwayNumber")]
    catway_number: i64,
    #[serde(rename = "clientName")]
    client_name: String,
    #[serde(rename = "boatName")]
    boat_name: String,
    #[serde(rename = "checkIn")]
    check_in: chrono::NaiveDate,
    #[serde(rename = "checkOut")]
    check_out: chrono::NaiveDate,
}

#[derive(Deserialize)]
struct SeedUser {
    name: String,
    email: String,
    password: String,
}

const CATWAYS: &str = include_str!("../../seeds/catways.json");
const RESERVATIONS: &str = include_str!("../../seeds/reservations.json");
const USERS: &str = include_str!("../../seeds/users.json");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Connexion à la base réussie");

    let catways: Vec<SeedCatway> = serde_json::from_str(CATWAYS)?;
    let reservations: Vec<SeedReservation> = serde_json::from_str(RESERVATIONS)?;
    let users: Vec<SeedUser> = serde_json::from_str(USERS)?;

    // Purge des anciennes données
    sqlx::query("DELETE FROM reservations").execute(&pool).await?;
    sqlx::query("DELETE FROM catways").execute(&pool).await?;
    sqlx::query("DELETE FROM users").execute(&pool).await?;

    let max_number = catways.iter().map(|c| c.catway_number).max().unwrap_or(0);

    for catway in &catways {
        sqlx::query(
            r#"
            INSERT INTO catways (id, catway_number, catway_type, catway_state)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(catway.catway_number)
        .bind(&catway.catway_type)
        .bind(&catway.catway_state)
        .execute(&pool)
        .await?;
    }

    for reservation in &reservations {
        sqlx::query(
            r#"
            INSERT INTO reservations (id, catway_number, client_name, boat_name, check_in, check_out)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reservation.catway_number)
        .bind(&reservation.client_name)
        .bind(&reservation.boat_name)
        .bind(reservation.check_in)
        .bind(reservation.check_out)
        .execute(&pool)
        .await?;
    }

    for user in &users {
        let password_hash = hash_password(&user.password)?;
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(user.email.trim().to_lowercase())
        .bind(&password_hash)
        .execute(&pool)
        .await?;
    }

    // Le compteur repart du plus grand numéro inséré
    sqlx::query(
        r#"
        INSERT INTO counters (name, value)
        VALUES ('catway_number', $1)
        ON CONFLICT (name) DO UPDATE SET value = $1
        "#,
    )
    .bind(max_number)
    .execute(&pool)
    .await?;

    tracing::info!(
        "Base peuplée : {} catways, {} réservations, {} utilisateurs",
        catways.len(),
        reservations.len(),
        users.len()
    );

    Ok(())
}
