use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub secret_key: String,
    pub jwt_expiration_secs: u64,
    pub flash_clear_secs: u64,
    pub revalidate_subject: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        // JWT_EXPIRATION accepte "24" ou "24h"
        let jwt_expiration = env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "24".into())
            .trim_end_matches('h')
            .parse::<u64>()
            .unwrap_or(24);

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            redis_url: env::var("REDIS_URL")?,
            secret_key: env::var("SECRET_KEY")?,
            jwt_expiration_secs: jwt_expiration * 3600,
            flash_clear_secs: env::var("FLASH_CLEAR_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            revalidate_subject: env::var("REVALIDATE_SUBJECT")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "::".into()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        })
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }

    pub fn flash_clear_delay(&self) -> Duration {
        Duration::from_secs(self.flash_clear_secs)
    }
}
