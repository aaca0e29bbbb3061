use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// Claims embarquées dans le token porteur.
///
/// Le token est autoporté : aucune copie n'est conservée côté serveur, sa
/// validité ne dépend que de la signature et de `exp`. Il n'existe pas de
/// liste de révocation, l'expiration est le seul mécanisme de fin de vie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Identifiant de l'utilisateur authentifié.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Le token ne se décode pas ou la signature ne correspond pas.
    #[error("Token invalide")]
    Malformed,
    /// Le token se décode mais sa date d'expiration est passée.
    #[error("Token expiré")]
    Expired,
}

/// Signe un token HS256 pour `user_id`, expirant après
/// `Config::jwt_expiration` (24 h par défaut) à compter de l'émission.
pub fn issue_token(user_id: &str, config: &Config) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::seconds(config.jwt_expiration_secs as i64))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
}

/// Vérifie signature et expiration, et rend les claims décodées.
///
/// Contrôle pur et synchrone contre l'horloge murale au moment de l'appel.
pub fn verify_token(token: &str, config: &Config) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    // Pas de tolérance : un token expiré est expiré.
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/test".into(),
            redis_url: "redis://127.0.0.1/".into(),
            secret_key: "une-clef-de-test".into(),
            jwt_expiration_secs: 24 * 3600,
            flash_clear_secs: 10,
            revalidate_subject: false,
            server_host: "::".into(),
            server_port: 3000,
        }
    }

    #[test]
    fn issue_then_verify_returns_original_claims() {
        let config = test_config();
        let token = issue_token("8f2b4a1c", &config).expect("issue");

        let claims = verify_token(&token, &config).expect("verify");
        assert_eq!(claims.sub, "8f2b4a1c");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "8f2b4a1c".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret_key.as_bytes()),
        )
        .expect("encode");

        assert_eq!(verify_token(&token, &config), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        let config = test_config();
        assert_eq!(
            verify_token("pas-un-token", &config),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn wrong_signature_is_malformed() {
        let config = test_config();
        let token = issue_token("8f2b4a1c", &config).expect("issue");

        let mut other = test_config();
        other.secret_key = "une-autre-clef".into();
        assert_eq!(verify_token(&token, &other), Err(TokenError::Malformed));
    }
}
