use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};
use thiserror::Error;

/// La persistance de session est indisponible. L'erreur est remontée de
/// façon synchrone à l'appelant ; la perte d'un message flash n'est pas
/// fatale pour l'action HTTP en cours.
#[derive(Error, Debug)]
#[error("Stockage de session indisponible : {0}")]
pub struct SessionError(pub String);

impl From<redis::RedisError> for SessionError {
    fn from(err: redis::RedisError) -> Self {
        SessionError(err.to_string())
    }
}

/// Persistance clef/valeur des sessions, injectée dans le [`SessionStore`].
///
/// Redis en production, une table en mémoire dans les tests.
///
/// [`SessionStore`]: crate::session::SessionStore
#[async_trait]
pub trait SessionBackend: Send + Sync {
    async fn put(&self, key: &str, value: &str) -> Result<(), SessionError>;
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    async fn delete(&self, key: &str) -> Result<(), SessionError>;
}

pub struct RedisSessionBackend {
    client: Arc<RedisClient>,
}

impl RedisSessionBackend {
    pub fn new(client: Arc<RedisClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionBackend for RedisSessionBackend {
    async fn put(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }
}

/// Backend en mémoire pour les tests.
#[derive(Default)]
pub struct MemorySessionBackend {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl SessionBackend for MemorySessionBackend {
    async fn put(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
