mod backend;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

pub use backend::{MemorySessionBackend, RedisSessionBackend, SessionBackend, SessionError};

/// Nom du cookie portant l'identifiant de session.
pub const SESSION_COOKIE: &str = "session";

/// Identifiant de session attaché à la requête par le middleware de session.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// Slots de messages flash connus du tableau de bord.
///
/// Un slot contient au plus un message en attente ; une nouvelle écriture
/// écrase la précédente et reprogramme l'effacement.
pub mod slots {
    pub const SUCCESS_CREATE_USER: &str = "successCreateUser";
    pub const ERROR_CREATE_USER: &str = "errorCreateUser";
    pub const SUCCESS_UPDATE_USER: &str = "successUpdateUser";
    pub const ERROR_UPDATE_USER: &str = "errorUpdateUser";
    pub const SUCCESS_DELETE_USER: &str = "successDeleteUser";
    pub const ERROR_DELETE_USER: &str = "errorDeleteUser";
    pub const SUCCESS_CREATE_CATWAY: &str = "successCreateCatway";
    pub const ERROR_CREATE_CATWAY: &str = "errorCreateCatway";
    pub const SUCCESS_UPDATE_CATWAY: &str = "successUpdateCatway";
    pub const ERROR_UPDATE_CATWAY: &str = "errorUpdateCatway";
    pub const SUCCESS_DELETE_CATWAY: &str = "successDeleteCatway";
    pub const ERROR_DELETE_CATWAY: &str = "errorDeleteCatway";
    pub const SUCCESS_SAVE_RESERVATION: &str = "successSaveReservation";
    pub const ERROR_SAVE_RESERVATION: &str = "errorSaveReservation";
    pub const SUCCESS_DELETE_RESERVATION: &str = "successDeleteReservation";
    pub const ERROR_DELETE_RESERVATION: &str = "errorDeleteReservation";

    pub const ALL: [&str; 16] = [
        SUCCESS_CREATE_USER,
        ERROR_CREATE_USER,
        SUCCESS_UPDATE_USER,
        ERROR_UPDATE_USER,
        SUCCESS_DELETE_USER,
        ERROR_DELETE_USER,
        SUCCESS_CREATE_CATWAY,
        ERROR_CREATE_CATWAY,
        SUCCESS_UPDATE_CATWAY,
        ERROR_UPDATE_CATWAY,
        SUCCESS_DELETE_CATWAY,
        ERROR_DELETE_CATWAY,
        SUCCESS_SAVE_RESERVATION,
        ERROR_SAVE_RESERVATION,
        SUCCESS_DELETE_RESERVATION,
        ERROR_DELETE_RESERVATION,
    ];
}

/// Magasin de messages flash par session.
///
/// Chaque écriture programme l'effacement du slot après `clear_after` ;
/// une réécriture remplace la valeur ET le minuteur (dernier écrivain
/// gagnant sur les deux plans). Un compteur de génération par
/// (session, slot) empêche un minuteur périmé d'effacer une valeur plus
/// récente. Le verrou couvre les écritures du backend : un minuteur qui
/// observe sa génération courante ne peut pas croiser une écriture
/// concurrente plus récente.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
    clear_after: Duration,
    generations: Arc<Mutex<HashMap<(String, String), u64>>>,
}

fn flash_key(session_id: &str, slot: &str) -> String {
    format!("session:{}:flash:{}", session_id, slot)
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SessionBackend>, clear_after: Duration) -> Self {
        Self {
            backend,
            clear_after,
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Écrase le slot et reprogramme son effacement.
    pub async fn set(
        &self,
        session_id: &str,
        slot: &str,
        message: &str,
    ) -> Result<(), SessionError> {
        let entry = (session_id.to_string(), slot.to_string());
        let generation = {
            let mut generations = self.generations.lock().await;
            let counter = generations.entry(entry.clone()).or_insert(0);
            *counter += 1;
            let generation = *counter;
            self.backend
                .put(&flash_key(session_id, slot), message)
                .await?;
            generation
        };

        let backend = Arc::clone(&self.backend);
        let generations = Arc::clone(&self.generations);
        let key = flash_key(session_id, slot);
        let delay = self.clear_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut generations = generations.lock().await;
            // Une écriture ou un effacement plus récent a repris la main.
            if generations.get(&entry) != Some(&generation) {
                return;
            }
            if let Err(err) = backend.delete(&key).await {
                tracing::warn!("Effacement du message flash impossible : {}", err);
                return;
            }
            generations.remove(&entry);
        });

        Ok(())
    }

    /// Lit le slot sans effet de bord : l'effacement est purement temporel.
    pub async fn read(&self, session_id: &str, slot: &str) -> Result<Option<String>, SessionError> {
        self.backend.get(&flash_key(session_id, slot)).await
    }

    /// Effacement immédiat, invalide aussi le minuteur en attente.
    pub async fn clear(&self, session_id: &str, slot: &str) -> Result<(), SessionError> {
        let entry = (session_id.to_string(), slot.to_string());
        let mut generations = self.generations.lock().await;
        if let Some(counter) = generations.get_mut(&entry) {
            *counter += 1;
        }
        self.backend.delete(&flash_key(session_id, slot)).await
    }
}
