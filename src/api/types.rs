//! Shared types for the API layer.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::auth::SessionStore;

/// Shared context for all API routes and middleware. The database
/// handle is injected here rather than held as a process global, so
/// tests can run each router against its own in-memory database.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<Mutex<Connection>>,
    pub sessions: Arc<Mutex<SessionStore>>,
    pub uploads_dir: PathBuf,
}

impl ApiContext {
    pub fn new(conn: Connection, uploads_dir: PathBuf) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
            uploads_dir,
        }
    }

    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }

    pub fn sessions(&self) -> Result<MutexGuard<'_, SessionStore>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session lock poisoned".into()))
    }
}

/// Success response body: `{"message": ..., "data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_message_and_data() {
        let body = Envelope::new("Created", 42);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "Created");
        assert_eq!(json["data"], 42);
    }
}
