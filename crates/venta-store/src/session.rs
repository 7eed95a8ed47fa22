//! # Session Store
//!
//! The operator identity for the running process, persisted under its own
//! key so a restarted session resumes as the same operator.
//!
//! The session name is what settlement stamps into `Movement.actor`. It is
//! deliberately not the customer name on an order - those come from the
//! submit call. Credential checking is out of scope; whoever the UI layer
//! admits is simply recorded here.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use venta_core::error::ValidationError;

use crate::backend::{StorageBackend, SESSION_KEY};
use crate::error::StoreResult;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionRecord {
    username: Option<String>,
}

/// The current operator, if signed in.
#[derive(Debug)]
pub struct SessionStore {
    record: SessionRecord,
    backend: Box<dyn StorageBackend>,
}

impl SessionStore {
    /// Opens the store, restoring any persisted session.
    pub fn open(backend: Box<dyn StorageBackend>) -> StoreResult<Self> {
        let record = match backend.load(SESSION_KEY)? {
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(record) => record,
                Err(e) => {
                    warn!(key = SESSION_KEY, error = %e, "Malformed record, starting signed out");
                    SessionRecord::default()
                }
            },
            None => SessionRecord::default(),
        };

        Ok(SessionStore { record, backend })
    }

    /// Signs an operator in, replacing any previous session.
    pub fn sign_in(&mut self, username: &str) -> StoreResult<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::Required {
                field: "username".to_string(),
            }
            .into());
        }

        debug!(username = %username, "Operator signed in");
        self.record.username = Some(username.to_string());
        self.persist();
        Ok(())
    }

    /// Signs the current operator out.
    pub fn sign_out(&mut self) {
        if self.record.username.take().is_some() {
            debug!("Operator signed out");
            self.persist();
        }
    }

    /// The signed-in operator, if any.
    pub fn current(&self) -> Option<&str> {
        self.record.username.as_deref()
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.record) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = SESSION_KEY, error = %e, "Failed to serialize session");
                return;
            }
        };

        if let Err(e) = self.backend.save(SESSION_KEY, &payload) {
            warn!(key = SESSION_KEY, error = %e, "Write-through failed; memory is authoritative");
        }
    }
}
