//! The single persisted countdown record

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::KeyValueStore;
use crate::{error::CountdownError, state::CountdownRecord};

/// Key the record is stored under
pub const RECORD_KEY: &str = "countdown";

/// Typed access to the one countdown record in a key-value backend
#[derive(Clone)]
pub struct CountdownStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CountdownStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Persist the record, replacing any previous one
    pub fn set(&self, record: &CountdownRecord) -> Result<(), CountdownError> {
        let json = serde_json::to_string(record)?;
        self.backend.set_item(RECORD_KEY, &json)?;
        info!("Persisted countdown '{}' for {}", record.name, record.date);
        Ok(())
    }

    /// Load the record; malformed data counts as no record
    pub fn get(&self) -> Result<Option<CountdownRecord>, CountdownError> {
        let Some(raw) = self.backend.get_item(RECORD_KEY)? else {
            debug!("No persisted countdown");
            return Ok(None);
        };

        match serde_json::from_str::<CountdownRecord>(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!("Ignoring corrupt countdown record: {}", e);
                Ok(None)
            }
        }
    }

    /// Remove the record if present
    pub fn clear(&self) -> Result<(), CountdownError> {
        self.backend.remove_item(RECORD_KEY)?;
        debug!("Cleared persisted countdown");
        Ok(())
    }
}

impl std::fmt::Debug for CountdownStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownStore").field("key", &RECORD_KEY).finish()
    }
}
