use crate::core::slots;
use crate::domain::model::ConsentRecord;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use chrono::Utc;

/// Persistence half of the cookie banner: who agreed to what, and when.
pub struct ConsentLedger<'a, S: KeyValueStore + ?Sized> {
    storage: &'a S,
    slot: &'a str,
}

impl<'a, S: KeyValueStore + ?Sized> ConsentLedger<'a, S> {
    pub fn new(storage: &'a S, slot: &'a str) -> Self {
        Self { storage, slot }
    }

    /// `None` means the banner should be shown.
    pub fn read(&self) -> Option<ConsentRecord> {
        slots::load_or_none(self.storage, self.slot)
    }

    pub fn accept_all(&self) -> Result<ConsentRecord> {
        self.save(true)
    }

    pub fn reject_optional(&self) -> Result<ConsentRecord> {
        self.save(false)
    }

    pub fn save(&self, analytics: bool) -> Result<ConsentRecord> {
        let record = ConsentRecord {
            necessary: true,
            analytics,
            ts: Utc::now().timestamp_millis(),
        };
        slots::write_json(self.storage, self.slot, &record)?;
        tracing::info!("consent stored (analytics: {})", analytics);
        Ok(record)
    }

    pub fn reset(&self) -> Result<()> {
        self.storage.remove(self.slot)
    }
}
