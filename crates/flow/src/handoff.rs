use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Cross-page record of the confirmed country, written on confirm and read
/// (and cleared) by the planning page on its own mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedCountry {
    pub name: String,
    pub iso_code: String,
    pub selected_at: DateTime<Utc>,
}

/// Single-slot store holding the serialized [`SelectedCountry`].
///
/// The slot keeps the JSON form so it round-trips exactly the way a
/// web-storage key would between pages.
#[derive(Debug, Default)]
pub struct HandoffStore {
    slot: Option<String>,
}

impl HandoffStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, selected: &SelectedCountry) -> Result<(), serde_json::Error> {
        self.slot = Some(serde_json::to_string(selected)?);
        Ok(())
    }

    /// Reads and clears the slot. A corrupt slot is cleared and treated as
    /// absent rather than surfaced as an error.
    pub fn take(&mut self) -> Option<SelectedCountry> {
        let raw = self.slot.take()?;
        match serde_json::from_str(&raw) {
            Ok(selected) => Some(selected),
            Err(e) => {
                warn!(error = %e, "discarding corrupt handoff record");
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}
