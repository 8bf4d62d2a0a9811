//! # Identity
//!
//! Who the local participant is. Resolved once, before the session exists,
//! and handed to [`Session::new`](crate::core::state::Session::new).

use log::info;

/// Display name used when nothing is configured.
pub const DEFAULT_DISPLAY_NAME: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub participant_id: String,
    pub display_name: String,
}

impl Identity {
    pub fn new(participant_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Fills in whatever the caller could not supply.
    ///
    /// A blank name becomes "You"; a blank or missing id becomes a fresh UUID.
    pub fn resolve(participant_id: Option<&str>, display_name: Option<&str>) -> Self {
        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_string();
        let participant_id = participant_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        info!("Local identity: {} ({})", display_name, participant_id);
        Self {
            participant_id,
            display_name,
        }
    }
}
