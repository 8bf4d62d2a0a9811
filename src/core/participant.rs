//! # Participant Roster
//!
//! The set of people currently in the session, kept in join order.
//!
//! ```text
//! Roster
//! └── entries: Vec<Participant>   // join order, ids unique
//!     ├── id, display_name
//!     ├── is_host
//!     ├── is_muted, is_video_on
//!     └── avatar_url
//! ```
//!
//! Join order is the default grid order. The participants drawer uses
//! `sorted_view()` instead: hosts first, then by name.

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::SessionError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub is_host: bool,
    #[serde(default)]
    pub is_muted: bool,
    #[serde(default = "default_video_on")]
    pub is_video_on: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

fn default_video_on() -> bool {
    true
}

impl Participant {
    /// A participant with mic on, camera on, no avatar.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_host: false,
            is_muted: false,
            is_video_on: true,
            avatar_url: None,
        }
    }

    pub fn host(mut self) -> Self {
        self.is_host = true;
        self
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.id.trim().is_empty() {
            return Err(SessionError::validation("participant id must not be empty"));
        }
        if self.display_name.trim().is_empty() {
            return Err(SessionError::validation("participant display name must not be empty"));
        }
        Ok(())
    }
}

/// Partial media update. `None` fields are left as they are.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaPatch {
    #[serde(default)]
    pub is_muted: Option<bool>,
    #[serde(default)]
    pub is_video_on: Option<bool>,
}

impl MediaPatch {
    pub fn muted(muted: bool) -> Self {
        Self { is_muted: Some(muted), is_video_on: None }
    }

    pub fn video(on: bool) -> Self {
        Self { is_muted: None, is_video_on: Some(on) }
    }

    pub fn is_empty(&self) -> bool {
        self.is_muted.is_none() && self.is_video_on.is_none()
    }

    fn apply(&self, participant: &mut Participant) {
        if let Some(muted) = self.is_muted {
            participant.is_muted = muted;
        }
        if let Some(on) = self.is_video_on {
            participant.is_video_on = on;
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.entries.iter().find(|p| p.id == id)
    }

    /// Participants in join order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.entries.iter()
    }

    pub fn is_host(&self, id: &str) -> bool {
        self.get(id).is_some_and(|p| p.is_host)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Participant, SessionError> {
        self.entries
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| SessionError::not_found(id))
    }

    /// Inserts a new participant at the end, or replaces an existing one in place.
    ///
    /// Returns `true` if the id was new.
    pub fn upsert(&mut self, participant: Participant) -> Result<bool, SessionError> {
        participant.validate()?;
        match self.position(&participant.id) {
            Some(idx) => {
                debug!("Roster: updating participant {}", participant.id);
                self.entries[idx] = participant;
                Ok(false)
            }
            None => {
                debug!("Roster: appending participant {}", participant.id);
                self.entries.push(participant);
                Ok(true)
            }
        }
    }

    /// Removes and returns the participant. Unknown ids are a no-op so that
    /// duplicate leave events stay harmless.
    pub fn remove(&mut self, id: &str) -> Option<Participant> {
        let idx = self.position(id)?;
        debug!("Roster: removing participant {}", id);
        Some(self.entries.remove(idx))
    }

    pub fn set_media(&mut self, id: &str, patch: MediaPatch) -> Result<(), SessionError> {
        let participant = self.get_mut(id)?;
        patch.apply(participant);
        Ok(())
    }

    pub fn set_host(&mut self, id: &str, is_host: bool) -> Result<(), SessionError> {
        self.get_mut(id)?.is_host = is_host;
        Ok(())
    }

    /// Mutes everyone except `except_id`. Returns the ids whose state changed.
    pub fn mute_all_except(&mut self, except_id: &str) -> Vec<String> {
        self.entries
            .iter_mut()
            .filter(|p| p.id != except_id && !p.is_muted)
            .map(|p| {
                p.is_muted = true;
                p.id.clone()
            })
            .collect()
    }

    /// Hosts first, then display name ignoring case, then join order.
    ///
    /// The view is an eager snapshot: the roster is sorted once, up front, and
    /// later roster changes do not show through.
    pub fn sorted_view(&self, current_user_id: &str) -> SortedView<'_> {
        let mut keyed: Vec<(usize, &Participant)> = self.entries.iter().enumerate().collect();
        keyed.sort_by_cached_key(|(join_idx, p)| {
            (!p.is_host, p.display_name.to_lowercase(), *join_idx)
        });
        let rows = keyed
            .into_iter()
            .map(|(_, participant)| ParticipantRow {
                participant,
                is_local: participant.id == current_user_id,
            })
            .collect();
        SortedView { rows }
    }
}

/// One line in the participants drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantRow<'a> {
    pub participant: &'a Participant,
    pub is_local: bool,
}

impl ParticipantRow<'_> {
    /// Display name, suffixed with "(You)" for the local participant.
    pub fn label(&self) -> String {
        if self.is_local {
            format!("{} (You)", self.participant.display_name)
        } else {
            self.participant.display_name.clone()
        }
    }
}

/// Ordered snapshot of the roster. Iterate as often as needed.
#[derive(Debug, Clone)]
pub struct SortedView<'a> {
    rows: Vec<ParticipantRow<'a>>,
}

impl<'a> SortedView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = ParticipantRow<'a>> + Clone + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.rows
            .iter()
            .map(|row| row.participant.display_name.as_str())
            .collect()
    }
}
