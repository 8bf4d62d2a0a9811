//! # Chat Timeline
//!
//! Append-only transcript of the meeting. Sequence ids are handed out in
//! insertion order and that order is the only order: timestamps are carried
//! for display, never for sorting.
//!
//! The timeline also remembers how far the local user has read, which drives
//! the unread indicator on the chat button.

use chrono::{DateTime, Local, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::error::SessionError;
use super::initials::initials;

/// Sender name shown for system events.
pub const SYSTEM_SENDER_NAME: &str = "System";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    #[serde(rename = "message")]
    Message,
    #[serde(rename = "system")]
    System,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub seq: u64,
    pub kind: ChatKind,
    /// `None` for system events.
    pub sender_id: Option<String>,
    /// Name at the time of sending. Later renames do not touch it.
    pub sender_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Display projection of one timeline entry.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub seq: u64,
    pub kind: ChatKind,
    pub sender_name: String,
    /// Avatar fallback; `None` for system events.
    pub initials: Option<String>,
    pub body: String,
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
    /// True when the local participant wrote it.
    pub is_own: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ChatTimeline {
    events: Vec<ChatEvent>,
    next_seq: u64,
    /// Number of events the local user has seen.
    read_through: usize,
}

impl ChatTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Appends an event and assigns it the next sequence id.
    ///
    /// Messages need a sender id, a sender name and a non-blank body. System
    /// events need a non-blank body.
    pub fn append(
        &mut self,
        sender_id: Option<&str>,
        sender_name: &str,
        body: &str,
        kind: ChatKind,
        created_at: DateTime<Utc>,
    ) -> Result<&ChatEvent, SessionError> {
        if body.trim().is_empty() {
            return Err(SessionError::validation("chat body must not be empty"));
        }
        let (sender_id, sender_name) = match kind {
            ChatKind::Message => {
                let id = sender_id
                    .filter(|id| !id.trim().is_empty())
                    .ok_or_else(|| SessionError::validation("chat message needs a sender id"))?;
                if sender_name.trim().is_empty() {
                    return Err(SessionError::validation("chat message needs a sender name"));
                }
                (Some(id.to_string()), sender_name.to_string())
            }
            ChatKind::System => (None, SYSTEM_SENDER_NAME.to_string()),
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        debug!("Timeline: appending {:?} #{}", kind, seq);
        self.events.push(ChatEvent {
            seq,
            kind,
            sender_id,
            sender_name,
            body: body.to_string(),
            created_at,
        });
        Ok(&self.events[self.events.len() - 1])
    }

    /// Every event, oldest first.
    pub fn all(&self) -> impl Iterator<Item = &ChatEvent> + Clone {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&ChatEvent> {
        self.events.last()
    }

    /// Marks everything currently in the timeline as seen.
    pub fn mark_read(&mut self) {
        self.read_through = self.events.len();
    }

    /// Messages from other participants appended since the last `mark_read`.
    /// System events never count as unread.
    pub fn unread_count(&self, local_id: &str) -> usize {
        self.events[self.read_through..]
            .iter()
            .filter(|e| e.kind == ChatKind::Message && e.sender_id.as_deref() != Some(local_id))
            .count()
    }

    /// Formatted view of a single event, if `seq` was ever assigned.
    pub fn line(&self, seq: u64, local_id: &str) -> Option<ChatLine> {
        let idx = self.events.binary_search_by_key(&seq, |e| e.seq).ok()?;
        Some(line_for(&self.events[idx], local_id))
    }

    /// Formatted view of the whole transcript from the local user's perspective.
    pub fn lines(&self, local_id: &str) -> Vec<ChatLine> {
        self.events.iter().map(|e| line_for(e, local_id)).collect()
    }
}

fn line_for(event: &ChatEvent, local_id: &str) -> ChatLine {
    let initials = match event.kind {
        ChatKind::Message => initials(&event.sender_name).ok(),
        ChatKind::System => None,
    };
    ChatLine {
        seq: event.seq,
        kind: event.kind,
        sender_name: event.sender_name.clone(),
        initials,
        body: event.body.clone(),
        time: format_time(event.created_at),
        is_own: event.sender_id.as_deref() == Some(local_id),
    }
}

/// `HH:MM` in the local timezone.
pub fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}
