//! # Realtime Transport
//!
//! Inbound seam for everything other participants do: arrivals, departures,
//! media changes and chat. A transport pushes `TransportEvent`s into a channel;
//! the adapter turns each into a core `Action` and applies it in arrival order.

pub mod seed;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;

use crate::core::action::Action;
use crate::core::participant::{MediaPatch, Participant};

pub use seed::{OfflineTransport, ScriptedEvent, SeedScript, SeedTransport};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportEvent {
    ParticipantJoined {
        participant: Participant,
    },
    ParticipantLeft {
        id: String,
    },
    MediaChanged {
        actor_id: String,
        target_id: String,
        patch: MediaPatch,
    },
    ChatReceived {
        sender_id: String,
        body: String,
        #[serde(default)]
        sent_at: Option<DateTime<Utc>>,
    },
}

impl From<TransportEvent> for Action {
    fn from(event: TransportEvent) -> Self {
        match event {
            TransportEvent::ParticipantJoined { participant } => Action::Join(participant),
            TransportEvent::ParticipantLeft { id } => Action::Leave(id),
            TransportEvent::MediaChanged { actor_id, target_id, patch } => Action::MediaChanged {
                actor_id,
                target_id,
                patch,
            },
            TransportEvent::ChatReceived { sender_id, body, sent_at } => Action::ChatReceived {
                sender_id,
                body,
                sent_at,
            },
        }
    }
}

/// Errors that can occur while a transport is running or being built.
#[derive(Debug)]
pub enum TransportError {
    /// Could not read the transport's input (e.g. a seed file).
    Io(std::io::Error),
    /// Input was readable but malformed.
    Parse(String),
    /// The receiving side hung up. Not retryable.
    ChannelClosed,
    /// Unknown transport kind in config or CLI.
    Unknown(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Io(e) => write!(f, "transport I/O error: {e}"),
            TransportError::Parse(msg) => write!(f, "transport parse error: {msg}"),
            TransportError::ChannelClosed => write!(f, "channel closed"),
            TransportError::Unknown(kind) => write!(f, "unknown transport: {kind}"),
        }
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    /// Returns the name of the transport.
    fn name(&self) -> &str;

    /// Delivers remote events into `sender` until the transport is exhausted.
    async fn run(&self, sender: Sender<TransportEvent>) -> Result<(), TransportError>;
}

/// Build a transport from its configured kind.
pub fn build_transport(
    kind: &str,
    seed_file: Option<&Path>,
) -> Result<Arc<dyn RealtimeTransport>, TransportError> {
    match kind {
        "offline" => Ok(Arc::new(OfflineTransport)),
        "seed" => {
            let transport = match seed_file {
                Some(path) => SeedTransport::from_file(path)?,
                None => SeedTransport::new(SeedScript::default_meeting()),
            };
            info!("Seed transport ready with {} events", transport.len());
            Ok(Arc::new(transport))
        }
        other => Err(TransportError::Unknown(other.to_string())),
    }
}
