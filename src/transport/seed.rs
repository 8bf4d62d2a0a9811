//! # Seed Transport
//!
//! Plays back a fixed script of remote events so a session has people in it
//! without a real signaling backend. Scripts are JSON:
//!
//! ```json
//! { "events": [
//!     { "delay_ms": 300, "event": { "type": "participant_joined",
//!         "participant": { "id": "2", "display_name": "Sarah Johnson" } } },
//!     { "delay_ms": 500, "event": { "type": "chat_received",
//!         "sender_id": "2", "body": "Hey everyone!" } }
//! ] }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;

use super::{RealtimeTransport, TransportError, TransportEvent};
use crate::core::participant::Participant;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScriptedEvent {
    /// Pause before this event is delivered.
    #[serde(default)]
    pub delay_ms: u64,
    pub event: TransportEvent,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SeedScript {
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

impl SeedScript {
    /// Three colleagues drift in and say hello.
    pub fn default_meeting() -> Self {
        let sarah = Participant::new("2", "Sarah Johnson")
            .with_avatar("https://api.dicebear.com/7.x/avataaars/svg?seed=Sarah");
        let mut mike = Participant::new("3", "Mike Chen")
            .with_avatar("https://api.dicebear.com/7.x/avataaars/svg?seed=Mike");
        mike.is_muted = true;
        mike.is_video_on = false;
        let emily = Participant::new("4", "Emily Davis")
            .with_avatar("https://api.dicebear.com/7.x/avataaars/svg?seed=Emily");

        let joined = |participant: Participant| TransportEvent::ParticipantJoined { participant };
        let said = |sender_id: &str, body: &str| TransportEvent::ChatReceived {
            sender_id: sender_id.to_string(),
            body: body.to_string(),
            sent_at: None,
        };

        let events = vec![
            (400, joined(sarah)),
            (600, said("2", "Hey everyone! Great to see you all today 👋")),
            (800, joined(mike)),
            (
                600,
                said(
                    "3",
                    "Sorry I'm a bit late! Can someone catch me up on what we've covered so far?",
                ),
            ),
            (500, joined(emily)),
            (700, said("4", "No worries Mike! We just started with introductions")),
        ];

        SeedScript {
            events: events
                .into_iter()
                .map(|(delay_ms, event)| ScriptedEvent { delay_ms, event })
                .collect(),
        }
    }
}

pub struct SeedTransport {
    script: SeedScript,
}

impl SeedTransport {
    pub fn new(script: SeedScript) -> Self {
        Self { script }
    }

    pub fn from_file(path: &Path) -> Result<Self, TransportError> {
        let json = fs::read_to_string(path).map_err(TransportError::Io)?;
        let script: SeedScript =
            serde_json::from_str(&json).map_err(|e| TransportError::Parse(e.to_string()))?;
        debug!("Loaded seed script from {}", path.display());
        Ok(Self::new(script))
    }

    pub fn len(&self) -> usize {
        self.script.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.events.is_empty()
    }
}

#[async_trait]
impl RealtimeTransport for SeedTransport {
    fn name(&self) -> &str {
        "seed"
    }

    async fn run(&self, sender: Sender<TransportEvent>) -> Result<(), TransportError> {
        for scripted in &self.script.events {
            if scripted.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(scripted.delay_ms)).await;
            }
            debug!("Seed transport delivering {:?}", scripted.event);
            sender
                .send(scripted.event.clone())
                .await
                .map_err(|_| TransportError::ChannelClosed)?;
        }
        Ok(())
    }
}

/// A transport with nobody on the other end.
pub struct OfflineTransport;

#[async_trait]
impl RealtimeTransport for OfflineTransport {
    fn name(&self) -> &str {
        "offline"
    }

    async fn run(&self, _sender: Sender<TransportEvent>) -> Result<(), TransportError> {
        Ok(())
    }
}
