//! # Actions
//!
//! Everything that can happen in a meeting becomes an `Action`.
//! User clicks the mic button? That's `Action::ToggleLocalMute`.
//! Transport says someone arrived? That's `Action::Join(participant)`.
//!
//! `update()` applies one action to the session and reports what the adapter
//! should do next. UI input and transport events go through the same door, one
//! at a time, in the order they arrived.
//!
//! ```text
//! Session + Action  →  update()  →  Ok(Effect) | Err(SessionError)
//! ```
//!
//! A rejected action leaves the session exactly as it was.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::error::SessionError;
use super::participant::{MediaPatch, Participant};
use super::state::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Roster
    Join(Participant),
    Leave(String),

    // Local media
    ToggleLocalMute,
    ToggleLocalVideo,
    ToggleScreenShare,

    // Remote media
    SetRemoteMedia {
        host_id: String,
        target_id: String,
        patch: MediaPatch,
    },
    MediaChanged {
        actor_id: String,
        target_id: String,
        patch: MediaPatch,
    },

    // Host controls
    RemoveParticipant { host_id: String, target_id: String },
    TransferHost { host_id: String, target_id: String },
    MuteAll { host_id: String },
    SetLocked { host_id: String, locked: bool },

    // Focus
    Pin(String),

    // Chat
    SendChatMessage(String),
    ChatReceived {
        sender_id: String,
        body: String,
        sent_at: Option<DateTime<Utc>>,
    },
    PostSystemEvent(String),
    SetChatOpen(bool),

    LeaveMeeting,
}

/// What the adapter should do after an action was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The local user left; tear the session down.
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Result<Effect, SessionError> {
    debug!("update: {:?}", action);
    let result = apply(session, action);
    if let Err(e) = &result {
        warn!("Action rejected: {}", e);
    }
    result
}

fn apply(session: &mut Session, action: Action) -> Result<Effect, SessionError> {
    match action {
        Action::Join(participant) => session.join(participant)?,
        Action::Leave(id) => session.leave(&id)?,
        Action::ToggleLocalMute => {
            session.toggle_local_mute()?;
        }
        Action::ToggleLocalVideo => {
            session.toggle_local_video()?;
        }
        Action::ToggleScreenShare => {
            session.toggle_screen_share();
        }
        Action::SetRemoteMedia { host_id, target_id, patch } => {
            session.set_remote_media(&host_id, &target_id, patch)?
        }
        Action::MediaChanged { actor_id, target_id, patch } => {
            session.media_changed(&actor_id, &target_id, patch)?
        }
        Action::RemoveParticipant { host_id, target_id } => {
            session.remove_participant(&host_id, &target_id)?
        }
        Action::TransferHost { host_id, target_id } => {
            session.transfer_host(&host_id, &target_id)?
        }
        Action::MuteAll { host_id } => {
            session.mute_all(&host_id)?;
        }
        Action::SetLocked { host_id, locked } => session.set_locked(&host_id, locked)?,
        Action::Pin(id) => {
            session.pin(&id)?;
        }
        Action::SendChatMessage(body) => {
            session.send_chat_message(&body)?;
        }
        Action::ChatReceived { sender_id, body, sent_at } => {
            session.receive_chat_message(&sender_id, &body, sent_at)?;
        }
        Action::PostSystemEvent(body) => {
            session.post_system_event(&body)?;
        }
        Action::SetChatOpen(open) => session.set_chat_open(open),
        Action::LeaveMeeting => {
            info!("Local participant left room {}", session.room_id());
            return Ok(Effect::Quit);
        }
    }
    Ok(Effect::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::focus::FocusState;
    use crate::test_support::test_session;

    #[test]
    fn test_update_applies_in_order() {
        let mut session = test_session();
        let actions = vec![
            Action::Join(Participant::new("2", "Sarah Johnson")),
            Action::ChatReceived {
                sender_id: "2".into(),
                body: "Hey everyone!".into(),
                sent_at: None,
            },
            Action::SendChatMessage("hi Sarah".into()),
            Action::Pin("2".into()),
        ];
        for action in actions {
            assert_eq!(update(&mut session, action), Ok(Effect::None));
        }
        let bodies: Vec<&str> = session.timeline().all().map(|e| e.body.as_str()).collect();
        assert_eq!(
            bodies,
            vec!["Sarah Johnson joined the meeting", "Hey everyone!", "hi Sarah"]
        );
        assert_eq!(session.focus_state(), &FocusState::Focused("2".into()));
    }

    #[test]
    fn test_update_reports_errors() {
        let mut session = test_session();
        let result = update(
            &mut session,
            Action::SetRemoteMedia {
                host_id: "2".into(),
                target_id: "1".into(),
                patch: MediaPatch::muted(true),
            },
        );
        assert!(matches!(result, Err(SessionError::Permission(_))));
    }

    #[test]
    fn test_leave_meeting_quits() {
        let mut session = test_session();
        assert_eq!(update(&mut session, Action::LeaveMeeting), Ok(Effect::Quit));
        assert!(session.local_participant().is_some());
    }

    #[test]
    fn test_toggle_actions() {
        let mut session = test_session();
        update(&mut session, Action::ToggleLocalMute).unwrap();
        update(&mut session, Action::ToggleLocalVideo).unwrap();
        update(&mut session, Action::ToggleScreenShare).unwrap();
        let local = session.local_participant().unwrap();
        assert!(local.is_muted);
        assert!(!local.is_video_on);
        assert!(session.is_screen_sharing());
    }
}
