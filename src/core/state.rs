//! # Session State
//!
//! The Session State Manager. Owns everything a meeting view renders from and
//! is the only thing that mutates it.
//!
//! ```text
//! Session
//! ├── local_id: String              // always present in the roster
//! ├── room_id: String               // meeting room token
//! ├── roster: Roster                // participants, join order
//! ├── focus: FocusController        // at most one pin, never dangling
//! ├── timeline: ChatTimeline        // append-only chat + system events
//! ├── media: Arc<dyn MediaControlPort>
//! ├── announce_membership: bool     // post join/leave system events
//! ├── locked: bool                  // refuse new joins
//! ├── screen_sharing: bool          // local screen share flag
//! ├── chat_open: bool               // chat drawer visible (drives unread)
//! └── subscribers: Vec<Sender>      // StateChange listeners
//! ```
//!
//! Every operation validates first and mutates second, so an `Err` always
//! means nothing changed. Host-only operations look up the caller's host flag
//! in the roster at call time.

use std::sync::{Arc, mpsc};

use chrono::{DateTime, Utc};
use log::{debug, info};

use super::chat::{ChatKind, ChatLine, ChatTimeline};
use super::error::SessionError;
use super::focus::{FocusController, FocusState};
use super::identity::Identity;
use super::layout::Layout;
use super::participant::{MediaPatch, Participant, Roster, SortedView};
use crate::media::MediaControlPort;

/// Length of generated room ids.
const ROOM_ID_LENGTH: usize = 8;

/// Knobs fixed at session start.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub room_id: String,
    /// Whether the local participant starts as host (true when creating a room).
    pub start_as_host: bool,
    /// Post "joined"/"left" system events to the timeline.
    pub announce_membership: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            room_id: generate_room_id(),
            start_as_host: true,
            announce_membership: true,
        }
    }
}

/// Short random room token.
pub fn generate_room_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..ROOM_ID_LENGTH].to_string()
}

/// Which part of the session an operation touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Roster,
    Focus,
    /// A new timeline entry; views use this to scroll the chat to the bottom.
    Timeline { seq: u64 },
    LocalMedia,
    Room,
    ChatDrawer,
}

pub struct Session {
    local_id: String,
    room_id: String,
    roster: Roster,
    focus: FocusController,
    timeline: ChatTimeline,
    media: Arc<dyn MediaControlPort>,
    announce_membership: bool,
    locked: bool,
    screen_sharing: bool,
    chat_open: bool,
    subscribers: Vec<mpsc::Sender<StateChange>>,
}

impl Session {
    pub fn new(
        identity: Identity,
        options: SessionOptions,
        media: Arc<dyn MediaControlPort>,
    ) -> Result<Self, SessionError> {
        let mut local = Participant::new(identity.participant_id.clone(), identity.display_name);
        local.is_host = options.start_as_host;

        let mut roster = Roster::new();
        roster.upsert(local)?;

        info!(
            "Session started in room {} (media: {}, host: {})",
            options.room_id,
            media.name(),
            options.start_as_host
        );

        Ok(Self {
            local_id: identity.participant_id,
            room_id: options.room_id,
            roster,
            focus: FocusController::new(),
            timeline: ChatTimeline::new(),
            media,
            announce_membership: options.announce_membership,
            locked: false,
            screen_sharing: false,
            chat_open: false,
            subscribers: Vec::new(),
        })
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn local_participant(&self) -> Option<&Participant> {
        self.roster.get(&self.local_id)
    }

    pub fn focus_state(&self) -> &FocusState {
        self.focus.state()
    }

    pub fn timeline(&self) -> &ChatTimeline {
        &self.timeline
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_screen_sharing(&self) -> bool {
        self.screen_sharing
    }

    pub fn is_chat_open(&self) -> bool {
        self.chat_open
    }

    /// Whether the local participant may use host controls.
    pub fn is_local_host(&self) -> bool {
        self.roster.is_host(&self.local_id)
    }

    pub fn sorted_view(&self) -> SortedView<'_> {
        self.roster.sorted_view(&self.local_id)
    }

    pub fn layout(&self) -> Result<Layout<'_>, SessionError> {
        self.focus.layout_for(&self.roster)
    }

    pub fn chat_lines(&self) -> Vec<ChatLine> {
        self.timeline.lines(&self.local_id)
    }

    pub fn chat_line(&self, seq: u64) -> Option<ChatLine> {
        self.timeline.line(seq, &self.local_id)
    }

    pub fn unread_count(&self) -> usize {
        self.timeline.unread_count(&self.local_id)
    }

    pub fn has_unread(&self) -> bool {
        self.unread_count() > 0
    }

    /// `<base>/meeting/<room id>`
    pub fn invite_link(&self, base_url: &str) -> String {
        format!("{}/meeting/{}", base_url.trim_end_matches('/'), self.room_id)
    }

    /// Registers a listener. It receives one `StateChange` per area touched by
    /// each successful operation, in operation order.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StateChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // ------------------------------------------------------------------
    // Roster operations
    // ------------------------------------------------------------------

    /// Adds a participant, or refreshes the name and avatar of one already
    /// present. Host and media flags of an existing participant only change
    /// through the host and media operations.
    pub fn join(&mut self, participant: Participant) -> Result<(), SessionError> {
        participant.validate()?;
        if participant.id == self.local_id {
            return Err(SessionError::validation(
                "the local participant cannot be joined from outside",
            ));
        }
        let (participant, is_new) = match self.roster.get(&participant.id) {
            Some(existing) => (
                Participant {
                    is_host: existing.is_host,
                    is_muted: existing.is_muted,
                    is_video_on: existing.is_video_on,
                    ..participant
                },
                false,
            ),
            None if self.locked => return Err(SessionError::permission("meeting is locked")),
            None => (participant, true),
        };

        let name = participant.display_name.clone();
        let announce = is_new && self.announce_membership;
        self.roster.upsert(participant)?;

        let mut changes = vec![StateChange::Roster];
        if announce {
            let seq = self.append_system(&format!("{name} joined the meeting"))?;
            changes.push(StateChange::Timeline { seq });
        }
        self.notify(&changes);
        Ok(())
    }

    /// Removes a participant who left. Unknown ids are ignored; the local
    /// participant cannot be removed this way.
    pub fn leave(&mut self, id: &str) -> Result<(), SessionError> {
        if id == self.local_id {
            return Err(SessionError::validation(
                "the local participant is not removed from its own roster",
            ));
        }
        let Some(removed) = self.roster.remove(id) else {
            debug!("Leave for unknown participant {} ignored", id);
            return Ok(());
        };

        let mut changes = vec![StateChange::Roster];
        if self.focus.on_removed(id) {
            changes.push(StateChange::Focus);
        }
        if self.announce_membership {
            let seq = self.append_system(&format!("{} left the meeting", removed.display_name))?;
            changes.push(StateChange::Timeline { seq });
        }
        self.notify(&changes);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Local media
    // ------------------------------------------------------------------

    /// Flips the local mute flag and tells the media port. Returns the new value.
    pub fn toggle_local_mute(&mut self) -> Result<bool, SessionError> {
        let muted = !self.local()?.is_muted;
        self.roster.set_media(&self.local_id, MediaPatch::muted(muted))?;
        self.media.request_local_mute(muted);
        self.notify(&[StateChange::Roster, StateChange::LocalMedia]);
        Ok(muted)
    }

    /// Flips the local camera flag and tells the media port. Returns the new value.
    pub fn toggle_local_video(&mut self) -> Result<bool, SessionError> {
        let on = !self.local()?.is_video_on;
        self.roster.set_media(&self.local_id, MediaPatch::video(on))?;
        self.media.request_local_video(on);
        self.notify(&[StateChange::Roster, StateChange::LocalMedia]);
        Ok(on)
    }

    pub fn toggle_screen_share(&mut self) -> bool {
        self.screen_sharing = !self.screen_sharing;
        self.media.request_screen_share(self.screen_sharing);
        self.notify(&[StateChange::LocalMedia]);
        self.screen_sharing
    }

    // ------------------------------------------------------------------
    // Remote media
    // ------------------------------------------------------------------

    /// Host changes another participant's media state.
    pub fn set_remote_media(
        &mut self,
        host_id: &str,
        target_id: &str,
        patch: MediaPatch,
    ) -> Result<(), SessionError> {
        self.require_host(host_id)?;
        self.apply_media(target_id, patch)
    }

    /// A media change reported by the transport. A participant may change
    /// their own state; changing anyone else's goes through host validation.
    pub fn media_changed(
        &mut self,
        actor_id: &str,
        target_id: &str,
        patch: MediaPatch,
    ) -> Result<(), SessionError> {
        if actor_id == target_id {
            self.apply_media(target_id, patch)
        } else {
            self.set_remote_media(actor_id, target_id, patch)
        }
    }

    fn apply_media(&mut self, target_id: &str, patch: MediaPatch) -> Result<(), SessionError> {
        self.roster.set_media(target_id, patch)?;
        let mut changes = vec![StateChange::Roster];
        if target_id == self.local_id {
            self.forward_local_patch(patch);
            changes.push(StateChange::LocalMedia);
        }
        self.notify(&changes);
        Ok(())
    }

    fn forward_local_patch(&self, patch: MediaPatch) {
        if let Some(muted) = patch.is_muted {
            self.media.request_local_mute(muted);
        }
        if let Some(on) = patch.is_video_on {
            self.media.request_local_video(on);
        }
    }

    // ------------------------------------------------------------------
    // Host controls
    // ------------------------------------------------------------------

    pub fn remove_participant(&mut self, host_id: &str, target_id: &str) -> Result<(), SessionError> {
        self.require_host(host_id)?;
        if target_id == self.local_id {
            return Err(SessionError::validation("the local participant cannot be removed"));
        }
        let removed = self
            .roster
            .remove(target_id)
            .ok_or_else(|| SessionError::not_found(target_id))?;

        let mut changes = vec![StateChange::Roster];
        if self.focus.on_removed(target_id) {
            changes.push(StateChange::Focus);
        }
        if self.announce_membership {
            let seq = self
                .append_system(&format!("{} was removed from the meeting", removed.display_name))?;
            changes.push(StateChange::Timeline { seq });
        }
        self.notify(&changes);
        Ok(())
    }

    /// Makes `target_id` a host and demotes the caller.
    pub fn transfer_host(&mut self, host_id: &str, target_id: &str) -> Result<(), SessionError> {
        self.require_host(host_id)?;
        let target_name = self
            .roster
            .get(target_id)
            .map(|p| p.display_name.clone())
            .ok_or_else(|| SessionError::not_found(target_id))?;
        if host_id == target_id {
            return Ok(());
        }

        self.roster.set_host(target_id, true)?;
        self.roster.set_host(host_id, false)?;

        let mut changes = vec![StateChange::Roster];
        if self.announce_membership {
            let seq = self.append_system(&format!("{target_name} is now the host"))?;
            changes.push(StateChange::Timeline { seq });
        }
        self.notify(&changes);
        Ok(())
    }

    /// Mutes everyone except the calling host.
    pub fn mute_all(&mut self, host_id: &str) -> Result<usize, SessionError> {
        self.require_host(host_id)?;
        let changed = self.roster.mute_all_except(host_id);
        if changed.is_empty() {
            return Ok(0);
        }

        let mut changes = vec![StateChange::Roster];
        if changed.iter().any(|id| *id == self.local_id) {
            self.media.request_local_mute(true);
            changes.push(StateChange::LocalMedia);
        }
        self.notify(&changes);
        Ok(changed.len())
    }

    /// While locked, ids not already in the roster cannot join.
    pub fn set_locked(&mut self, host_id: &str, locked: bool) -> Result<(), SessionError> {
        self.require_host(host_id)?;
        if self.locked != locked {
            info!("Meeting {}", if locked { "locked" } else { "unlocked" });
            self.locked = locked;
            self.notify(&[StateChange::Room]);
        }
        Ok(())
    }

    fn require_host(&self, id: &str) -> Result<(), SessionError> {
        if self.roster.is_host(id) {
            Ok(())
        } else {
            Err(SessionError::permission(format!("'{id}' is not a host")))
        }
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Pins, switches, or (when already pinned) unpins a participant.
    pub fn pin(&mut self, id: &str) -> Result<FocusState, SessionError> {
        let state = self.focus.pin(id, &self.roster)?.clone();
        self.notify(&[StateChange::Focus]);
        Ok(state)
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    /// Sends a chat message as the local participant. Returns its sequence id.
    pub fn send_chat_message(&mut self, body: &str) -> Result<u64, SessionError> {
        let name = self.local()?.display_name.clone();
        let local_id = self.local_id.clone();
        self.append_message(&local_id, &name, body.trim(), Utc::now())
    }

    /// A chat message delivered by the transport.
    pub fn receive_chat_message(
        &mut self,
        sender_id: &str,
        body: &str,
        sent_at: Option<DateTime<Utc>>,
    ) -> Result<u64, SessionError> {
        let name = self
            .roster
            .get(sender_id)
            .map(|p| p.display_name.clone())
            .ok_or_else(|| SessionError::not_found(sender_id))?;
        self.append_message(sender_id, &name, body.trim(), sent_at.unwrap_or_else(Utc::now))
    }

    pub fn post_system_event(&mut self, body: &str) -> Result<u64, SessionError> {
        let seq = self.append_system(body)?;
        self.notify(&[StateChange::Timeline { seq }]);
        Ok(seq)
    }

    /// Opening the drawer marks everything read.
    pub fn set_chat_open(&mut self, open: bool) {
        self.chat_open = open;
        if open {
            self.timeline.mark_read();
        }
        self.notify(&[StateChange::ChatDrawer]);
    }

    fn append_message(
        &mut self,
        sender_id: &str,
        sender_name: &str,
        body: &str,
        at: DateTime<Utc>,
    ) -> Result<u64, SessionError> {
        let seq = self
            .timeline
            .append(Some(sender_id), sender_name, body, ChatKind::Message, at)?
            .seq;
        if self.chat_open {
            self.timeline.mark_read();
        }
        self.notify(&[StateChange::Timeline { seq }]);
        Ok(seq)
    }

    /// Appends a system event without notifying; callers batch the change.
    fn append_system(&mut self, body: &str) -> Result<u64, SessionError> {
        let seq = self
            .timeline
            .append(None, "", body, ChatKind::System, Utc::now())?
            .seq;
        if self.chat_open {
            self.timeline.mark_read();
        }
        Ok(seq)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn local(&self) -> Result<&Participant, SessionError> {
        self.roster
            .get(&self.local_id)
            .ok_or_else(|| SessionError::not_found(&self.local_id))
    }

    fn notify(&mut self, changes: &[StateChange]) {
        self.subscribers
            .retain(|tx| changes.iter().all(|change| tx.send(change.clone()).is_ok()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Layout;
    use crate::test_support::{MediaRequest, test_session, test_session_with_media};

    fn seeded() -> Session {
        let mut session = test_session();
        session.join(Participant::new("2", "Sarah Johnson")).unwrap();
        session.join(Participant::new("3", "Mike Chen")).unwrap();
        session
    }

    fn roster_json(session: &Session) -> String {
        serde_json::to_string(session.roster()).unwrap()
    }

    #[test]
    fn test_new_session_contains_local_host() {
        let session = test_session();
        let local = session.local_participant().unwrap();
        assert_eq!(local.id, "1");
        assert!(local.is_host);
        assert!(session.timeline().is_empty());
    }

    #[test]
    fn test_join_announces_new_participants() {
        let session = seeded();
        let bodies: Vec<&str> = session.timeline().all().map(|e| e.body.as_str()).collect();
        assert_eq!(
            bodies,
            vec!["Sarah Johnson joined the meeting", "Mike Chen joined the meeting"]
        );
    }

    #[test]
    fn test_rejoin_updates_without_announcing() {
        let mut session = seeded();
        session.join(Participant::new("2", "Sarah J.")).unwrap();
        assert_eq!(session.timeline().len(), 2);
        assert_eq!(session.roster().get("2").unwrap().display_name, "Sarah J.");
    }

    #[test]
    fn test_join_with_local_id_is_rejected() {
        let (mut session, requests) = test_session_with_media();
        let before = session.local_participant().unwrap().clone();
        let changes = session.subscribe();

        let mut intruder = Participant::new("1", "Mallory");
        intruder.is_muted = true;
        assert!(matches!(session.join(intruder), Err(SessionError::Validation(_))));

        assert_eq!(session.local_participant().unwrap(), &before);
        assert!(session.is_local_host());
        assert!(requests.lock().unwrap().is_empty());
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn test_rejoin_keeps_host_and_media_flags() {
        let mut session = seeded();
        session.set_remote_media("1", "3", MediaPatch::muted(true)).unwrap();

        let mut sarah = Participant::new("2", "Sarah J.").host().with_avatar("https://a/s.svg");
        sarah.is_muted = true;
        session.join(sarah).unwrap();
        let mut mike = Participant::new("3", "Mike C.");
        mike.is_video_on = false;
        session.join(mike).unwrap();

        let sarah = session.roster().get("2").unwrap();
        assert_eq!(sarah.display_name, "Sarah J.");
        assert_eq!(sarah.avatar_url.as_deref(), Some("https://a/s.svg"));
        assert!(!sarah.is_host);
        assert!(!sarah.is_muted);
        assert!(!session.roster().is_host("2"));

        let mike = session.roster().get("3").unwrap();
        assert_eq!(mike.display_name, "Mike C.");
        assert!(mike.is_muted);
        assert!(mike.is_video_on);
    }

    #[test]
    fn test_leave_clears_pin_and_announces() {
        let mut session = seeded();
        session.pin("2").unwrap();
        session.leave("2").unwrap();
        assert_eq!(session.focus_state(), &FocusState::Unfocused);
        assert!(!session.roster().contains("2"));
        assert_eq!(session.timeline().last().unwrap().body, "Sarah Johnson left the meeting");
    }

    #[test]
    fn test_leave_is_idempotent() {
        let mut session = seeded();
        session.leave("3").unwrap();
        let len = session.timeline().len();
        session.leave("3").unwrap();
        assert_eq!(session.timeline().len(), len);
    }

    #[test]
    fn test_local_participant_cannot_leave() {
        let mut session = seeded();
        assert!(matches!(session.leave("1"), Err(SessionError::Validation(_))));
        assert!(session.local_participant().is_some());
    }

    #[test]
    fn test_toggle_local_media_calls_port() {
        let (mut session, requests) = test_session_with_media();
        assert!(session.toggle_local_mute().unwrap());
        assert!(!session.toggle_local_video().unwrap());
        assert!(!session.toggle_local_mute().unwrap());

        let local = session.local_participant().unwrap();
        assert!(!local.is_muted);
        assert!(!local.is_video_on);
        assert_eq!(
            *requests.lock().unwrap(),
            vec![MediaRequest::Mute(true), MediaRequest::Video(false), MediaRequest::Mute(false)]
        );
    }

    #[test]
    fn test_screen_share_toggles() {
        let (mut session, requests) = test_session_with_media();
        assert!(session.toggle_screen_share());
        assert!(!session.toggle_screen_share());
        assert_eq!(
            *requests.lock().unwrap(),
            vec![MediaRequest::ScreenShare(true), MediaRequest::ScreenShare(false)]
        );
    }

    #[test]
    fn test_set_remote_media_requires_host() {
        let mut session = seeded();
        let before = roster_json(&session);
        let result = session.set_remote_media("2", "3", MediaPatch::muted(true));
        assert!(matches!(result, Err(SessionError::Permission(_))));
        assert_eq!(roster_json(&session), before);
    }

    #[test]
    fn test_set_remote_media_unknown_host_is_permission_error() {
        let mut session = seeded();
        let result = session.set_remote_media("99", "3", MediaPatch::muted(true));
        assert!(matches!(result, Err(SessionError::Permission(_))));
    }

    #[test]
    fn test_set_remote_media_as_host() {
        let mut session = seeded();
        session.set_remote_media("1", "3", MediaPatch::muted(true)).unwrap();
        assert!(session.roster().get("3").unwrap().is_muted);
        assert!(matches!(
            session.set_remote_media("1", "42", MediaPatch::muted(true)),
            Err(SessionError::NotFound(_))
        ));
    }

    #[test]
    fn test_host_status_is_revalidated_after_transfer() {
        let mut session = seeded();
        session.transfer_host("1", "2").unwrap();
        assert!(!session.is_local_host());
        assert!(session.roster().is_host("2"));
        let result = session.set_remote_media("1", "3", MediaPatch::muted(true));
        assert!(matches!(result, Err(SessionError::Permission(_))));
        assert_eq!(session.timeline().last().unwrap().body, "Sarah Johnson is now the host");
    }

    #[test]
    fn test_media_changed_self_and_remote_host() {
        let (mut session, requests) = test_session_with_media();
        session.join(Participant::new("2", "Sarah Johnson").host()).unwrap();
        session.media_changed("2", "2", MediaPatch::video(false)).unwrap();
        assert!(!session.roster().get("2").unwrap().is_video_on);

        // Remote host mutes the local participant
        session.media_changed("2", "1", MediaPatch::muted(true)).unwrap();
        assert!(session.local_participant().unwrap().is_muted);
        assert_eq!(*requests.lock().unwrap(), vec![MediaRequest::Mute(true)]);
    }

    #[test]
    fn test_media_changed_by_non_host_for_other_is_rejected() {
        let mut session = seeded();
        assert!(matches!(
            session.media_changed("3", "2", MediaPatch::muted(true)),
            Err(SessionError::Permission(_))
        ));
    }

    #[test]
    fn test_remove_participant() {
        let mut session = seeded();
        session.pin("3").unwrap();
        session.remove_participant("1", "3").unwrap();
        assert!(!session.roster().contains("3"));
        assert_eq!(session.focus_state(), &FocusState::Unfocused);
        assert_eq!(
            session.timeline().last().unwrap().body,
            "Mike Chen was removed from the meeting"
        );
        assert!(matches!(
            session.remove_participant("1", "3"),
            Err(SessionError::NotFound(_))
        ));
        assert!(matches!(
            session.remove_participant("1", "1"),
            Err(SessionError::Validation(_))
        ));
        assert!(matches!(
            session.remove_participant("2", "1"),
            Err(SessionError::Permission(_))
        ));
    }

    #[test]
    fn test_mute_all_skips_caller() {
        let mut session = seeded();
        assert_eq!(session.mute_all("1").unwrap(), 2);
        assert!(!session.local_participant().unwrap().is_muted);
        assert_eq!(session.mute_all("1").unwrap(), 0);
        assert!(session.mute_all("2").is_err());
    }

    #[test]
    fn test_locked_meeting_refuses_new_joins() {
        let mut session = seeded();
        session.set_locked("1", true).unwrap();
        assert!(matches!(
            session.join(Participant::new("4", "Emily Davis")),
            Err(SessionError::Permission(_))
        ));
        // Existing participants can still update
        session.join(Participant::new("2", "Sarah J.")).unwrap();
        session.set_locked("1", false).unwrap();
        session.join(Participant::new("4", "Emily Davis")).unwrap();
        assert_eq!(session.roster().len(), 4);
    }

    #[test]
    fn test_pin_unknown_keeps_focus() {
        let mut session = seeded();
        session.pin("2").unwrap();
        assert!(matches!(session.pin("9"), Err(SessionError::NotFound(_))));
        assert_eq!(session.focus_state(), &FocusState::Focused("2".into()));
    }

    #[test]
    fn test_layout_follows_focus() {
        let mut session = seeded();
        assert!(!session.layout().unwrap().is_spotlight());
        session.pin("3").unwrap();
        match session.layout().unwrap() {
            Layout::Spotlight { primary, others } => {
                assert_eq!(primary.id, "3");
                assert_eq!(others.len(), 2);
            }
            other => panic!("Expected spotlight, got {:?}", other),
        }
    }

    #[test]
    fn test_send_chat_message_trims_and_rejects_blank() {
        let mut session = test_session();
        let seq = session.send_chat_message("  hi  ").unwrap();
        assert_eq!(seq, 0);
        assert_eq!(session.timeline().last().unwrap().body, "hi");
        assert!(matches!(
            session.send_chat_message("   "),
            Err(SessionError::Validation(_))
        ));
        assert_eq!(session.timeline().len(), 1);
    }

    #[test]
    fn test_chat_line_by_seq() {
        let mut session = seeded();
        let seq = session.send_chat_message("morning").unwrap();
        let line = session.chat_line(seq).unwrap();
        assert_eq!(line.body, "morning");
        assert!(line.is_own);
        assert!(session.chat_line(seq + 1).is_none());
    }

    #[test]
    fn test_sender_name_is_snapshotted() {
        let mut session = seeded();
        session.receive_chat_message("2", "hello", None).unwrap();
        session.join(Participant::new("2", "Sarah Renamed")).unwrap();
        let last = session.timeline().last().unwrap();
        assert_eq!(last.sender_name, "Sarah Johnson");
    }

    #[test]
    fn test_receive_chat_from_unknown_sender() {
        let mut session = seeded();
        let len = session.timeline().len();
        assert!(matches!(
            session.receive_chat_message("77", "boo", None),
            Err(SessionError::NotFound(_))
        ));
        assert_eq!(session.timeline().len(), len);
    }

    #[test]
    fn test_unread_tracking_follows_drawer() {
        let mut session = seeded();
        session.receive_chat_message("2", "hello", None).unwrap();
        session.send_chat_message("hey").unwrap();
        assert_eq!(session.unread_count(), 1);

        session.set_chat_open(true);
        assert!(!session.has_unread());
        session.receive_chat_message("3", "while open", None).unwrap();
        assert!(!session.has_unread());

        session.set_chat_open(false);
        session.receive_chat_message("3", "while closed", None).unwrap();
        assert_eq!(session.unread_count(), 1);
    }

    #[test]
    fn test_subscribers_get_changes_only_on_success() {
        let mut session = test_session();
        let rx = session.subscribe();

        session.send_chat_message("hi").unwrap();
        assert_eq!(rx.try_recv(), Ok(StateChange::Timeline { seq: 0 }));

        assert!(session.pin("nobody").is_err());
        assert!(rx.try_recv().is_err());

        session.join(Participant::new("2", "Sarah Johnson")).unwrap();
        let changes: Vec<StateChange> = rx.try_iter().collect();
        assert_eq!(changes, vec![StateChange::Roster, StateChange::Timeline { seq: 1 }]);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut session = test_session();
        let rx = session.subscribe();
        drop(rx);
        session.send_chat_message("hi").unwrap();
        assert!(session.subscribers.is_empty());
    }

    #[test]
    fn test_invite_link() {
        let session = test_session();
        let link = session.invite_link("https://meet.example.com/");
        assert_eq!(link, format!("https://meet.example.com/meeting/{}", session.room_id()));
    }

    #[test]
    fn test_generated_room_id_length() {
        assert_eq!(generate_room_id().len(), ROOM_ID_LENGTH);
    }
}
