//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use crate::core::identity::Identity;
use crate::core::state::{Session, SessionOptions};
use crate::media::MediaControlPort;

/// A media port that ignores every request.
pub struct NoopMediaPort;

impl MediaControlPort for NoopMediaPort {
    fn name(&self) -> &str {
        "noop"
    }

    fn request_local_mute(&self, _muted: bool) {}

    fn request_local_video(&self, _on: bool) {}

    fn request_screen_share(&self, _sharing: bool) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRequest {
    Mute(bool),
    Video(bool),
    ScreenShare(bool),
}

/// A media port that remembers what it was asked to do.
pub struct RecordingMediaPort {
    pub requests: Arc<Mutex<Vec<MediaRequest>>>,
}

impl MediaControlPort for RecordingMediaPort {
    fn name(&self) -> &str {
        "recording"
    }

    fn request_local_mute(&self, muted: bool) {
        self.requests.lock().unwrap().push(MediaRequest::Mute(muted));
    }

    fn request_local_video(&self, on: bool) {
        self.requests.lock().unwrap().push(MediaRequest::Video(on));
    }

    fn request_screen_share(&self, sharing: bool) {
        self.requests.lock().unwrap().push(MediaRequest::ScreenShare(sharing));
    }
}

fn test_options() -> SessionOptions {
    SessionOptions {
        room_id: "test-room".to_string(),
        start_as_host: true,
        announce_membership: true,
    }
}

/// Creates a test Session: local participant "1" named "You", hosting "test-room".
pub fn test_session() -> Session {
    Session::new(Identity::new("1", "You"), test_options(), Arc::new(NoopMediaPort))
        .expect("valid test identity")
}

/// Like `test_session`, plus a handle on the media requests it makes.
pub fn test_session_with_media() -> (Session, Arc<Mutex<Vec<MediaRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let port = RecordingMediaPort {
        requests: requests.clone(),
    };
    let session = Session::new(Identity::new("1", "You"), test_options(), Arc::new(port))
        .expect("valid test identity");
    (session, requests)
}
