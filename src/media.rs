//! # Media Control Port
//!
//! Outbound seam to whatever actually drives the microphone, camera and
//! screen capture. The session calls it after flipping its own flags and
//! never waits for an answer: the session's flags are what the UI shows,
//! whether or not the pipeline agrees.

use log::info;

pub trait MediaControlPort: Send + Sync {
    /// Returns the name of the media backend.
    fn name(&self) -> &str;

    fn request_local_mute(&self, muted: bool);

    fn request_local_video(&self, on: bool);

    fn request_screen_share(&self, sharing: bool);
}

/// Media backend that only records requests in the log.
pub struct LoggingMediaPort;

impl MediaControlPort for LoggingMediaPort {
    fn name(&self) -> &str {
        "logging"
    }

    fn request_local_mute(&self, muted: bool) {
        info!("Media: microphone {}", if muted { "muted" } else { "unmuted" });
    }

    fn request_local_video(&self, on: bool) {
        info!("Media: camera turned {}", if on { "on" } else { "off" });
    }

    fn request_screen_share(&self, sharing: bool) {
        info!(
            "Media: screen sharing {}",
            if sharing { "started" } else { "stopped" }
        );
    }
}
