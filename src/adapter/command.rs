//! Turns a line of terminal input into something the adapter can act on.
//!
//! Lines starting with `/` are commands; anything else is a chat message.

use std::fmt;

use crate::core::action::Action;
use crate::core::participant::MediaPatch;

/// Read-only views printed by the adapter without touching the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Who,
    Layout,
    Log,
    Link,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Apply(Action),
    Show(View),
    /// Blank line.
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    MissingArgument { command: &'static str, argument: &'static str },
    BadArgument { command: &'static str, value: String },
    Unknown(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::MissingArgument { command, argument } => {
                write!(f, "/{command} needs <{argument}>")
            }
            CommandError::BadArgument { command, value } => {
                write!(f, "/{command} does not understand '{value}'")
            }
            CommandError::Unknown(name) => write!(f, "unknown command /{name} (try /help)"),
        }
    }
}

impl std::error::Error for CommandError {}

pub const HELP: &str = "\
/mute               toggle your microphone
/video              toggle your camera
/share              toggle screen sharing
/pin <id>           spotlight a participant (again to unpin)
/host <id>          hand host controls to someone else
/remove <id>        remove a participant
/mute-remote <id>   mute a participant
/mute-all           mute everyone but you
/lock | /unlock     refuse or allow new joiners
/chat open|close    show or hide the chat
/who                list participants
/layout             show the video layout
/log                print the whole chat
/link               print the invite link
/leave              leave the meeting
anything else       send as a chat message";

/// Parse one input line. `local_id` acts as the caller for host controls.
pub fn parse(line: &str, local_id: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Nothing);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Apply(Action::SendChatMessage(line.to_string())));
    };

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();
    let host_id = local_id.to_string();

    let action = match name {
        "mute" => Action::ToggleLocalMute,
        "video" => Action::ToggleLocalVideo,
        "share" => Action::ToggleScreenShare,
        "pin" => Action::Pin(required(arg, "pin", "id")?),
        "host" => Action::TransferHost {
            host_id,
            target_id: required(arg, "host", "id")?,
        },
        "remove" => Action::RemoveParticipant {
            host_id,
            target_id: required(arg, "remove", "id")?,
        },
        "mute-remote" => Action::SetRemoteMedia {
            host_id,
            target_id: required(arg, "mute-remote", "id")?,
            patch: MediaPatch::muted(true),
        },
        "mute-all" => Action::MuteAll { host_id },
        "lock" => Action::SetLocked { host_id, locked: true },
        "unlock" => Action::SetLocked { host_id, locked: false },
        "chat" => match arg {
            Some("open") => Action::SetChatOpen(true),
            Some("close") => Action::SetChatOpen(false),
            Some(other) => {
                return Err(CommandError::BadArgument {
                    command: "chat",
                    value: other.to_string(),
                });
            }
            None => {
                return Err(CommandError::MissingArgument {
                    command: "chat",
                    argument: "open|close",
                });
            }
        },
        "leave" => Action::LeaveMeeting,
        "who" => return Ok(Command::Show(View::Who)),
        "layout" => return Ok(Command::Show(View::Layout)),
        "log" => return Ok(Command::Show(View::Log)),
        "link" => return Ok(Command::Show(View::Link)),
        "help" => return Ok(Command::Show(View::Help)),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Command::Apply(action))
}

fn required(
    arg: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    arg.map(str::to_string)
        .ok_or(CommandError::MissingArgument { command, argument })
}
