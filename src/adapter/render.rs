//! Plain-text projections of session state for the terminal.

use crate::core::chat::{ChatKind, ChatLine};
use crate::core::initials::initials;
use crate::core::layout::{Breakpoint, Layout};
use crate::core::participant::{Participant, ParticipantRow};
use crate::core::state::Session;

/// Participants drawer: host first, then alphabetical.
pub fn roster(session: &Session) -> String {
    let view = session.sorted_view();
    let mut out = format!("Participants ({})", view.len());
    for row in view.iter() {
        out.push('\n');
        out.push_str(&participant_row(row, session.focus_state().pinned_id()));
    }
    out
}

fn participant_row(row: ParticipantRow<'_>, pinned: Option<&str>) -> String {
    let p = row.participant;
    let mut line = format!(
        "  [{:>2}] {:<24} {} {}",
        badge(p),
        row.label(),
        if p.is_muted { "mic off" } else { "mic on " },
        if p.is_video_on { "cam on " } else { "cam off" },
    );
    if p.is_host {
        line.push_str("  host");
    }
    if pinned == Some(p.id.as_str()) {
        line.push_str("  pinned");
    }
    line.push_str(&format!("  #{}", p.id));
    line
}

/// Avatar fallback.
fn badge(p: &Participant) -> String {
    initials(&p.display_name).unwrap_or_else(|_| "?".to_string())
}

pub fn layout(session: &Session, breakpoint: Breakpoint) -> String {
    match session.layout() {
        Ok(Layout::Grid { tiles, columns }) => {
            let cols = columns.resolve(breakpoint) as usize;
            let mut out = format!("Grid, {} columns", cols);
            for chunk in tiles.chunks(cols.max(1)) {
                let row: Vec<String> = chunk.iter().map(|p| tile(p)).collect();
                out.push('\n');
                out.push_str(&format!("  {}", row.join(" ")));
            }
            out
        }
        Ok(Layout::Spotlight { primary, others }) => {
            let strip: Vec<String> = others.iter().map(|p| tile(p)).collect();
            format!(
                "Spotlight on {}\n  {}\n  strip: {}",
                primary.display_name,
                tile(primary),
                if strip.is_empty() { "(empty)".to_string() } else { strip.join(" ") }
            )
        }
        Err(e) => format!("layout unavailable: {e}"),
    }
}

fn tile(p: &Participant) -> String {
    if p.is_video_on {
        format!("[ {} ]", p.display_name)
    } else {
        format!("[ ({}) ]", badge(p))
    }
}

pub fn chat_line(line: &ChatLine) -> String {
    match line.kind {
        ChatKind::System => format!("{}  * {}", line.time, line.body),
        ChatKind::Message => {
            let who = if line.is_own { "You" } else { line.sender_name.as_str() };
            let initials = line.initials.as_deref().unwrap_or("?");
            format!("{}  [{}] {}: {}", line.time, initials, who, line.body)
        }
    }
}

pub fn chat_log(session: &Session) -> String {
    let lines = session.chat_lines();
    if lines.is_empty() {
        return "No messages yet".to_string();
    }
    lines.iter().map(chat_line).collect::<Vec<_>>().join("\n")
}

/// One-line summary of the local controls.
pub fn status(session: &Session) -> String {
    let (muted, video) = session
        .local_participant()
        .map(|p| (p.is_muted, p.is_video_on))
        .unwrap_or((false, false));
    let mut out = format!(
        "mic {} | cam {} | share {}",
        if muted { "off" } else { "on" },
        if video { "on" } else { "off" },
        if session.is_screen_sharing() { "on" } else { "off" },
    );
    if session.is_locked() {
        out.push_str(" | locked");
    }
    let unread = session.unread_count();
    if unread > 0 {
        out.push_str(&format!(" | {unread} unread"));
    }
    out
}
