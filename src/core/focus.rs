//! # Focus Controller
//!
//! Tracks which participant, if any, is pinned.
//!
//! ```text
//!            pin(x)                    pin(y), y != x
//! Unfocused ───────▶ Focused(x) ─────────────────────▶ Focused(y)
//!     ▲                  │
//!     └──────────────────┘
//!      pin(x) again, or x removed from the roster
//! ```
//!
//! A pin always refers to a participant that is in the roster. The session
//! calls [`FocusController::on_removed`] on every roster removal to keep it so.

use log::debug;
use serde::Serialize;

use super::error::SessionError;
use super::layout::{GridColumns, Layout};
use super::participant::Roster;

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    Unfocused,
    Focused(String),
}

impl FocusState {
    pub fn pinned_id(&self) -> Option<&str> {
        match self {
            FocusState::Unfocused => None,
            FocusState::Focused(id) => Some(id.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusController {
    state: FocusState,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.state.pinned_id() == Some(id)
    }

    /// Pins `id`, switches the pin to it, or unpins it if it was already pinned.
    ///
    /// Fails with `NotFound` and leaves the state as it was if `id` is not in
    /// the roster.
    pub fn pin(&mut self, id: &str, roster: &Roster) -> Result<&FocusState, SessionError> {
        if !roster.contains(id) {
            return Err(SessionError::not_found(id));
        }
        self.state = if self.is_pinned(id) {
            debug!("Focus: unpinning {}", id);
            FocusState::Unfocused
        } else {
            debug!("Focus: pinning {}", id);
            FocusState::Focused(id.to_string())
        };
        Ok(&self.state)
    }

    /// Drops the pin if it pointed at `id`. Returns `true` if the state changed.
    pub fn on_removed(&mut self, id: &str) -> bool {
        if self.is_pinned(id) {
            debug!("Focus: pinned participant {} left, unfocusing", id);
            self.state = FocusState::Unfocused;
            true
        } else {
            false
        }
    }

    /// Derives the tile arrangement for the current focus state.
    pub fn layout_for<'a>(&self, roster: &'a Roster) -> Result<Layout<'a>, SessionError> {
        match &self.state {
            FocusState::Unfocused => Ok(Layout::Grid {
                tiles: roster.iter().collect(),
                columns: GridColumns::for_count(roster.len()),
            }),
            FocusState::Focused(id) => {
                let primary = roster.get(id).ok_or_else(|| SessionError::not_found(id))?;
                let others = roster.iter().filter(|p| p.id != *id).collect();
                Ok(Layout::Spotlight { primary, others })
            }
        }
    }
}
