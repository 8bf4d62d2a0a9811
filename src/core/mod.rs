//! # Core Session Logic
//!
//! This module contains Huddle's meeting state and the rules around it.
//! It knows nothing about terminals, networks, or media devices.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No threads.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  Terminal  │      │  Realtime  │      │   Media    │
//!     │  Adapter   │      │ Transport  │      │   Port     │
//!     │  (stdin)   │      │  (events)  │      │ (outbound) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Session` struct: roster, focus and chat in one place
//! - [`action`]: The `Action` enum, everything that can happen in a meeting
//! - [`participant`], [`focus`], [`chat`]: the three components the session composes
//! - [`layout`], [`initials`]: pure derivations the views share

pub mod action;
pub mod chat;
pub mod config;
pub mod error;
pub mod focus;
pub mod identity;
pub mod initials;
pub mod layout;
pub mod participant;
pub mod state;

// Re-export commonly used types for convenience
pub use action::{Action, Effect, update};
pub use error::SessionError;
pub use participant::{MediaPatch, Participant};
pub use state::{Session, SessionOptions, StateChange};
