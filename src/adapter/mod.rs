//! # Terminal Adapter
//!
//! Line-oriented front end. Reads commands from stdin, feeds transport events
//! into the same queue, and prints whatever the session says changed.
//!
//! ```text
//!   stdin thread ──┐
//!                  ├──► mpsc<Inbound> ──► update(session, action) ──► StateChange ──► print
//!   transport task ┘
//! ```
//!
//! Everything is applied on this thread, one item at a time, in the order
//! it arrived. Neither the reader thread nor the transport task ever touches
//! the session.

pub mod command;
pub mod render;

use std::io::{self, BufRead};
use std::sync::{Arc, mpsc};
use std::thread;

use log::{debug, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::chat::ChatKind;
use crate::core::config::ResolvedConfig;
use crate::core::layout::Breakpoint;
use crate::core::state::{Session, StateChange};
use crate::media::LoggingMediaPort;
use crate::transport::{RealtimeTransport, TransportError, TransportEvent, build_transport};
use command::{Command, View};

/// Everything the event loop can be woken up by.
#[derive(Debug)]
enum Inbound {
    Line(String),
    StdinClosed,
    Remote(TransportEvent),
    TransportFinished(Result<(), TransportError>),
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let transport = build_transport(&config.transport, config.seed_file.as_deref())
        .map_err(|e| io::Error::other(e.to_string()))?;

    let mut session = Session::new(
        config.identity.clone(),
        config.session_options(),
        Arc::new(LoggingMediaPort),
    )
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let changes = session.subscribe();

    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone());
    spawn_transport(transport, tx);

    println!(
        "Joined room {} as {}. Type /help for commands.",
        session.room_id(),
        config.identity.display_name
    );
    println!("Invite: {}", session.invite_link(&config.invite_base_url));

    while let Ok(inbound) = rx.recv() {
        let action = match inbound {
            Inbound::Line(line) => match command::parse(&line, session.local_id()) {
                Ok(Command::Apply(action)) => Some(action),
                Ok(Command::Show(view)) => {
                    println!("{}", show(&session, view, &config));
                    None
                }
                Ok(Command::Nothing) => None,
                Err(e) => {
                    println!("! {e}");
                    None
                }
            },
            Inbound::Remote(event) => Some(Action::from(event)),
            Inbound::StdinClosed => {
                info!("stdin closed, leaving");
                Some(Action::LeaveMeeting)
            }
            Inbound::TransportFinished(result) => {
                match result {
                    Ok(()) => info!("Transport finished"),
                    Err(e) => {
                        warn!("Transport stopped: {}", e);
                        println!("! transport stopped: {e}");
                    }
                }
                None
            }
        };

        let Some(action) = action else { continue };
        match update(&mut session, action) {
            Ok(Effect::Quit) => {
                println!("You left the meeting.");
                break;
            }
            Ok(Effect::None) => {}
            Err(e) => println!("! {e}"),
        }
        print_changes(&session, &changes);
    }

    info!("Session in room {} ended", session.room_id());
    Ok(())
}

fn show(session: &Session, view: View, config: &ResolvedConfig) -> String {
    match view {
        View::Who => render::roster(session),
        View::Layout => render::layout(session, Breakpoint::default()),
        View::Log => render::chat_log(session),
        View::Link => session.invite_link(&config.invite_base_url),
        View::Help => command::HELP.to_string(),
    }
}

/// Drains pending notifications and prints what the user would see change.
fn print_changes(session: &Session, changes: &mpsc::Receiver<StateChange>) {
    let mut print_status = false;
    while let Ok(change) = changes.try_recv() {
        debug!("State change: {:?}", change);
        match change {
            StateChange::Timeline { seq } => print_timeline_entry(session, seq),
            StateChange::LocalMedia | StateChange::Room => print_status = true,
            StateChange::ChatDrawer => {
                if session.is_chat_open() {
                    println!("{}", render::chat_log(session));
                } else {
                    println!("Chat closed.");
                }
            }
            StateChange::Focus => println!("{}", render::layout(session, Breakpoint::default())),
            StateChange::Roster => {}
        }
    }
    if print_status {
        println!("{}", render::status(session));
    }
}

/// New entries stick to the bottom of an open chat. With the chat closed only
/// system notices are printed and messages count as unread.
fn print_timeline_entry(session: &Session, seq: u64) {
    let Some(line) = session.chat_line(seq) else {
        return;
    };
    if session.is_chat_open() || line.kind == ChatKind::System || line.is_own {
        println!("{}", render::chat_line(&line));
    } else {
        println!(
            "({} unread, /chat open to read)",
            session.unread_count()
        );
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Inbound::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Inbound::StdinClosed);
    });
}

fn spawn_transport(transport: Arc<dyn RealtimeTransport>, tx: mpsc::Sender<Inbound>) {
    info!("Starting transport: {}", transport.name());
    let (event_tx, mut event_rx) = tokio::sync::mpsc::channel::<TransportEvent>(64);

    let tx_done = tx.clone();
    tokio::spawn(async move {
        let result = transport.run(event_tx).await;
        if tx_done.send(Inbound::TransportFinished(result)).is_err() {
            debug!("Transport finished after the event loop exited");
        }
    });

    // Forward transport events into the event loop's queue
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if tx.send(Inbound::Remote(event)).is_err() {
                warn!("Failed to forward transport event: receiver dropped");
                return;
            }
        }
    });
}
