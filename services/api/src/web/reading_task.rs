//! services/api/src/web/reading_task.rs
//!
//! This module contains the asynchronous "worker" functions that fetch a reading
//! for a simple view or for the reading modal, and apply the result to the
//! session only if it is still wanted.

use crate::web::{
    protocol::{Outbox, ServerMessage},
    state::{AppState, SessionState},
};
use oracle_core::{
    domain::{ReadingKind, UserData},
    panel::{PanelState, Ticket, ERROR_MESSAGE},
    render,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Fetches the reading for a simple view and reports it, unless the user has
/// left or re-entered the view in the meantime.
pub async fn reading_process(
    app_state: Arc<AppState>,
    session_state_lock: Arc<Mutex<SessionState>>,
    outbox: Outbox,
    ticket: Ticket,
    kind: ReadingKind,
    user: UserData,
) {
    info!("Reading process started for {}.", kind.title());
    let result = app_state
        .reading_client
        .fetch_reading(&user, kind, None)
        .await;

    let mut session = session_state_lock.lock().await;
    if !session.panel.resolve(ticket, result) {
        return;
    }

    let msg = match session.panel.state() {
        PanelState::Ready(reading) => ServerMessage::ReadingReady {
            markdown: render::to_markdown(reading),
            reading: reading.clone(),
        },
        _ => ServerMessage::ReadingFailed {
            kind,
            message: ERROR_MESSAGE.to_string(),
        },
    };
    if outbox.send(msg).is_err() {
        debug!("Client went away before the reading arrived.");
    }
}

/// Fills the reading modal. The modal shows the error text when the fetch fails.
pub async fn modal_process(
    app_state: Arc<AppState>,
    session_state_lock: Arc<Mutex<SessionState>>,
    outbox: Outbox,
    ticket: Ticket,
    kind: ReadingKind,
    user: UserData,
) {
    let content = match app_state
        .reading_client
        .fetch_reading(&user, kind, None)
        .await
    {
        Ok(reading) => render::to_markdown(&reading),
        Err(_) => ERROR_MESSAGE.to_string(),
    };

    let mut session = session_state_lock.lock().await;
    if session.modal_ticket != Some(ticket) {
        debug!("Dropping stale modal content.");
        return;
    }
    session.modal_ticket = None;
    if !session.modal.show(content.clone()) {
        return;
    }
    let header = session.modal.header().unwrap_or_default();
    let _ = outbox.send(ServerMessage::ModalContent { header, content });
}
