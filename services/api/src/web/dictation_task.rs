//! services/api/src/web/dictation_task.rs
//!
//! Transcribes the buffered dictation audio into the tarot question.

use crate::web::{
    protocol::{Outbox, ServerMessage},
    state::{AppState, SessionState},
};
use oracle_core::{
    domain::ReadingType,
    navigation::Screen,
    panel::Ticket,
    tarot::{self, DictationError, SPEECH_UNAVAILABLE_NOTICE},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Transcribes `audio` and applies it, unless the tarot view it was spoken
/// into has since been left.
pub async fn dictation_process(
    app_state: Arc<AppState>,
    session_state_lock: Arc<Mutex<SessionState>>,
    outbox: Outbox,
    ticket: Ticket,
    audio: Vec<u8>,
) {
    info!("Dictation ended with {} bytes of audio.", audio.len());
    let result = tarot::dictate(app_state.speech.as_deref(), &audio).await;

    let mut session = session_state_lock.lock().await;
    if session.dictation_ticket != Some(ticket)
        || session.controller.screen() != Screen::Viewing(ReadingType::Tarot)
    {
        debug!("Dropping stale transcript.");
        return;
    }
    session.dictation_ticket = None;

    let msg = match result {
        Ok(text) => {
            if !session.tarot.apply_transcript(&text) {
                return;
            }
            ServerMessage::Transcript { text }
        }
        Err(DictationError::Unavailable) => ServerMessage::Notice {
            message: SPEECH_UNAVAILABLE_NOTICE.to_string(),
        },
        Err(e) => {
            error!("Dictation failed: {}", e);
            ServerMessage::Notice {
                message: "Sorry, the question could not be heard. Please try again.".to_string(),
            }
        }
    };
    let _ = outbox.send(msg);
}
