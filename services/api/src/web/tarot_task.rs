//! services/api/src/web/tarot_task.rs
//!
//! Runs one tarot shuffle in the background and applies the outcome.

use crate::web::{
    protocol::{Outbox, ServerMessage},
    state::{AppState, SessionState},
};
use oracle_core::{
    domain::UserData,
    tarot::{self, ShuffleOrder, TarotStep},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub async fn tarot_process(
    app_state: Arc<AppState>,
    session_state_lock: Arc<Mutex<SessionState>>,
    outbox: Outbox,
    order: ShuffleOrder,
    user: UserData,
) {
    info!("Shuffle started.");
    let result = tarot::shuffle(
        &app_state.reading_client,
        &user,
        &order.context,
        app_state.config.shuffle_floor,
    )
    .await;

    let mut session = session_state_lock.lock().await;
    if !session.tarot.finish(order.ticket, result) {
        debug!("Dropping stale shuffle result.");
        return;
    }

    let msg = match session.tarot.step() {
        TarotStep::Result(reading) => ServerMessage::TarotReady {
            reading: reading.clone(),
        },
        _ => ServerMessage::TarotFailed {
            question: session.tarot.question().to_string(),
            mood: session.tarot.mood(),
        },
    };
    let _ = outbox.send(msg);
}
