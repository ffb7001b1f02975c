//! services/api/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for a WebSocket connection.
//! Each connection owns one `SessionState`; client messages drive its state
//! machines and background tasks report back through the connection's outbox.

use crate::{
    adapters::WsClipboardAdapter,
    error::ApiError,
    web::{
        dictation_task::dictation_process,
        protocol::{ClientMessage, Outbox, ServerMessage},
        reading_task::{modal_process, reading_process},
        state::{AppState, SessionState},
        tarot_task::tarot_process,
    },
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use oracle_core::{
    domain::{ReadingKind, ReadingType},
    navigation::Screen,
    panel::{Ticket, LOADING_MESSAGE},
    shop::ShopCategory,
    tarot::{ShuffleOrder, TarotStep, SHUFFLING_MESSAGE, SPEECH_UNAVAILABLE_NOTICE},
};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info, warn};

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New WebSocket connection established.");

    let (sender, mut receiver) = socket.split();
    let (outbox, inbox) = mpsc::unbounded_channel();
    let writer = tokio::spawn(async move {
        if let Err(e) = forward_messages(inbox, sender).await {
            warn!("Stopped writing to the client: {}", e);
        }
    });

    let session_state_lock = Arc::new(Mutex::new(SessionState::new()));
    {
        let session = session_state_lock.lock().await;
        send_view_state(&session, &outbox);
    }

    // --- Main Message Loop ---
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    if let Err(e) =
                        handle_client_message(client_msg, &app_state, &session_state_lock, &outbox)
                            .await
                    {
                        error!("Failed to handle client message: {}", e);
                        let _ = outbox.send(ServerMessage::Error {
                            message: e.to_string(),
                        });
                    }
                }
                Err(e) => warn!("Failed to deserialize client message: {}", e),
            },
            Message::Binary(data) => {
                let mut session = session_state_lock.lock().await;
                if session.push_audio(&data) {
                    end_dictation(&app_state, &session_state_lock, &mut session, &outbox);
                }
            }
            Message::Close(_) => {
                info!("Client sent close message.");
                break;
            }
            _ => {}
        }
    }

    // --- Cleanup ---
    // Background tasks still hold outbox clones; their late sends simply fail.
    drop(outbox);
    writer.abort();
    info!("WebSocket connection closed.");
}

/// Serializes queued messages onto the socket until the outbox closes.
async fn forward_messages(
    mut inbox: mpsc::UnboundedReceiver<ServerMessage>,
    mut sender: SplitSink<WebSocket, Message>,
) -> Result<(), ApiError> {
    while let Some(msg) = inbox.recv().await {
        let json = serde_json::to_string(&msg)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize message: {}", e)))?;
        sender.send(Message::Text(json.into())).await?;
    }
    Ok(())
}

/// Applies one client message to the session.
pub async fn handle_client_message(
    msg: ClientMessage,
    app_state: &Arc<AppState>,
    session_state_lock: &Arc<Mutex<SessionState>>,
    outbox: &Outbox,
) -> Result<(), ApiError> {
    let mut session = session_state_lock.lock().await;
    let screen = session.controller.screen();

    match msg {
        // --- Home screen ---
        ClientMessage::UpdateUser { user } => {
            session.controller.update_user(user);
            send_view_state(&session, outbox);
        }
        ClientMessage::SelectTile { reading_type } => {
            session.controller.select_tile(reading_type);
            send_view_state(&session, outbox);
        }
        ClientMessage::Confirm => {
            if let Some(reading_type) = session.controller.confirm() {
                info!("Entering the {} view.", reading_type.title());
                send_view_state(&session, outbox);
                enter_view(reading_type, app_state, session_state_lock, &mut session, outbox);
            }
        }
        ClientMessage::Back => {
            session.controller.back();
            session.leave_view();
            send_view_state(&session, outbox);
        }
        ClientMessage::OpenShop => {
            if session.controller.open_shop() {
                session.leave_view();
                send_view_state(&session, outbox);
                send_categories(outbox);
            }
        }

        // --- Tarot ---
        ClientMessage::SetQuestion { question } if screen == TAROT => {
            session.tarot.set_question(question);
        }
        ClientMessage::SetMood { mood } if screen == TAROT => {
            session.tarot.set_mood(mood);
        }
        ClientMessage::DrawCards if screen == TAROT => {
            let order = session.tarot.begin();
            start_shuffle(order, app_state, session_state_lock, &session, outbox);
        }
        ClientMessage::Reshuffle if screen == TAROT => {
            let order = session.tarot.reshuffle();
            start_shuffle(order, app_state, session_state_lock, &session, outbox);
        }
        ClientMessage::DictationStarted if screen == TAROT => {
            if *session.tarot.step() != TarotStep::Input {
                return Ok(());
            }
            if app_state.speech.is_none() {
                let _ = outbox.send(ServerMessage::Notice {
                    message: SPEECH_UNAVAILABLE_NOTICE.to_string(),
                });
                return Ok(());
            }
            session.audio_buffer.clear();
            session.dictating = true;
        }
        ClientMessage::DictationEnded if session.dictating => {
            end_dictation(app_state, session_state_lock, &mut session, outbox);
        }

        // --- Shop ---
        ClientMessage::OpenCategory { category } if screen == SHOP => {
            session.shop.open(category);
            let _ = outbox.send(ServerMessage::ShopProducts {
                category: category.name().to_string(),
                products: session.shop.products().iter().map(|p| p.to_string()).collect(),
            });
        }
        ClientMessage::CloseCategory if screen == SHOP => {
            session.shop.close();
            send_categories(outbox);
        }

        // --- Reading modal ---
        ClientMessage::OpenModal { reading_type } => {
            let Some(kind) = reading_type.kind() else {
                warn!("The shop has no reading to show.");
                return Ok(());
            };
            if !session.controller.is_form_valid() {
                return Ok(());
            }
            let ticket = Ticket::new();
            session.modal.open_loading(reading_type);
            session.modal_ticket = Some(ticket);
            let _ = outbox.send(ServerMessage::ModalOpened {
                header: session.modal.header().unwrap_or_default(),
            });
            tokio::spawn(modal_process(
                app_state.clone(),
                session_state_lock.clone(),
                outbox.clone(),
                ticket,
                kind,
                session.controller.user().clone(),
            ));
        }
        ClientMessage::CopyModal => {
            let clipboard = WsClipboardAdapter::new(outbox.clone());
            if !session.modal.copy(&clipboard).await? {
                let _ = outbox.send(ServerMessage::Notice {
                    message: "Nothing to copy yet.".to_string(),
                });
            }
        }
        ClientMessage::CloseModal => {
            session.modal.close();
            session.modal_ticket = None;
            let _ = outbox.send(ServerMessage::ModalClosed);
        }

        other => warn!("Ignoring {:?} on the {:?} screen.", other, screen),
    }
    Ok(())
}

const TAROT: Screen = Screen::Viewing(ReadingType::Tarot);
const SHOP: Screen = Screen::Viewing(ReadingType::Shop);

fn enter_view(
    reading_type: ReadingType,
    app_state: &Arc<AppState>,
    session_state_lock: &Arc<Mutex<SessionState>>,
    session: &mut SessionState,
    outbox: &Outbox,
) {
    match reading_type.kind() {
        None => {
            session.shop.close();
            send_categories(outbox);
        }
        Some(ReadingKind::Tarot) => session.tarot.reset(),
        Some(kind) => {
            let ticket = session.panel.begin(kind);
            let _ = outbox.send(ServerMessage::ReadingLoading {
                kind,
                message: LOADING_MESSAGE.to_string(),
            });
            tokio::spawn(reading_process(
                app_state.clone(),
                session_state_lock.clone(),
                outbox.clone(),
                ticket,
                kind,
                session.controller.user().clone(),
            ));
        }
    }
}

fn start_shuffle(
    order: Option<ShuffleOrder>,
    app_state: &Arc<AppState>,
    session_state_lock: &Arc<Mutex<SessionState>>,
    session: &SessionState,
    outbox: &Outbox,
) {
    let Some(order) = order else {
        return;
    };
    let _ = outbox.send(ServerMessage::TarotShuffling {
        message: SHUFFLING_MESSAGE.to_string(),
    });
    tokio::spawn(tarot_process(
        app_state.clone(),
        session_state_lock.clone(),
        outbox.clone(),
        order,
        session.controller.user().clone(),
    ));
}

fn end_dictation(
    app_state: &Arc<AppState>,
    session_state_lock: &Arc<Mutex<SessionState>>,
    session: &mut SessionState,
    outbox: &Outbox,
) {
    let Some((ticket, audio)) = session.end_dictation() else {
        return;
    };
    tokio::spawn(dictation_process(
        app_state.clone(),
        session_state_lock.clone(),
        outbox.clone(),
        ticket,
        audio,
    ));
}

fn send_view_state(session: &SessionState, outbox: &Outbox) {
    let controller = &session.controller;
    let _ = outbox.send(ServerMessage::ViewState {
        screen: controller.screen(),
        user: controller.user().clone(),
        form_valid: controller.is_form_valid(),
        instruction: controller.instruction().to_string(),
        tiles: controller.tiles(),
    });
}

fn send_categories(outbox: &Outbox) {
    let _ = outbox.send(ServerMessage::ShopCategories {
        categories: ShopCategory::ALL
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
    });
}
