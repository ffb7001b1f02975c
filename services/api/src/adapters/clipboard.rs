//! services/api/src/adapters/clipboard.rs
//!
//! The browser owns the clipboard, so this adapter forwards the text to the
//! connected client as a `clipboard_write` message.

use async_trait::async_trait;
use oracle_core::ports::{ClipboardService, PortError, PortResult};

use crate::web::protocol::{Outbox, ServerMessage};

#[derive(Clone)]
pub struct WsClipboardAdapter {
    outbox: Outbox,
}

impl WsClipboardAdapter {
    pub fn new(outbox: Outbox) -> Self {
        Self { outbox }
    }
}

#[async_trait]
impl ClipboardService for WsClipboardAdapter {
    async fn write_text(&self, text: &str) -> PortResult<()> {
        self.outbox
            .send(ServerMessage::ClipboardWrite {
                text: text.to_string(),
            })
            .map_err(|_| PortError::Unavailable("The client has disconnected".to_string()))
    }
}
