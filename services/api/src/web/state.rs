//! services/api/src/web/state.rs
//!
//! Defines the application's shared and session-specific states.

use crate::config::Config;
use oracle_core::{
    client::ReadingClient,
    modal::ReadingModal,
    navigation::ViewController,
    panel::{ReadingPanel, Ticket},
    ports::SpeechToTextService,
    shop::ShopBrowser,
    tarot::TarotFlow,
};
use std::sync::Arc;
use tracing::warn;

/// About a minute of 48 kHz mono PCM16.
pub const MAX_DICTATION_BYTES: usize = 60 * 48_000 * 2;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reading_client: ReadingClient,
    /// `None` when no speech backend is configured.
    pub speech: Option<Arc<dyn SpeechToTextService>>,
}

//=========================================================================================
// SessionState (Specific to One WebSocket Connection)
//=========================================================================================

/// The state for a single, active WebSocket connection.
#[derive(Default)]
pub struct SessionState {
    pub controller: ViewController,
    pub panel: ReadingPanel,
    pub tarot: TarotFlow,
    pub shop: ShopBrowser,
    pub modal: ReadingModal,
    /// The modal's outstanding fetch, if any.
    pub modal_ticket: Option<Ticket>,
    pub audio_buffer: Vec<u8>,
    pub dictating: bool,
    /// The outstanding transcription, if any.
    pub dictation_ticket: Option<Ticket>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything the current view held.
    pub fn leave_view(&mut self) {
        self.panel.clear();
        self.tarot.reset();
        self.shop.close();
        self.audio_buffer.clear();
        self.dictating = false;
        self.dictation_ticket = None;
    }

    /// Buffers dictation audio. Returns `true` once the buffer is full,
    /// after which further audio is dropped.
    pub fn push_audio(&mut self, data: &[u8]) -> bool {
        if !self.dictating {
            return false;
        }
        let room = MAX_DICTATION_BYTES.saturating_sub(self.audio_buffer.len());
        self.audio_buffer
            .extend_from_slice(&data[..data.len().min(room)]);
        if self.audio_buffer.len() >= MAX_DICTATION_BYTES {
            warn!("Dictation reached {} bytes; stopping.", MAX_DICTATION_BYTES);
            return true;
        }
        false
    }

    /// Stops listening and hands back the audio with a ticket for its transcript.
    pub fn end_dictation(&mut self) -> Option<(Ticket, Vec<u8>)> {
        if !self.dictating {
            return None;
        }
        self.dictating = false;
        let ticket = Ticket::new();
        self.dictation_ticket = Some(ticket);
        Some((ticket, std::mem::take(&mut self.audio_buffer)))
    }
}
