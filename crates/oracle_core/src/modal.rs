//! crates/oracle_core/src/modal.rs
//!
//! A reusable overlay for showing one reading, with a copy-to-clipboard action.

use serde::Serialize;
use tracing::info;

use crate::domain::ReadingType;
use crate::ports::{ClipboardService, PortResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModalState {
    Closed,
    Open {
        title: ReadingType,
        /// `None` while the reading is still loading.
        content: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingModal {
    state: ModalState,
}

impl Default for ReadingModal {
    fn default() -> Self {
        Self {
            state: ModalState::Closed,
        }
    }
}

impl ReadingModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ModalState::Open { content: None, .. })
    }

    pub fn content(&self) -> Option<&str> {
        match &self.state {
            ModalState::Open {
                content: Some(content),
                ..
            } => Some(content),
            _ => None,
        }
    }

    /// "<title> Reading", or `None` while closed.
    pub fn header(&self) -> Option<String> {
        match &self.state {
            ModalState::Open { title, .. } => Some(format!("{} Reading", title.title())),
            ModalState::Closed => None,
        }
    }

    pub fn open_loading(&mut self, title: ReadingType) {
        self.state = ModalState::Open {
            title,
            content: None,
        };
    }

    /// Fills an open modal. Ignored once the modal has been closed.
    pub fn show(&mut self, content: impl Into<String>) -> bool {
        match &mut self.state {
            ModalState::Open { content: slot, .. } => {
                *slot = Some(content.into());
                true
            }
            ModalState::Closed => false,
        }
    }

    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    /// Writes the raw content through the clipboard. Nothing to copy is not an error.
    pub async fn copy(&self, clipboard: &dyn ClipboardService) -> PortResult<bool> {
        let Some(content) = self.content() else {
            return Ok(false);
        };
        clipboard.write_text(content).await?;
        info!("Copied {} characters to the clipboard", content.len());
        Ok(true)
    }
}
