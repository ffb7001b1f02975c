//! crates/oracle_core/src/panel.rs
//!
//! Loading state for the simple reading views (astrology, vedic, numerology,
//! chinese). Each entry into a view issues a fresh ticket; a completion is only
//! applied when it carries the current ticket, so results that arrive after
//! the user has moved on are dropped.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::{ReadingClient, ReadingResult};
use crate::domain::{ReadingData, ReadingKind, UserData};

pub const LOADING_MESSAGE: &str = "Consulting the Stars...";
pub const ERROR_MESSAGE: &str = "Error loading reading.";

/// Identifies one outstanding reading request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket(Uuid);

impl Ticket {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Ticket {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Idle,
    Loading(Ticket),
    Ready(ReadingData),
    /// Terminal for this view instance; the user re-enters the view to retry.
    Failed,
}

#[derive(Debug, Clone)]
pub struct ReadingPanel {
    kind: Option<ReadingKind>,
    state: PanelState,
}

impl Default for ReadingPanel {
    fn default() -> Self {
        Self {
            kind: None,
            state: PanelState::Idle,
        }
    }
}

impl ReadingPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> Option<ReadingKind> {
        self.kind
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn reading(&self) -> Option<&ReadingData> {
        match &self.state {
            PanelState::Ready(reading) => Some(reading),
            _ => None,
        }
    }

    /// Enters a view: any earlier request becomes stale.
    pub fn begin(&mut self, kind: ReadingKind) -> Ticket {
        let ticket = Ticket::new();
        self.kind = Some(kind);
        self.state = PanelState::Loading(ticket);
        ticket
    }

    /// Applies a completion. Returns `false` if the ticket is stale.
    pub fn resolve(&mut self, ticket: Ticket, result: ReadingResult<ReadingData>) -> bool {
        if self.state != PanelState::Loading(ticket) {
            debug!("Dropping stale reading result");
            return false;
        }
        self.state = match result {
            Ok(reading) => PanelState::Ready(reading),
            Err(e) => {
                warn!("Reading view failed: {}", e);
                PanelState::Failed
            }
        };
        true
    }

    /// Leaves the view, discarding whatever it held.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Enters a view and waits for its reading in one step.
    pub async fn load(&mut self, client: &ReadingClient, user: &UserData, kind: ReadingKind) {
        let ticket = self.begin(kind);
        let result = client.fetch_reading(user, kind, None).await;
        self.resolve(ticket, result);
    }
}
