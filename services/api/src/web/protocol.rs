//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser client and the API server.

use oracle_core::{
    domain::{Mood, ReadingData, ReadingKind, ReadingType, TarotReading, UserData},
    navigation::{Screen, Tile},
    shop::ShopCategory,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Queue of messages waiting to be written to one client's socket.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================
// NOTE: Dictation audio is sent as raw Binary frames, not as part of this enum.
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    // --- Home screen ---
    UpdateUser { user: UserData },
    SelectTile { reading_type: ReadingType },
    Confirm,

    /// Leaves whichever view is showing.
    Back,

    /// The shortcut from the Vedic view straight to the shop.
    OpenShop,

    // --- Tarot ---
    SetQuestion { question: String },
    SetMood { mood: Mood },
    DrawCards,
    Reshuffle,

    /// The microphone is live; binary frames that follow are PCM16 audio.
    DictationStarted,
    DictationEnded,

    // --- Shop ---
    OpenCategory { category: ShopCategory },
    CloseCategory,

    // --- Reading modal ---
    OpenModal { reading_type: ReadingType },
    CopyModal,
    CloseModal,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The full top-level view state, sent after every navigation change.
    ViewState {
        #[serde(flatten)]
        screen: Screen,
        user: UserData,
        form_valid: bool,
        instruction: String,
        tiles: Vec<Tile>,
    },

    ReadingLoading { kind: ReadingKind, message: String },
    ReadingReady { reading: ReadingData, markdown: String },
    ReadingFailed { kind: ReadingKind, message: String },

    TarotShuffling { message: String },
    TarotReady { reading: TarotReading },
    /// The shuffle failed; the client is back on the input form.
    TarotFailed { question: String, mood: Option<Mood> },
    Transcript { text: String },

    ShopCategories { categories: Vec<String> },
    ShopProducts { category: String, products: Vec<String> },

    ModalOpened { header: String },
    ModalContent { header: String, content: String },
    ModalClosed,

    /// Text the client should place on the user's clipboard.
    ClipboardWrite { text: String },

    /// A non-fatal message for the user, e.g. an unavailable capability.
    Notice { message: String },

    /// Reports an error to the client, which should display an error message.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_messages_are_type_tagged() {
        let msg: ClientMessage =
            serde_json::from_value(json!({"type": "select_tile", "reading_type": "vedic"})).unwrap();
        assert_eq!(
            msg,
            ClientMessage::SelectTile {
                reading_type: ReadingType::Vedic
            }
        );

        let msg: ClientMessage = serde_json::from_value(json!({
            "type": "update_user",
            "user": {"name": "Ada", "dob": "1990-08-12", "birthPlace": "London"}
        }))
        .unwrap();
        let ClientMessage::UpdateUser { user } = msg else {
            panic!("expected update_user");
        };
        assert!(user.is_complete());

        let msg: ClientMessage =
            serde_json::from_value(json!({"type": "open_category", "category": "online_puja"}))
                .unwrap();
        assert_eq!(
            msg,
            ClientMessage::OpenCategory {
                category: ShopCategory::OnlinePuja
            }
        );
    }

    #[test]
    fn view_state_flattens_the_screen() {
        let msg = ServerMessage::ViewState {
            screen: Screen::Viewing(ReadingType::Tarot),
            user: UserData::default(),
            form_valid: false,
            instruction: String::new(),
            tiles: Vec::new(),
        };
        let value = serde_json::to_value(msg).unwrap();
        assert_eq!(value["type"], "view_state");
        assert_eq!(value["screen"], "viewing");
        assert_eq!(value["reading_type"], "tarot");
    }

    #[test]
    fn clipboard_writes_carry_the_text() {
        let value = serde_json::to_value(ServerMessage::ClipboardWrite { text: "hi".into() }).unwrap();
        assert_eq!(value, json!({"type": "clipboard_write", "text": "hi"}));
    }
}
