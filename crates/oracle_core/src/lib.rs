pub mod client;
pub mod domain;
pub mod modal;
pub mod navigation;
pub mod panel;
pub mod ports;
pub mod render;
pub mod request;
pub mod schema;
pub mod shop;
pub mod tarot;

pub use client::{GenerationSettings, ReadingClient, ReadingError, ReadingResult};
pub use domain::{
    AstrologyReading, ChineseReading, Dosha, Mood, NumerologyReading, ReadingData, ReadingKind,
    ReadingType, TarotCard, TarotReading, UserData, VedicReading,
};
pub use modal::{ModalState, ReadingModal};
pub use navigation::{Screen, Tile, ViewController};
pub use panel::{PanelState, ReadingPanel, Ticket};
pub use ports::{
    ClipboardService, GenerationRequest, GenerationService, PortError, PortResult,
    SpeechToTextService,
};
pub use schema::SchemaDescriptor;
pub use shop::{ShopBrowser, ShopCategory};
pub use tarot::{DictationError, ShuffleOrder, TarotFlow, TarotStep};
