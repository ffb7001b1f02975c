pub mod clipboard;
pub mod gemini;
pub mod sst;

pub use clipboard::WsClipboardAdapter;
pub use gemini::GeminiAdapter;
pub use sst::OpenAiSstAdapter;
