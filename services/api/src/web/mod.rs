pub mod dictation_task;
pub mod protocol;
pub mod reading_task;
pub mod rest;
pub mod state;
pub mod tarot_task;
pub mod ws_handler;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the handlers the binary wires into the router.
pub use rest::{create_reading_handler, get_category_handler, health_handler, list_categories_handler};
pub use ws_handler::ws_handler;
