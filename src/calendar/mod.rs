pub mod client;
pub mod format;
pub mod models;
pub mod window;

pub use client::CalendarClient;
pub use models::CalendarEvent;
pub use window::{EventWindow, MAX_EVENTS};
