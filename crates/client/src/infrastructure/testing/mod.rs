//! Test doubles for the outbound ports.
//!
//! Only compiled in test mode.

mod platform;
mod scripted_api;

pub use platform::{InstantSleep, MemoryStorage, RecordingNavigator};
pub use scripted_api::ScriptedApi;
