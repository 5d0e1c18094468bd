//! Shared pipeline state

pub mod busy;
pub mod current_file;

pub use busy::{BusyFlag, BusyGuard};
pub use current_file::{CurrentFileRegister, FileTicket};
