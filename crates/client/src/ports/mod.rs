//! Port definitions.
//!
//! Application services depend only on these traits; concrete adapters live
//! in `crate::infrastructure`.

pub mod outbound;
