//! SEC live socket-status feed.
//!
//! The secondary data source: flat real-time rows, one per socket, with
//! Spanish status strings. Poor on static detail but current on live
//! availability.

mod client;
mod convert;
mod types;

pub use client::{SecClient, SecConfig};
pub use convert::convert_rows;
pub use types::SecSocketRow;
