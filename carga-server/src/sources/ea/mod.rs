//! Energía Abierta charge-point listing source.
//!
//! The primary data source: a paginated REST listing where each record
//! is a charge point with an EVSE/connector hierarchy. Rich on static
//! detail (connectors, power, operator), not always current on live
//! status.

mod client;
mod convert;
mod types;

pub use client::{EaClient, EaConfig};
pub use convert::convert_charge_point;
pub use types::{EaChargePoint, EaConnector, EaEvse, EaListing, RawId};
