//! SEC live-feed DTOs.
//!
//! The feed is flat: one row per socket, with the station fields
//! repeated on every row. Statuses are Spanish.

use serde::Deserialize;

use crate::sources::ea::RawId;

/// One socket row from the live feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecSocketRow {
    /// Station identifier, repeated on every socket row of the station.
    pub station_id: Option<RawId>,

    /// Station name.
    pub station_name: Option<String>,

    /// Street address.
    pub address: Option<String>,

    /// Commune (municipality).
    pub commune: Option<String>,

    /// Administrative region.
    pub region: Option<String>,

    /// Latitude in WGS84 degrees.
    pub latitude: Option<f64>,

    /// Longitude in WGS84 degrees.
    pub longitude: Option<f64>,

    /// Plug standard of this socket (e.g. "CCS 2", "Tipo 2").
    pub connector_type: Option<String>,

    /// "AC" or "DC".
    pub power_type: Option<String>,

    /// Rated power of this socket, kW.
    pub power_kw: Option<f64>,

    /// Live status, Spanish (e.g. "DISPONIBLE", "OCUPADO").
    pub status: Option<String>,

    /// Last telemetry timestamp, RFC 3339.
    pub updated_at: Option<String>,
}
