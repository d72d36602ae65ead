//! Energía Abierta API response DTOs.
//!
//! These types map directly to the JSON of the charge-point listing.
//! They use `Option` liberally: the feed omits fields freely, and a
//! record that is missing almost everything must still deserialize so
//! the normalizer can degrade it instead of dropping the whole page.

use serde::Deserialize;

/// A provider identifier, which the feed sends as either a number or a
/// string depending on the dataset vintage.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// The identifier as an opaque string.
    pub fn as_string(&self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.clone(),
        }
    }
}

/// One page of the charge-point listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EaListing {
    /// Charge points on this page.
    pub data: Vec<EaChargePoint>,

    /// 1-based page number.
    pub page: u32,

    /// Total number of pages for this query.
    pub total_pages: u32,
}

/// A charge point (one physical site) in the listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EaChargePoint {
    /// Provider identifier.
    pub id: Option<RawId>,

    /// Site name.
    pub name: Option<String>,

    /// Street address.
    pub address: Option<String>,

    /// Commune (municipality).
    pub commune: Option<String>,

    /// Administrative region.
    pub region: Option<String>,

    /// Latitude in WGS84 degrees. Missing on a minority of records.
    pub latitude: Option<f64>,

    /// Longitude in WGS84 degrees.
    pub longitude: Option<f64>,

    /// Owner/operator name.
    pub owner: Option<String>,

    /// Whether the site is open around the clock.
    pub open24h: Option<bool>,

    /// Last update timestamp, RFC 3339.
    pub updated_at: Option<String>,

    /// Charging units at this site.
    pub evses: Option<Vec<EaEvse>>,
}

/// One charging unit (EVSE) of a charge point.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EaEvse {
    /// Unit status string (e.g. "AVAILABLE", "CHARGING"). This is the
    /// authoritative status; connector statuses are often stale.
    pub status: Option<String>,

    /// Connectors on this unit.
    pub connectors: Option<Vec<EaConnector>>,
}

/// One connector of a charging unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EaConnector {
    /// Plug standard (e.g. "IEC_62196_T2", "IEC_62196_T2_COMBO").
    pub standard: Option<String>,

    /// "AC" or "DC".
    pub power_type: Option<String>,

    /// Rated maximum power, kW.
    pub max_power_kw: Option<f64>,

    /// Connector-level status string. Known to be unreliable; used only
    /// as a fallback when the unit reports nothing.
    pub status: Option<String>,

    /// Number of identical plugs.
    pub quantity: Option<u32>,

    /// Cable/socket format.
    pub format: Option<String>,
}
