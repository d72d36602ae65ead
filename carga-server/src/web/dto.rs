//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ChargeStop, ConnectorStandard, PowerType, Station, TripPlan};
use crate::filter::StatusMode;

/// Query for the station listing.
#[derive(Debug, Default, Deserialize)]
pub struct StationsQuery {
    /// Comma-separated connector standards (e.g. "ccs,type2")
    pub standards: Option<String>,

    /// Comma-separated power types (e.g. "dc")
    pub power_types: Option<String>,

    /// Availability mode
    #[serde(default)]
    pub status: StatusMode,

    /// Reference latitude for a nearest-station query
    pub lat: Option<f64>,

    /// Reference longitude for a nearest-station query
    pub lon: Option<f64>,

    /// Radius in km around the reference point
    pub radius_km: Option<f64>,
}

/// Parse a comma-separated standards list.
pub fn parse_standards(csv: &str) -> Result<Vec<ConnectorStandard>, String> {
    csv.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let standard = ConnectorStandard::parse(token);
            if standard == ConnectorStandard::Unknown
                && !token.eq_ignore_ascii_case("unknown")
                && !token.eq_ignore_ascii_case("desconocido")
            {
                Err(format!("unknown connector standard: {token}"))
            } else {
                Ok(standard)
            }
        })
        .collect()
}

/// Parse a comma-separated power-type list.
pub fn parse_power_types(csv: &str) -> Result<Vec<PowerType>, String> {
    csv.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match PowerType::parse(token) {
            PowerType::Unknown if !token.eq_ignore_ascii_case("unknown") => {
                Err(format!("unknown power type: {token}"))
            }
            power => Ok(power),
        })
        .collect()
}

/// A connector in a station response.
#[derive(Debug, Serialize)]
pub struct ConnectorResult {
    /// Display label of the plug standard (e.g. "Tipo 2 (Mennekes)")
    pub standard: String,

    /// "AC", "DC" or "?"
    pub power_type: String,

    /// Rated power, kW
    pub max_power_kw: f64,

    /// Display label of the status (verbatim upstream string for
    /// out-of-vocabulary statuses)
    pub status: String,

    /// Number of identical plugs
    pub quantity: u32,
}

/// A station in listing responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub commune: Option<String>,
    pub region: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub operator: Option<String>,
    pub open_24h: Option<bool>,

    /// Last provider update, RFC 3339
    pub last_updated: Option<String>,

    /// Distance from the query reference point, km (nearest queries only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,

    /// Distinct standard labels
    pub standards: Vec<String>,

    /// Distinct power types
    pub power_types: Vec<String>,

    /// Max rated power across connectors, kW
    pub max_power_kw: f64,

    pub evse_count: u32,
    pub available_count: u32,
    pub in_use_count: u32,
    pub no_data_count: u32,
    pub has_available: bool,

    pub connectors: Vec<ConnectorResult>,
}

fn power_type_label(power: PowerType) -> String {
    match power {
        PowerType::Ac => "AC".to_string(),
        PowerType::Dc => "DC".to_string(),
        PowerType::Unknown => "?".to_string(),
    }
}

impl StationResult {
    /// Build a response row from a station, with an optional transient
    /// distance from a query reference point.
    pub fn from_station(station: &Station, distance_km: Option<f64>) -> Self {
        let availability = station.availability();

        Self {
            id: station.id.clone(),
            name: station.name.clone(),
            address: station.address.clone(),
            commune: station.commune.clone(),
            region: station.region.clone(),
            lat: station.coordinate.map(|c| c.lat),
            lon: station.coordinate.map(|c| c.lon),
            operator: station.operator.clone(),
            open_24h: station.open_24h,
            last_updated: station.last_updated.map(|t| t.to_rfc3339()),
            distance_km: distance_km.or(station.distance_km),
            standards: station
                .standards()
                .iter()
                .map(|s| s.label().to_string())
                .collect(),
            power_types: station
                .power_types()
                .iter()
                .map(|p| power_type_label(*p))
                .collect(),
            max_power_kw: station.max_power_kw(),
            evse_count: availability.evse_count,
            available_count: availability.available,
            in_use_count: availability.in_use,
            no_data_count: availability.no_data,
            has_available: availability.has_available(),
            connectors: station
                .connectors()
                .iter()
                .map(|c| ConnectorResult {
                    standard: c.standard.label().to_string(),
                    power_type: power_type_label(c.power_type),
                    max_power_kw: c.max_power_kw,
                    status: c.status_display().to_string(),
                    quantity: c.quantity,
                })
                .collect(),
        }
    }
}

/// Response for the station listing.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
    pub total: usize,
}

/// Request to plan a trip.
///
/// The route comes straight from the directions service the browser
/// already called: vertices as (longitude, latitude), distance in
/// meters, duration in seconds.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Route vertices as [lon, lat] pairs
    pub route: Vec<(f64, f64)>,

    /// Total route distance, meters
    pub distance_m: f64,

    /// Route duration, seconds
    pub duration_s: f64,

    /// Battery capacity, kWh
    pub battery_kwh: f64,

    /// Starting state of charge, percent (defaults to 80)
    pub start_soc_percent: Option<f64>,

    /// Terrain preset: "flat", "moderate" or "mountain"
    pub terrain: Option<String>,

    /// Corridor half-width override, km
    pub corridor_km: Option<f64>,
}

/// A charging stop in a plan response.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub station: StationResult,

    /// Position along the route, km from origin
    pub route_km: f64,

    /// Detour off the route, km
    pub distance_km: f64,

    /// Whether the station offers DC fast charging
    pub is_dc: bool,

    /// Whether the stop is merely suggested
    pub is_optional: bool,

    /// Projected battery percentage on arrival
    pub arrival_soc_percent: Option<u8>,
}

impl StopResult {
    pub fn from_stop(stop: &ChargeStop) -> Self {
        Self {
            station: StationResult::from_station(&stop.matched.station, None),
            route_km: stop.matched.route_km,
            distance_km: stop.matched.distance_km,
            is_dc: stop.matched.is_dc,
            is_optional: stop.is_optional,
            arrival_soc_percent: stop.arrival_soc_percent,
        }
    }
}

/// Response for a planned trip.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub total_distance_km: f64,
    pub duration_mins: u32,

    /// Estimated range at trip start, km
    pub range_km: f64,

    pub stops: Vec<StopResult>,
    pub destination_arrival_soc_percent: u8,
}

impl PlanResponse {
    pub fn from_plan(plan: &TripPlan) -> Self {
        Self {
            total_distance_km: plan.total_distance_km,
            duration_mins: plan.duration_mins,
            range_km: plan.range_km,
            stops: plan.stops.iter().map(StopResult::from_stop).collect(),
            destination_arrival_soc_percent: plan.destination_arrival_soc_percent,
        }
    }
}

/// Error payload for non-2xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
