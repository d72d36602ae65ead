//! The canonical charging-station entity.
//!
//! Stations are produced by the source normalizers and rebuilt wholesale
//! on every data refresh; nothing mutates a station set in place.

use chrono::{DateTime, Utc};
use geo::Point;

use super::connector::{Connector, ConnectorStandard, PowerType};

/// A geographic coordinate (WGS84 degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// As a `geo` point (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Aggregated unit-level availability for a station.
///
/// Counts are per charging unit (EVSE/socket), not per connector entry.
/// Invariant: `available + in_use + no_data + other == evse_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    /// Total number of charging units at the station.
    pub evse_count: u32,
    /// Units ready to charge right now.
    pub available: u32,
    /// Units with a vehicle plugged in.
    pub in_use: u32,
    /// Units the provider has no live telemetry for.
    pub no_data: u32,
    /// Units in a known-unusable state.
    pub other: u32,
}

impl Availability {
    /// At least one unit is ready to charge.
    pub fn has_available(&self) -> bool {
        self.available > 0
    }

    /// At least one unit has a vehicle plugged in.
    pub fn has_in_use(&self) -> bool {
        self.in_use > 0
    }

    /// The provider has no live telemetry for any unit.
    pub fn all_no_data(&self) -> bool {
        self.evse_count > 0 && self.no_data == self.evse_count
    }
}

/// A physical charging location.
#[derive(Debug, Clone)]
pub struct Station {
    /// Opaque provider identifier, unique within a source.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Street address, if the provider reports one.
    pub address: Option<String>,

    /// Commune (municipality).
    pub commune: Option<String>,

    /// Administrative region.
    pub region: Option<String>,

    /// Location. `None` marks a record that arrived without coordinates;
    /// such stations are excluded from the map and corridor search but
    /// still appear in listings.
    pub coordinate: Option<Coordinate>,

    /// Owner/operator name.
    pub operator: Option<String>,

    /// Whether the site is open around the clock.
    pub open_24h: Option<bool>,

    /// When the provider last updated this record.
    pub last_updated: Option<DateTime<Utc>>,

    /// Distance in km from a query reference point. Set by location-based
    /// queries only; not part of the station's identity.
    pub distance_km: Option<f64>,

    connectors: Vec<Connector>,
    standards: Vec<ConnectorStandard>,
    power_types: Vec<PowerType>,
    max_power_kw: f64,
    availability: Availability,
}

impl Station {
    /// Create a station with no connectors and no availability data.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            commune: None,
            region: None,
            coordinate: None,
            operator: None,
            open_24h: None,
            last_updated: None,
            distance_km: None,
            connectors: Vec::new(),
            standards: Vec::new(),
            power_types: Vec::new(),
            max_power_kw: 0.0,
            availability: Availability::default(),
        }
    }

    /// Replace the connector list, recomputing the derived aggregates
    /// (distinct standards, distinct power types, max rated power).
    ///
    /// Insertion order is the provider's order and carries no meaning
    /// beyond display.
    pub fn set_connectors(&mut self, connectors: Vec<Connector>) {
        self.standards.clear();
        self.power_types.clear();
        self.max_power_kw = 0.0;

        for connector in &connectors {
            if !self.standards.contains(&connector.standard) {
                self.standards.push(connector.standard);
            }
            if !self.power_types.contains(&connector.power_type) {
                self.power_types.push(connector.power_type);
            }
            if connector.max_power_kw > self.max_power_kw {
                self.max_power_kw = connector.max_power_kw;
            }
        }

        self.connectors = connectors;
    }

    /// Set the aggregated unit-level availability counts.
    ///
    /// The normalizers compute these from unit statuses (with connector
    /// fallback); see the source `convert` modules.
    pub fn set_availability(&mut self, availability: Availability) {
        self.availability = availability;
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Distinct connector standards, in first-seen provider order.
    pub fn standards(&self) -> &[ConnectorStandard] {
        &self.standards
    }

    /// Distinct power types, in first-seen provider order.
    pub fn power_types(&self) -> &[PowerType] {
        &self.power_types
    }

    /// Maximum rated power across connectors, in kW.
    pub fn max_power_kw(&self) -> f64 {
        self.max_power_kw
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Whether the station has any DC fast-charging connector.
    pub fn has_dc(&self) -> bool {
        self.power_types.contains(&PowerType::Dc)
    }

    /// Whether the station can be placed on the map / matched to a route.
    pub fn is_locatable(&self) -> bool {
        self.coordinate.is_some()
    }
}
