//! Predicate filtering of the station set.
//!
//! Used by the map/list endpoint directly; the planner's candidate pools
//! get their preferences through scoring instead, so this layer stays a
//! plain allow-list filter.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{ConnectorStandard, PowerType, Station};

/// Availability filter mode. The three restrictive modes are mutually
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusMode {
    /// No availability restriction.
    #[default]
    All,
    /// Only stations with at least one unit ready to charge.
    AvailableOnly,
    /// Only stations with at least one unit in use.
    InUseOnly,
    /// Only stations with no unit ready to charge.
    UnavailableOnly,
}

/// Filter over the normalized station set.
///
/// `None` allow-lists mean "no restriction". A station with zero
/// connectors always passes the connector and power predicates; there is
/// nothing to exclude it on.
#[derive(Debug, Clone, Default)]
pub struct StationFilter {
    /// Allowed connector standards.
    pub standards: Option<Vec<ConnectorStandard>>,

    /// Allowed power types.
    pub power_types: Option<Vec<PowerType>>,

    /// Availability mode.
    pub status: StatusMode,
}

impl StationFilter {
    /// Whether a single station passes this filter.
    pub fn matches(&self, station: &Station) -> bool {
        if !station.connectors().is_empty() {
            if let Some(allowed) = &self.standards
                && !station.standards().iter().any(|s| allowed.contains(s))
            {
                return false;
            }

            if let Some(allowed) = &self.power_types
                && !station.power_types().iter().any(|p| allowed.contains(p))
            {
                return false;
            }
        }

        let availability = station.availability();
        match self.status {
            StatusMode::All => true,
            StatusMode::AvailableOnly => availability.has_available(),
            StatusMode::InUseOnly => availability.has_in_use(),
            StatusMode::UnavailableOnly => !availability.has_available(),
        }
    }
}

/// Filter a station collection, preserving input order.
pub fn filter_stations(stations: &[Arc<Station>], filter: &StationFilter) -> Vec<Arc<Station>> {
    stations
        .iter()
        .filter(|station| filter.matches(station))
        .cloned()
        .collect()
}
