//! Route-planning result types.
//!
//! These are transient values: recomputed from scratch on every planning
//! request, never cached across trips.

use std::sync::Arc;

use super::station::Station;

/// A station matched against a planned route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched station. Shared, not copied; the station set outlives
    /// any individual plan.
    pub station: Arc<Station>,

    /// Distance from the station to the nearest sampled route point, km.
    pub distance_km: f64,

    /// Position along the route of that nearest sample, km from origin.
    pub route_km: f64,

    /// Whether the station offers DC fast charging.
    pub is_dc: bool,
}

impl RouteMatch {
    pub fn new(station: Arc<Station>, distance_km: f64, route_km: f64) -> Self {
        let is_dc = station.has_dc();
        Self {
            station,
            distance_km,
            route_km,
            is_dc,
        }
    }
}

/// A route match selected as a charging stop.
#[derive(Debug, Clone)]
pub struct ChargeStop {
    /// The underlying match.
    pub matched: RouteMatch,

    /// True when the trip fits within range and this stop is merely a
    /// suggestion; false when the stop is required to complete the trip.
    pub is_optional: bool,

    /// Projected battery percentage on arrival at this stop. Filled by
    /// the energy projector after selection, never during it.
    pub arrival_soc_percent: Option<u8>,
}

impl ChargeStop {
    pub fn mandatory(matched: RouteMatch) -> Self {
        Self {
            matched,
            is_optional: false,
            arrival_soc_percent: None,
        }
    }

    pub fn optional(matched: RouteMatch) -> Self {
        Self {
            matched,
            is_optional: true,
            arrival_soc_percent: None,
        }
    }

    /// Position along the route, km from origin.
    pub fn route_km(&self) -> f64 {
        self.matched.route_km
    }
}

/// The planner's answer for one trip.
#[derive(Debug, Clone)]
pub struct TripPlan {
    /// Total driving distance, km (from the external directions service).
    pub total_distance_km: f64,

    /// Driving duration in minutes (from the external directions service).
    pub duration_mins: u32,

    /// Estimated range at trip start, km.
    pub range_km: f64,

    /// Ordered charging stops, possibly empty.
    pub stops: Vec<ChargeStop>,

    /// Projected battery percentage on arrival at the destination.
    pub destination_arrival_soc_percent: u8,
}
