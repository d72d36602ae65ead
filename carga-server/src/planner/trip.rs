//! Trip planning orchestration.
//!
//! Composes the corridor matcher, stop selector and energy projector
//! into the single call the web layer uses.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Station, TripPlan};

use super::PlanError;
use super::config::{PlannerConfig, Terrain};
use super::corridor::match_along_route;
use super::energy::project_energy;
use super::select::select_stops;

/// Default starting state of charge when the caller does not say.
const DEFAULT_START_SOC_PERCENT: f64 = 80.0;

/// One trip to plan.
///
/// The route polyline, distance and duration come from the external
/// directions service; the vehicle parameters from the user.
#[derive(Debug, Clone)]
pub struct TripRequest {
    /// Ordered route vertices as (longitude, latitude).
    pub route: Vec<(f64, f64)>,

    /// Total driving distance, km.
    pub total_distance_km: f64,

    /// Driving duration, minutes.
    pub duration_mins: u32,

    /// Battery capacity, kWh.
    pub battery_kwh: f64,

    /// Starting state of charge, percent.
    pub start_soc_percent: f64,

    /// Terrain preset selecting the consumption figure.
    pub terrain: Terrain,

    /// Corridor half-width override, km. `None` uses the configured
    /// default.
    pub corridor_km: Option<f64>,
}

impl TripRequest {
    /// Create a request with the default starting charge (80%), default
    /// terrain and default corridor.
    pub fn new(
        route: Vec<(f64, f64)>,
        total_distance_km: f64,
        duration_mins: u32,
        battery_kwh: f64,
    ) -> Self {
        Self {
            route,
            total_distance_km,
            duration_mins,
            battery_kwh,
            start_soc_percent: DEFAULT_START_SOC_PERCENT,
            terrain: Terrain::default(),
            corridor_km: None,
        }
    }
}

/// Plan charging stops for a trip.
///
/// Pure function of the station set and the request: equal inputs give
/// equal plans. Executes synchronously to completion; there is nothing
/// to cancel and nothing shared across invocations.
pub fn plan_trip(
    stations: &[Arc<Station>],
    request: &TripRequest,
    config: &PlannerConfig,
) -> Result<TripPlan, PlanError> {
    if !(request.battery_kwh > 0.0) {
        return Err(PlanError::InvalidBattery(request.battery_kwh));
    }
    if !(request.start_soc_percent > 0.0 && request.start_soc_percent <= 100.0) {
        return Err(PlanError::InvalidSoc(request.start_soc_percent));
    }

    let consumption = request.terrain.consumption_kwh_per_100km();

    // Range the car actually has at departure, from the current charge.
    let range_km =
        request.battery_kwh * (request.start_soc_percent / 100.0) / consumption * 100.0;

    let corridor_km = request
        .corridor_km
        .unwrap_or(config.corridor_half_width_km);

    let matches = match_along_route(stations, &request.route, corridor_km)?;
    let stops = select_stops(&matches, range_km, request.total_distance_km, config)?;

    debug!(
        range_km,
        matches = matches.len(),
        stops = stops.len(),
        "selected stops"
    );

    let projection = project_energy(
        stops,
        request.start_soc_percent,
        request.battery_kwh,
        consumption,
        request.total_distance_km,
        config,
    )?;

    Ok(TripPlan {
        total_distance_km: request.total_distance_km,
        duration_mins: request.duration_mins,
        range_km,
        stops: projection.stops,
        destination_arrival_soc_percent: projection.destination_arrival_soc_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Availability, Connector, ConnectorStandard, ConnectorStatus, Coordinate, PowerType,
    };

    /// Kilometers per degree of latitude, close enough for test routes.
    const KM_PER_DEG: f64 = 111.2;

    /// A straight southbound route starting at (-33.0, -70.65) covering
    /// `length_km`, with a vertex every ~1.1 km.
    fn southbound_route(length_km: f64) -> Vec<(f64, f64)> {
        let vertices = (length_km / KM_PER_DEG / 0.01) as usize + 1;
        (0..vertices)
            .map(|i| (-70.65, -33.0 - 0.01 * i as f64))
            .collect()
    }

    /// A DC, currently-available station at `route_km` along that route.
    fn dc_station_at_km(id: &str, route_km: f64) -> Arc<Station> {
        let mut station = Station::new(id, id);
        station.coordinate = Some(Coordinate::new(-33.0 - route_km / KM_PER_DEG, -70.65));

        let mut connector = Connector::new(ConnectorStandard::Ccs, PowerType::Dc);
        connector.status = ConnectorStatus::Available;
        connector.max_power_kw = 60.0;
        station.set_connectors(vec![connector]);
        station.set_availability(Availability {
            evse_count: 1,
            available: 1,
            in_use: 0,
            no_data: 0,
            other: 0,
        });
        Arc::new(station)
    }

    #[test]
    fn short_trip_needs_no_mandatory_stops() {
        // 60 kWh at 80% on moderate terrain: range = 48/17*100 = 282.4 km,
        // usable = 225.9 km. A 200 km trip fits.
        let stations = vec![dc_station_at_km("mid", 100.0)];
        let request = TripRequest::new(southbound_route(200.0), 200.0, 130, 60.0);

        let plan = plan_trip(&stations, &request, &PlannerConfig::default()).unwrap();

        assert!((plan.range_km - 282.35).abs() < 0.1);
        assert!(plan.stops.iter().all(|s| s.is_optional));
        // 48 kWh - 34 kWh = 14 kWh = 23%.
        assert_eq!(plan.destination_arrival_soc_percent, 23);
    }

    #[test]
    fn long_trip_stops_near_range_limit() {
        // Same car, 500 km trip, DC stations at km 230 and km 460.
        let stations = vec![
            dc_station_at_km("early", 15.0),
            dc_station_at_km("first", 230.0),
            dc_station_at_km("second", 460.0),
        ];
        let request = TripRequest::new(southbound_route(500.0), 500.0, 320, 60.0);

        let plan = plan_trip(&stations, &request, &PlannerConfig::default()).unwrap();

        assert_eq!(plan.stops.len(), 2);
        assert!(plan.stops.iter().all(|s| !s.is_optional));
        assert_eq!(plan.stops[0].matched.station.id, "first");
        assert_eq!(plan.stops[1].matched.station.id, "second");
        assert!((plan.stops[0].route_km() - 230.0).abs() < 3.0);
        assert!((plan.stops[1].route_km() - 460.0).abs() < 3.0);

        // Every stop has a projected arrival percentage.
        assert!(plan.stops.iter().all(|s| s.arrival_soc_percent.is_some()));
    }

    #[test]
    fn plan_is_idempotent() {
        let stations = vec![
            dc_station_at_km("a", 150.0),
            dc_station_at_km("b", 260.0),
            dc_station_at_km("c", 410.0),
        ];
        let request = TripRequest::new(southbound_route(450.0), 450.0, 290, 52.0);
        let config = PlannerConfig::default();

        let first = plan_trip(&stations, &request, &config).unwrap();
        let second = plan_trip(&stations, &request, &config).unwrap();

        assert_eq!(first.stops.len(), second.stops.len());
        assert_eq!(
            first.destination_arrival_soc_percent,
            second.destination_arrival_soc_percent
        );
        for (a, b) in first.stops.iter().zip(second.stops.iter()) {
            assert_eq!(a.matched.station.id, b.matched.station.id);
            assert_eq!(a.arrival_soc_percent, b.arrival_soc_percent);
        }
    }

    #[test]
    fn invalid_battery_fails_fast() {
        let request = TripRequest::new(southbound_route(100.0), 100.0, 70, 0.0);
        let result = plan_trip(&[], &request, &PlannerConfig::default());

        assert!(matches!(result, Err(PlanError::InvalidBattery(_))));
    }

    #[test]
    fn invalid_soc_fails_fast() {
        let mut request = TripRequest::new(southbound_route(100.0), 100.0, 70, 60.0);
        request.start_soc_percent = 0.0;

        let result = plan_trip(&[], &request, &PlannerConfig::default());
        assert!(matches!(result, Err(PlanError::InvalidSoc(_))));
    }

    #[test]
    fn empty_route_fails_fast() {
        let request = TripRequest::new(vec![], 100.0, 70, 60.0);
        let result = plan_trip(&[], &request, &PlannerConfig::default());

        assert!(matches!(result, Err(PlanError::EmptyRoute)));
    }

    #[test]
    fn terrain_changes_range() {
        let route = southbound_route(200.0);

        let mut request = TripRequest::new(route.clone(), 200.0, 130, 60.0);
        request.terrain = Terrain::Flat;
        let flat = plan_trip(&[], &request, &PlannerConfig::default()).unwrap();

        request.terrain = Terrain::Mountain;
        let mountain = plan_trip(&[], &request, &PlannerConfig::default()).unwrap();

        // 48/15*100 = 320 km vs 48/21*100 = 228.6 km.
        assert!(flat.range_km > mountain.range_km);
        assert!((flat.range_km - 320.0).abs() < 0.1);
        assert!((mountain.range_km - 228.57).abs() < 0.1);
        assert!(
            flat.destination_arrival_soc_percent > mountain.destination_arrival_soc_percent
        );
    }
}
