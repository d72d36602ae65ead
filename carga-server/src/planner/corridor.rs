//! Route corridor matching.
//!
//! Finds the stations "on the way" for a driving route: everything
//! within a lateral corridor around the route polyline, positioned by
//! how far along the route its closest point lies.

use std::sync::Arc;

use geo::Point;
use tracing::debug;

use crate::domain::{RouteMatch, Station};
use crate::spatial;

use super::PlanError;

/// Minimum spacing between route sample points, km.
///
/// Directions services return vertices every few meters in cities;
/// resampling bounds the matching cost independent of that density.
const SAMPLE_SPACING_KM: f64 = 2.0;

/// A resampled point on the route with its cumulative distance.
struct RouteSample {
    point: Point<f64>,
    route_km: f64,
}

/// Resample a route polyline into samples at least [`SAMPLE_SPACING_KM`]
/// apart, accumulating cumulative distance over the raw vertices.
///
/// The first and last vertices are always sampled so the corridor covers
/// the full departure and arrival approaches.
fn resample_route(route: &[(f64, f64)]) -> Vec<RouteSample> {
    let mut samples = Vec::new();

    let first = Point::new(route[0].0, route[0].1);
    samples.push(RouteSample {
        point: first,
        route_km: 0.0,
    });

    let mut cumulative_km = 0.0;
    let mut since_last_sample_km = 0.0;
    let mut previous = first;

    for &(lon, lat) in &route[1..] {
        let vertex = Point::new(lon, lat);
        let leg_km = spatial::distance_km(previous, vertex);
        cumulative_km += leg_km;
        since_last_sample_km += leg_km;
        previous = vertex;

        if since_last_sample_km >= SAMPLE_SPACING_KM {
            samples.push(RouteSample {
                point: vertex,
                route_km: cumulative_km,
            });
            since_last_sample_km = 0.0;
        }
    }

    // Keep the final vertex even if it lands inside the spacing window.
    if since_last_sample_km > 0.0 {
        samples.push(RouteSample {
            point: previous,
            route_km: cumulative_km,
        });
    }

    samples
}

/// Match every locatable station against the route.
///
/// Returns at most one [`RouteMatch`] per station: the ones whose minimum
/// distance to a route sample is within `corridor_km`, sorted ascending
/// by position along the route.
///
/// Brute-force station-by-sample distance: O(stations x samples), which
/// is fine at a few thousand stations and a few hundred samples. A
/// spatial index would be the natural upgrade if either grows.
pub fn match_along_route(
    stations: &[Arc<Station>],
    route: &[(f64, f64)],
    corridor_km: f64,
) -> Result<Vec<RouteMatch>, PlanError> {
    if route.len() < 2 {
        return Err(PlanError::EmptyRoute);
    }
    if corridor_km <= 0.0 {
        return Err(PlanError::InvalidCorridor(corridor_km));
    }

    let samples = resample_route(route);

    let mut matches = Vec::new();

    for station in stations {
        let Some(coordinate) = station.coordinate else {
            continue;
        };
        let station_point = coordinate.point();

        let mut best_km = f64::INFINITY;
        let mut best_route_km = 0.0;

        for sample in &samples {
            let d = spatial::distance_km(station_point, sample.point);
            if d < best_km {
                best_km = d;
                best_route_km = sample.route_km;
            }
        }

        if best_km <= corridor_km {
            matches.push(RouteMatch::new(
                Arc::clone(station),
                best_km,
                best_route_km,
            ));
        }
    }

    matches.sort_by(|a, b| a.route_km.total_cmp(&b.route_km));

    debug!(
        stations = stations.len(),
        samples = samples.len(),
        matches = matches.len(),
        "matched stations along route"
    );

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Station};

    /// A station at the given coordinates.
    fn station_at(id: &str, lat: f64, lon: f64) -> Arc<Station> {
        let mut station = Station::new(id, id);
        station.coordinate = Some(Coordinate::new(lat, lon));
        Arc::new(station)
    }

    /// A straight north-south route along a meridian, vertices every
    /// ~1.1 km (0.01 degrees of latitude).
    fn southbound_route(start_lat: f64, vertex_count: usize) -> Vec<(f64, f64)> {
        (0..vertex_count)
            .map(|i| (-70.65, start_lat - 0.01 * i as f64))
            .collect()
    }

    #[test]
    fn rejects_degenerate_route() {
        let stations = vec![station_at("a", -33.45, -70.65)];

        assert!(matches!(
            match_along_route(&stations, &[], 5.0),
            Err(PlanError::EmptyRoute)
        ));
        assert!(matches!(
            match_along_route(&stations, &[(-70.65, -33.45)], 5.0),
            Err(PlanError::EmptyRoute)
        ));
    }

    #[test]
    fn rejects_non_positive_corridor() {
        let stations = vec![station_at("a", -33.45, -70.65)];
        let route = southbound_route(-33.0, 10);

        assert!(matches!(
            match_along_route(&stations, &route, 0.0),
            Err(PlanError::InvalidCorridor(_))
        ));
    }

    #[test]
    fn resampling_respects_spacing() {
        // ~111 km of route with a vertex every ~1.1 km.
        let route = southbound_route(-33.0, 101);
        let samples = resample_route(&route);

        // First and last vertices are always present.
        assert_eq!(samples[0].route_km, 0.0);
        let last = samples.last().unwrap();
        assert!((last.route_km - 111.0).abs() < 2.0, "got {}", last.route_km);

        for pair in samples.windows(2) {
            let gap = pair[1].route_km - pair[0].route_km;
            assert!(gap >= SAMPLE_SPACING_KM, "sample gap {gap} too small");
        }
    }

    #[test]
    fn matches_only_within_corridor() {
        let route = southbound_route(-33.0, 101);

        // On the route, ~2 km east of it, and ~40 km east of it.
        let stations = vec![
            station_at("on-route", -33.5, -70.65),
            station_at("near", -33.5, -70.6285),
            station_at("far", -33.5, -70.22),
        ];

        let matches = match_along_route(&stations, &route, 5.0).unwrap();

        let ids: Vec<&str> = matches.iter().map(|m| m.station.id.as_str()).collect();
        assert_eq!(ids, vec!["on-route", "near"]);

        for m in &matches {
            assert!(m.distance_km <= 5.0);
        }
    }

    #[test]
    fn route_position_is_km_from_origin() {
        let route = southbound_route(-33.0, 101);

        // Half a degree south of the start: ~55.7 km along.
        let stations = vec![station_at("mid", -33.5, -70.65)];
        let matches = match_along_route(&stations, &route, 5.0).unwrap();

        assert_eq!(matches.len(), 1);
        assert!(
            (matches[0].route_km - 55.7).abs() < 2.5,
            "got {}",
            matches[0].route_km
        );
    }

    #[test]
    fn matches_sorted_by_route_position() {
        let route = southbound_route(-33.0, 101);

        let stations = vec![
            station_at("south", -33.9, -70.65),
            station_at("north", -33.1, -70.65),
            station_at("middle", -33.5, -70.65),
        ];

        let matches = match_along_route(&stations, &route, 5.0).unwrap();
        let ids: Vec<&str> = matches.iter().map(|m| m.station.id.as_str()).collect();

        assert_eq!(ids, vec!["north", "middle", "south"]);
    }

    #[test]
    fn stations_without_coordinates_are_skipped() {
        let route = southbound_route(-33.0, 10);

        let unlocated = Arc::new(Station::new("nowhere", "Sin ubicacion"));
        let located = station_at("here", -33.02, -70.65);

        let matches = match_along_route(&[unlocated, located], &route, 5.0).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].station.id, "here");
    }

    #[test]
    fn dense_vertices_do_not_inflate_samples() {
        // Same geometry at 10x vertex density should produce roughly the
        // same number of samples.
        let sparse = southbound_route(-33.0, 101);
        let dense: Vec<(f64, f64)> = (0..1001)
            .map(|i| (-70.65, -33.0 - 0.001 * i as f64))
            .collect();

        let sparse_samples = resample_route(&sparse).len();
        let dense_samples = resample_route(&dense).len();

        assert!(
            dense_samples < sparse_samples + sparse_samples / 4,
            "sparse {sparse_samples} vs dense {dense_samples}"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Coordinate, Station};
    use proptest::prelude::*;

    fn route_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
        // Southbound routes of varying length and density near Santiago.
        (2usize..60, -34.0f64..-33.0).prop_map(|(n, start_lat)| {
            (0..n)
                .map(|i| (-70.65, start_lat - 0.02 * i as f64))
                .collect()
        })
    }

    fn stations_strategy() -> impl Strategy<Value = Vec<Arc<Station>>> {
        prop::collection::vec((-34.5f64..-32.5, -71.5f64..-70.0), 0..30).prop_map(|coords| {
            coords
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lon))| {
                    let mut s = Station::new(format!("s{i}"), format!("s{i}"));
                    s.coordinate = Some(Coordinate::new(lat, lon));
                    Arc::new(s)
                })
                .collect()
        })
    }

    proptest! {
        /// No match ever exceeds the corridor width.
        #[test]
        fn corridor_bound_holds(
            route in route_strategy(),
            stations in stations_strategy(),
            corridor in 1.0f64..20.0,
        ) {
            let matches = match_along_route(&stations, &route, corridor).unwrap();
            for m in &matches {
                prop_assert!(m.distance_km <= corridor);
            }
        }

        /// Matches are sorted by route position and unique per station.
        #[test]
        fn matches_sorted_and_unique(
            route in route_strategy(),
            stations in stations_strategy(),
        ) {
            let matches = match_along_route(&stations, &route, 10.0).unwrap();

            for pair in matches.windows(2) {
                prop_assert!(pair[0].route_km <= pair[1].route_km);
            }

            let mut ids: Vec<&str> = matches.iter().map(|m| m.station.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), matches.len());
        }
    }
}
