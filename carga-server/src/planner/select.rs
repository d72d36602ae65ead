//! Charging-stop selection.
//!
//! The algorithmic heart of the planner: given the stations matched
//! along a route, pick an ordered sequence of stops that keeps the trip
//! within usable range, preferring fast and currently-available
//! chargers.
//!
//! Selection is intentionally greedy and local. A stop chosen early can
//! force a worse choice later; we accept that rather than computing a
//! global optimum, because charger availability changes faster than any
//! precomputed optimum would stay valid.

use tracing::debug;

use crate::domain::{ChargeStop, RouteMatch};

use super::PlanError;
use super::config::PlannerConfig;

/// Select charging stops for a trip.
///
/// `range_km` is the estimated range at trip start; the selector only
/// relies on `reserve_fraction` (80%) of it. Returns an empty list when
/// no stop is needed and nothing is worth suggesting, and a *partial*
/// list (fewer stops than the trip physically needs) when the corridor
/// runs out of candidates; the caller decides how to present that.
pub fn select_stops(
    matches: &[RouteMatch],
    range_km: f64,
    total_distance_km: f64,
    config: &PlannerConfig,
) -> Result<Vec<ChargeStop>, PlanError> {
    if !(range_km > 0.0) {
        return Err(PlanError::InvalidRange(range_km));
    }
    if !(total_distance_km > 0.0) {
        return Err(PlanError::InvalidDistance(total_distance_km));
    }

    let usable_km = range_km * config.reserve_fraction;

    if total_distance_km <= usable_km {
        return Ok(suggest_optional_stops(matches, total_distance_km, config));
    }

    let mut stops: Vec<ChargeStop> = Vec::new();
    let mut current_km = 0.0;

    while current_km + usable_km < total_distance_km {
        let target_km = current_km + usable_km;

        // Window biased toward (but not past) the range target, with a
        // minimum-progress guard against degenerate back-to-back stops.
        let mut candidates: Vec<&RouteMatch> = matches
            .iter()
            .filter(|m| {
                m.route_km > current_km + config.min_progress_km
                    && m.route_km <= target_km + config.window_overshoot_km
            })
            .collect();

        if candidates.is_empty() {
            candidates = matches
                .iter()
                .filter(|m| m.route_km > current_km + config.widened_min_progress_km)
                .collect();
        }

        let Some(winner) = candidates.into_iter().min_by(|a, b| {
            score(a, current_km, usable_km, config)
                .total_cmp(&score(b, current_km, usable_km, config))
        }) else {
            // Out of candidates: return the partial plan rather than fail.
            debug!(
                current_km,
                total_distance_km,
                stops = stops.len(),
                "no candidate station beyond current position; plan is incomplete"
            );
            break;
        };

        current_km = winner.route_km;
        stops.push(ChargeStop::mandatory(winner.clone()));
    }

    Ok(stops)
}

/// Composite ranking score; lower is better.
fn score(m: &RouteMatch, current_km: f64, usable_km: f64, config: &PlannerConfig) -> f64 {
    let preferred_km = current_km + config.target_bias_fraction * usable_km;

    let mut score = 0.0;
    if !m.is_dc {
        score += config.non_dc_penalty;
    }
    if !m.station.availability().has_available() {
        score += config.unavailable_penalty;
    }
    score += config.detour_weight * m.distance_km;
    score += config.position_weight * (m.route_km - preferred_km).abs();
    score
}

/// When the trip fits in usable range: suggest up to `max_optional_stops`
/// DC, currently-available stations closest to the route midpoint.
fn suggest_optional_stops(
    matches: &[RouteMatch],
    total_distance_km: f64,
    config: &PlannerConfig,
) -> Vec<ChargeStop> {
    let midpoint_km = total_distance_km / 2.0;

    let mut candidates: Vec<&RouteMatch> = matches
        .iter()
        .filter(|m| m.is_dc && m.station.availability().has_available())
        .collect();

    candidates.sort_by(|a, b| {
        (a.route_km - midpoint_km)
            .abs()
            .total_cmp(&(b.route_km - midpoint_km).abs())
    });

    // Keep distinct route positions so the suggested sequence is strictly
    // increasing once re-sorted.
    let mut chosen: Vec<&RouteMatch> = Vec::new();
    for candidate in candidates {
        if chosen.len() >= config.max_optional_stops {
            break;
        }
        if chosen.iter().any(|c| c.route_km == candidate.route_km) {
            continue;
        }
        chosen.push(candidate);
    }

    chosen.sort_by(|a, b| a.route_km.total_cmp(&b.route_km));

    chosen
        .into_iter()
        .map(|m| ChargeStop::optional(m.clone()))
        .collect()
}
