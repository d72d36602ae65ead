//! Trip energy projection.
//!
//! Walks the selected stops in order, simulating state-of-charge
//! depletion and recharge, to report the battery percentage the driver
//! can expect at each stop and at the destination.

use crate::domain::ChargeStop;

use super::PlanError;
use super::config::PlannerConfig;

/// Result of projecting energy along a plan.
#[derive(Debug, Clone)]
pub struct EnergyProjection {
    /// The stops, now carrying `arrival_soc_percent`.
    pub stops: Vec<ChargeStop>,

    /// Projected battery percentage on arrival at the destination.
    pub destination_arrival_soc_percent: u8,
}

/// Project state of charge along the ordered stops and on to the
/// destination.
///
/// Mandatory stops are assumed to recharge to the configured target
/// (80% of capacity); optional stops are suggestions and assumed
/// unused. A projection that goes below empty reports 0% at the
/// affected points; that is the signal that the plan under-provisions
/// range, not an error.
pub fn project_energy(
    stops: Vec<ChargeStop>,
    start_soc_percent: f64,
    capacity_kwh: f64,
    consumption_per_100km: f64,
    total_distance_km: f64,
    config: &PlannerConfig,
) -> Result<EnergyProjection, PlanError> {
    if !(capacity_kwh > 0.0) {
        return Err(PlanError::InvalidBattery(capacity_kwh));
    }
    if !(start_soc_percent > 0.0 && start_soc_percent <= 100.0) {
        return Err(PlanError::InvalidSoc(start_soc_percent));
    }
    if !(consumption_per_100km > 0.0) {
        return Err(PlanError::InvalidConsumption(consumption_per_100km));
    }
    if !(total_distance_km > 0.0) {
        return Err(PlanError::InvalidDistance(total_distance_km));
    }

    let mut energy_kwh = capacity_kwh * (start_soc_percent / 100.0);
    let mut position_km = 0.0;

    let mut projected = stops;

    for stop in &mut projected {
        let leg_km = stop.route_km() - position_km;
        energy_kwh -= leg_km * consumption_per_100km / 100.0;
        stop.arrival_soc_percent = Some(soc_percent(energy_kwh, capacity_kwh));
        position_km = stop.route_km();

        // Optional stops are not assumed to be used.
        if !stop.is_optional {
            energy_kwh = capacity_kwh * config.recharge_target_fraction;
        }
    }

    let final_leg_km = total_distance_km - position_km;
    energy_kwh -= final_leg_km * consumption_per_100km / 100.0;

    Ok(EnergyProjection {
        stops: projected,
        destination_arrival_soc_percent: soc_percent(energy_kwh, capacity_kwh),
    })
}

/// Battery percentage for an energy level, clamped at empty.
fn soc_percent(energy_kwh: f64, capacity_kwh: f64) -> u8 {
    (energy_kwh / capacity_kwh * 100.0).max(0.0).round() as u8
}
