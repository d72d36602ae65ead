//! Planner configuration and terrain presets.

use std::str::FromStr;

/// Terrain profile of the trip, selecting an energy-consumption preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terrain {
    /// Mostly flat driving.
    Flat,
    /// Rolling terrain, the default for inter-city routes.
    #[default]
    Moderate,
    /// Sustained mountain climbs (e.g. crossing the Andes).
    Mountain,
}

impl Terrain {
    /// Energy consumption for this terrain, in kWh per 100 km.
    pub fn consumption_kwh_per_100km(&self) -> f64 {
        match self {
            Terrain::Flat => 15.0,
            Terrain::Moderate => 17.0,
            Terrain::Mountain => 21.0,
        }
    }
}

/// Error returned when parsing an unknown terrain key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown terrain: {0:?} (expected flat, moderate or mountain)")]
pub struct UnknownTerrain(pub String);

impl FromStr for Terrain {
    type Err = UnknownTerrain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "llano" => Ok(Terrain::Flat),
            "moderate" | "moderado" => Ok(Terrain::Moderate),
            "mountain" | "montana" | "cordillera" => Ok(Terrain::Mountain),
            _ => Err(UnknownTerrain(s.to_string())),
        }
    }
}

/// Tuning parameters for corridor matching and stop selection.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Fraction of the estimated range a plan may rely on. The rest is a
    /// reserve margin; a plan never aims to arrive at 0%.
    pub reserve_fraction: f64,

    /// State of charge the driver is assumed to reach at a mandatory
    /// stop, as a fraction of capacity.
    pub recharge_target_fraction: f64,

    /// Corridor half-width around the route, km.
    pub corridor_half_width_km: f64,

    /// Minimum progress a stop must make over the previous one, km.
    /// Guards against degenerate back-to-back stops.
    pub min_progress_km: f64,

    /// How far past the range target the candidate window extends, km.
    pub window_overshoot_km: f64,

    /// Minimum progress when the window is widened after finding no
    /// candidates, km.
    pub widened_min_progress_km: f64,

    /// Preferred stopping point as a fraction of usable range: the score
    /// biases toward stopping a bit before the range is exhausted.
    pub target_bias_fraction: f64,

    /// Maximum number of suggested stops when the trip fits in range.
    pub max_optional_stops: usize,

    /// Score penalty for stations without DC fast charging.
    pub non_dc_penalty: f64,

    /// Score penalty for stations with no currently-available unit.
    pub unavailable_penalty: f64,

    /// Score weight per km of detour off the route.
    pub detour_weight: f64,

    /// Score weight per km of deviation from the preferred stopping point.
    pub position_weight: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            reserve_fraction: 0.8,
            recharge_target_fraction: 0.8,
            corridor_half_width_km: 5.0,
            min_progress_km: 20.0,
            window_overshoot_km: 10.0,
            widened_min_progress_km: 10.0,
            target_bias_fraction: 0.7,
            max_optional_stops: 3,
            non_dc_penalty: 100.0,
            unavailable_penalty: 50.0,
            detour_weight: 5.0,
            position_weight: 0.5,
        }
    }
}
