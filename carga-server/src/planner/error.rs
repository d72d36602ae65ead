//! Planner error type.

/// Error from route planning.
///
/// These are programmer/input errors, reported fast and descriptively.
/// Runtime conditions like an uncoverable route are NOT errors: the
/// selector returns the best partial plan instead (see
/// [`super::select_stops`]).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The route polyline has fewer than two vertices.
    #[error("route must have at least two vertices")]
    EmptyRoute,

    /// Corridor half-width must be positive.
    #[error("corridor width must be positive, got {0} km")]
    InvalidCorridor(f64),

    /// Range estimate must be positive.
    #[error("range must be positive, got {0} km")]
    InvalidRange(f64),

    /// Trip distance must be positive.
    #[error("trip distance must be positive, got {0} km")]
    InvalidDistance(f64),

    /// Battery capacity must be positive.
    #[error("battery capacity must be positive, got {0} kWh")]
    InvalidBattery(f64),

    /// State of charge must be within (0, 100].
    #[error("state of charge must be within (0, 100], got {0}%")]
    InvalidSoc(f64),

    /// Energy consumption must be positive.
    #[error("consumption must be positive, got {0} kWh/100km")]
    InvalidConsumption(f64),
}
