//! Route planning engine.
//!
//! Answers: "I'm driving this route in this car, where should I stop to
//! charge?" The pipeline is corridor matching (which stations are on the
//! way), stop selection (which of them to stop at), and energy
//! projection (what the battery looks like at each stop and at the
//! destination).
//!
//! Every entry point is a pure function of its inputs: no caching, no
//! shared state, and repeated calls with equal inputs return equal plans.

mod config;
mod corridor;
mod energy;
mod error;
mod select;
mod trip;

pub use config::{PlannerConfig, Terrain, UnknownTerrain};
pub use corridor::match_along_route;
pub use energy::{EnergyProjection, project_energy};
pub use error::PlanError;
pub use select::select_stops;
pub use trip::{TripRequest, plan_trip};
