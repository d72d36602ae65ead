//! Domain types for the charging trip planner.
//!
//! The canonical station model plus the transient planning types. The
//! source normalizers produce these; the planner, filter layer and web
//! layer consume them.

mod connector;
mod route;
mod station;
mod status;

pub use connector::{Connector, ConnectorStandard, PowerType};
pub use route::{ChargeStop, RouteMatch, TripPlan};
pub use station::{Availability, Coordinate, Station};
pub use status::{ConnectorStatus, classify_status};
