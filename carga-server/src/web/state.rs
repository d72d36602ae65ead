//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::StationCache;
use crate::planner::PlannerConfig;
use crate::sources::StationSource;

/// Shared application state.
///
/// The source is boxed so tests can drop a mock behind the same state
/// type the real server uses.
#[derive(Clone)]
pub struct AppState {
    /// Cached, merged station source
    pub stations: Arc<StationCache<Box<dyn StationSource>>>,

    /// Planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(stations: StationCache<Box<dyn StationSource>>, config: PlannerConfig) -> Self {
        Self {
            stations: Arc::new(stations),
            config: Arc::new(config),
        }
    }
}
