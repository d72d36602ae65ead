//! Station data sources.
//!
//! Two public upstreams describe Chile's charging network: the Energía
//! Abierta listing (rich, paginated, EVSE hierarchy) and the SEC live
//! feed (flat socket rows, current statuses). Each gets one
//! normalization entry point behind the common [`StationSource`]
//! capability, and [`MergedSource`] joins them with proximity dedup.
//!
//! Everything network-flavored lives here; the planning core only ever
//! sees the consolidated `Vec<Station>`.

pub mod ea;
pub mod sec;

mod error;
mod merge;

pub use error::SourceError;
pub use merge::merge_stations;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::Station;

use ea::EaClient;
use sec::SecClient;

/// A provider of normalized stations.
///
/// This abstraction lets the cache and the web layer be tested with
/// mock data, and keeps per-source quirks out of everything downstream.
#[async_trait]
pub trait StationSource: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Fetch and normalize the full station set.
    ///
    /// Implementations must return a consolidated collection: all
    /// partial requests (pages) awaited and joined, never a fragment.
    async fn fetch_stations(&self) -> Result<Vec<Station>, SourceError>;
}

#[async_trait]
impl StationSource for ea::EaClient {
    fn name(&self) -> &'static str {
        "energia-abierta"
    }

    async fn fetch_stations(&self) -> Result<Vec<Station>, SourceError> {
        EaClient::fetch_stations(self).await
    }
}

#[async_trait]
impl StationSource for sec::SecClient {
    fn name(&self) -> &'static str {
        "sec-live"
    }

    async fn fetch_stations(&self) -> Result<Vec<Station>, SourceError> {
        SecClient::fetch_stations(self).await
    }
}

#[async_trait]
impl StationSource for Box<dyn StationSource> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_stations(&self) -> Result<Vec<Station>, SourceError> {
        (**self).fetch_stations().await
    }
}

/// Two sources joined by proximity dedup.
///
/// The primary source is authoritative: if it fails, the refresh fails.
/// A secondary failure only costs the live statuses, so it is logged
/// and tolerated.
pub struct MergedSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P: StationSource, S: StationSource> MergedSource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P: StationSource, S: StationSource> StationSource for MergedSource<P, S> {
    fn name(&self) -> &'static str {
        "merged"
    }

    async fn fetch_stations(&self) -> Result<Vec<Station>, SourceError> {
        let (primary, secondary) = futures::join!(
            self.primary.fetch_stations(),
            self.secondary.fetch_stations()
        );

        let primary = primary?;

        match secondary {
            Ok(secondary) => Ok(merge_stations(primary, secondary)),
            Err(e) => {
                warn!(
                    source = self.secondary.name(),
                    error = %e,
                    "secondary source failed; continuing without live statuses"
                );
                Ok(primary)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    /// Mock source for testing.
    struct MockSource {
        stations: Vec<Station>,
        fail: bool,
    }

    impl MockSource {
        fn new(stations: Vec<Station>) -> Self {
            Self {
                stations,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                stations: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl StationSource for MockSource {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn fetch_stations(&self) -> Result<Vec<Station>, SourceError> {
            if self.fail {
                return Err(SourceError::ApiError {
                    status: 503,
                    message: "down".to_string(),
                });
            }
            Ok(self.stations.clone())
        }
    }

    fn station(id: &str, lat: f64, lon: f64) -> Station {
        let mut s = Station::new(id, id);
        s.coordinate = Some(Coordinate::new(lat, lon));
        s
    }

    #[tokio::test]
    async fn merged_source_joins_both() {
        let primary = MockSource::new(vec![station("a", -33.40, -70.65)]);
        let secondary = MockSource::new(vec![station("b", -33.50, -70.65)]);

        let merged = MergedSource::new(primary, secondary);
        let stations = merged.fetch_stations().await.unwrap();

        assert_eq!(stations.len(), 2);
    }

    #[tokio::test]
    async fn primary_failure_fails_refresh() {
        let merged = MergedSource::new(
            MockSource::failing(),
            MockSource::new(vec![station("b", -33.50, -70.65)]),
        );

        assert!(merged.fetch_stations().await.is_err());
    }

    #[tokio::test]
    async fn secondary_failure_tolerated() {
        let merged = MergedSource::new(
            MockSource::new(vec![station("a", -33.40, -70.65)]),
            MockSource::failing(),
        );

        let stations = merged.fetch_stations().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "a");
    }
}
