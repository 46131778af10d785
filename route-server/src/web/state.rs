//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedGraphs;
use crate::network::NetworkRepository;
use crate::planner::{PlannerConfig, RoutePlanner};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<R> {
    /// Station and railway storage
    pub network: Arc<R>,

    /// Route planner configuration
    pub config: Arc<PlannerConfig>,

    /// Graphs built for recent data versions
    pub graphs: Arc<CachedGraphs>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            network: self.network.clone(),
            config: self.config.clone(),
            graphs: self.graphs.clone(),
        }
    }
}

impl<R: NetworkRepository> AppState<R> {
    /// Create a new app state.
    pub fn new(network: R, config: PlannerConfig, graphs: CachedGraphs) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
            graphs: Arc::new(graphs),
        }
    }

    /// A cached route planner borrowing this state.
    pub fn planner(&self) -> RoutePlanner<'_, R> {
        RoutePlanner::new(self.network.as_ref(), &self.config).with_cache(&self.graphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::domain::{Coordinate, Railway, RailwayId, Station, StationId};
    use crate::network::InMemoryNetwork;

    fn station(id: &str) -> Station {
        Station::new(StationId::parse(id).unwrap(), id, id, id, Coordinate::default())
    }

    #[tokio::test]
    async fn planner_shares_repository_and_cache() {
        let railway = Railway::new(RailwayId::parse("L").unwrap(), "线", "Line")
            .with_edge(station("A"), station("B"), 2.0);
        let network = InMemoryNetwork::from_railways([railway]).await;
        let state = AppState::new(
            network,
            PlannerConfig::default(),
            CachedGraphs::new(&CacheConfig::default()),
        );

        let a = StationId::parse("A").unwrap();
        let b = StationId::parse("B").unwrap();
        let route = state.planner().find_shortest_path(&a, &b).await.unwrap();
        assert_eq!(route.total_distance_km, 2.0);

        let version = state.network.data_version().await;
        let cached = state.clone().graphs.get(version).await;
        assert!(cached.is_some());
    }
}
