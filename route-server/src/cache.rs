//! Caching layer for built network graphs.
//!
//! Building the graph is cheap at the network sizes we handle, so caching
//! is optional. When enabled, graphs are keyed by the repository's data
//! version: any write produces a new version and therefore a fresh graph.
//! Cached graphs are immutable and shared between concurrent queries.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::planner::NetworkGraph;

/// Configuration for the graph cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached graphs.
    pub ttl: Duration,

    /// Maximum number of cached graphs (one per data version).
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 4,
        }
    }
}

/// Built graphs keyed by data version.
pub struct CachedGraphs {
    graphs: MokaCache<u64, Arc<NetworkGraph>>,
}

impl CachedGraphs {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let graphs = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { graphs }
    }

    /// Get the graph built for a data version.
    pub async fn get(&self, version: u64) -> Option<Arc<NetworkGraph>> {
        self.graphs.get(&version).await
    }

    /// Store the graph built for a data version.
    pub async fn insert(&self, version: u64, graph: Arc<NetworkGraph>) {
        self.graphs.insert(version, graph).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.graphs.entry_count()
    }

    /// Invalidate all cached graphs.
    pub fn invalidate_all(&self) {
        self.graphs.invalidate_all();
    }
}
