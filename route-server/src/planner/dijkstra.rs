//! Single-source shortest paths over the network graph.
//!
//! Classic Dijkstra with early termination once the destination is
//! settled. Among stations with equal tentative distance the one with the
//! lowest id is settled first, so results are reproducible. Among
//! equal-weight parallel arcs, the first one inserted into the graph wins,
//! since only strict improvements replace a predecessor.
//!
//! Edge weights must be non-negative. With negative weights the search
//! still terminates but the distances are meaningless.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::domain::StationId;

use super::graph::NetworkGraph;

/// How a station was reached on its best known path.
#[derive(Debug, Clone, PartialEq)]
pub struct Predecessor {
    /// Station the arc was taken from.
    pub from: StationId,
    /// Graph index of the railway the arc belongs to.
    pub railway: usize,
    /// Edge index within that railway.
    pub edge: usize,
}

/// Distances and predecessor links produced by a search.
#[derive(Debug, Clone, Default)]
pub struct ShortestPaths {
    distances: HashMap<StationId, f64>,
    predecessors: HashMap<StationId, Predecessor>,
    settled: usize,
}

impl ShortestPaths {
    /// Shortest known distance to a station, or `None` if it was never
    /// reached (infinite distance).
    pub fn distance(&self, station: &StationId) -> Option<f64> {
        self.distances.get(station).copied()
    }

    /// Predecessor link recorded for a station.
    pub fn predecessor(&self, station: &StationId) -> Option<&Predecessor> {
        self.predecessors.get(station)
    }

    /// Number of stations settled before the search stopped.
    pub fn settled_count(&self) -> usize {
        self.settled
    }
}

/// Heap entry ordered by distance, then by station id.
#[derive(Debug, PartialEq)]
struct Candidate {
    distance: f64,
    station: StationId,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.station.cmp(&other.station))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute shortest paths from `start`, stopping once `end` is settled or
/// no reachable station is left.
///
/// A `start` outside the graph only reaches itself.
pub fn shortest_paths(graph: &NetworkGraph, start: &StationId, end: &StationId) -> ShortestPaths {
    let mut paths = ShortestPaths::default();
    let mut settled: HashSet<StationId> = HashSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::new();

    paths.distances.insert(start.clone(), 0.0);
    heap.push(Reverse(Candidate {
        distance: 0.0,
        station: start.clone(),
    }));

    while let Some(Reverse(Candidate { distance, station })) = heap.pop() {
        if settled.contains(&station) {
            continue;
        }
        // Stale entry superseded by a shorter distance
        if paths
            .distances
            .get(&station)
            .is_some_and(|best| distance > *best)
        {
            continue;
        }

        if &station == end {
            break;
        }

        settled.insert(station.clone());
        paths.settled += 1;

        trace!(station = %station, distance, "settled station");

        for arc in graph.arcs(&station) {
            if settled.contains(&arc.to) {
                continue;
            }

            let candidate = distance + arc.weight;
            // An infinite total is the same as unreached
            if !candidate.is_finite() {
                continue;
            }
            let improves = paths
                .distances
                .get(&arc.to)
                .is_none_or(|current| candidate < *current);

            if improves {
                paths.distances.insert(arc.to.clone(), candidate);
                paths.predecessors.insert(
                    arc.to.clone(),
                    Predecessor {
                        from: station.clone(),
                        railway: arc.railway,
                        edge: arc.edge,
                    },
                );
                heap.push(Reverse(Candidate {
                    distance: candidate,
                    station: arc.to.clone(),
                }));
            }
        }
    }

    debug!(
        start = %start,
        end = %end,
        settled = paths.settled,
        reached = paths.distances.len(),
        "shortest path search complete"
    );

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Railway, RailwayId, Station};

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn station(s: &str) -> Station {
        Station::new(id(s), s, s, s, Coordinate::default())
    }

    fn line(name: &str, edges: &[(&str, &str, f64)]) -> Railway {
        let mut railway = Railway::new(RailwayId::parse(name).unwrap(), name, name);
        for (a, b, d) in edges {
            railway.add_edge(station(a), station(b), *d);
        }
        railway
    }

    fn graph(lines: Vec<Railway>) -> NetworkGraph {
        NetworkGraph::build(lines, true).unwrap()
    }

    #[test]
    fn simple_chain() {
        let g = graph(vec![line("L", &[("S1", "S2", 2.0), ("S2", "S3", 3.0)])]);
        let paths = shortest_paths(&g, &id("S1"), &id("S3"));

        assert_eq!(paths.distance(&id("S3")), Some(5.0));
        assert_eq!(paths.distance(&id("S2")), Some(2.0));
        assert_eq!(paths.predecessor(&id("S3")).unwrap().from, id("S2"));
        assert_eq!(paths.predecessor(&id("S2")).unwrap().from, id("S1"));
        assert!(paths.predecessor(&id("S1")).is_none());
    }

    #[test]
    fn prefers_shorter_detour() {
        // A-C direct is 10, A-B-C is 3
        let g = graph(vec![
            line("Direct", &[("A", "C", 10.0)]),
            line("Detour", &[("A", "B", 1.0), ("B", "C", 2.0)]),
        ]);
        let paths = shortest_paths(&g, &id("A"), &id("C"));

        assert_eq!(paths.distance(&id("C")), Some(3.0));
        let pred = paths.predecessor(&id("C")).unwrap();
        assert_eq!(pred.from, id("B"));
        assert_eq!(pred.railway, 1);
    }

    #[test]
    fn parallel_edges_pick_lighter_arc() {
        let g = graph(vec![
            line("R1", &[("S1", "S2", 10.0)]),
            line("R2", &[("S1", "S2", 4.0)]),
        ]);
        let paths = shortest_paths(&g, &id("S1"), &id("S2"));

        assert_eq!(paths.distance(&id("S2")), Some(4.0));
        assert_eq!(paths.predecessor(&id("S2")).unwrap().railway, 1);
    }

    #[test]
    fn equal_parallel_edges_keep_first_inserted() {
        let g = graph(vec![
            line("R1", &[("S1", "S2", 4.0)]),
            line("R2", &[("S1", "S2", 4.0)]),
        ]);
        let paths = shortest_paths(&g, &id("S1"), &id("S2"));
        assert_eq!(paths.predecessor(&id("S2")).unwrap().railway, 0);
    }

    #[test]
    fn ties_settle_lowest_id_first() {
        // Two equal-length routes A-B-D and A-C-D; B settles before C,
        // so D's predecessor is B.
        let g = graph(vec![
            line("L1", &[("A", "C", 1.0), ("C", "D", 1.0)]),
            line("L2", &[("A", "B", 1.0), ("B", "D", 1.0)]),
        ]);
        let paths = shortest_paths(&g, &id("A"), &id("D"));

        assert_eq!(paths.distance(&id("D")), Some(2.0));
        assert_eq!(paths.predecessor(&id("D")).unwrap().from, id("B"));
    }

    #[test]
    fn stops_once_destination_settled() {
        // Far branch beyond the destination is never settled
        let g = graph(vec![line(
            "L",
            &[("A", "B", 1.0), ("B", "C", 1.0), ("C", "D", 100.0)],
        )]);
        let paths = shortest_paths(&g, &id("A"), &id("B"));

        assert_eq!(paths.distance(&id("B")), Some(1.0));
        assert_eq!(paths.settled_count(), 1);
        assert!(paths.distance(&id("C")).is_none());
    }

    #[test]
    fn disconnected_destination_unreached() {
        let g = graph(vec![
            line("L1", &[("A", "B", 1.0)]),
            line("L2", &[("C", "D", 1.0)]),
        ]);
        let paths = shortest_paths(&g, &id("A"), &id("D"));

        assert!(paths.distance(&id("D")).is_none());
        assert_eq!(paths.settled_count(), 2);
    }

    #[test]
    fn overflowing_distance_unreached() {
        let g = graph(vec![line("L", &[("A", "B", f64::MAX), ("B", "C", f64::MAX)])]);
        let paths = shortest_paths(&g, &id("A"), &id("C"));

        assert_eq!(paths.distance(&id("B")), Some(f64::MAX));
        assert!(paths.distance(&id("C")).is_none());
        assert!(paths.predecessor(&id("C")).is_none());
    }

    #[test]
    fn start_equals_end() {
        let g = graph(vec![line("L", &[("A", "B", 1.0)])]);
        let paths = shortest_paths(&g, &id("A"), &id("A"));

        assert_eq!(paths.distance(&id("A")), Some(0.0));
        assert_eq!(paths.settled_count(), 0);
    }

    #[test]
    fn start_outside_graph() {
        let g = graph(vec![line("L", &[("A", "B", 1.0)])]);
        let paths = shortest_paths(&g, &id("Z"), &id("A"));

        assert_eq!(paths.distance(&id("Z")), Some(0.0));
        assert!(paths.distance(&id("A")).is_none());
    }

    #[test]
    fn zero_weight_edges() {
        let g = graph(vec![line("L", &[("A", "B", 0.0), ("B", "C", 0.0)])]);
        let paths = shortest_paths(&g, &id("A"), &id("C"));
        assert_eq!(paths.distance(&id("C")), Some(0.0));
        assert_eq!(paths.predecessor(&id("C")).unwrap().from, id("B"));
    }

    #[test]
    fn candidate_ordering() {
        let a = Candidate {
            distance: 1.0,
            station: id("B"),
        };
        let b = Candidate {
            distance: 1.0,
            station: id("A"),
        };
        let c = Candidate {
            distance: 0.5,
            station: id("Z"),
        };
        assert!(b < a);
        assert!(c < b);
    }
}
