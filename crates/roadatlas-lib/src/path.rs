//! Shortest-path search over the border graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::graph::{Graph, VertexId};

/// Result of a shortest-path query.
///
/// `steps` is the ordered country sequence from start to destination and
/// `distances` holds one edge weight per consecutive pair. Empty `steps`
/// means an endpoint was not in the graph; a single step with no distances
/// means the destination was unreachable (or equal to the start).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathResult {
    pub steps: Vec<String>,
    pub distances: Vec<u32>,
}

impl PathResult {
    /// Result signalling an endpoint outside the graph.
    pub fn empty() -> Self {
        Self::default()
    }

    fn start_only(graph: &Graph, start: VertexId) -> Self {
        Self {
            steps: vec![graph.name(start).to_string()],
            distances: Vec::new(),
        }
    }

    /// Whether the query referenced a country outside the graph.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Total route length in kilometres.
    pub fn total_km(&self) -> u64 {
        self.distances.iter().map(|&d| u64::from(d)).sum()
    }

    /// Whether the route actually ends at `goal`. Distinguishes a found
    /// route from the start-only "no path" result.
    pub fn reaches(&self, goal: &str) -> bool {
        self.steps.last().map(|s| s == goal).unwrap_or(false)
    }
}

/// Run Dijkstra's algorithm between two canonical country names.
///
/// All search state is local to the call; repeated or concurrent queries
/// cannot interfere with each other. If either endpoint is absent from the
/// graph, the empty result is returned immediately. An unreachable
/// destination yields a start-only result rather than an error.
pub fn shortest_path(graph: &Graph, start: &str, goal: &str) -> PathResult {
    let (Some(start_id), Some(goal_id)) = (graph.vertex(start), graph.vertex(goal)) else {
        return PathResult::empty();
    };

    if start_id == goal_id {
        return PathResult::start_only(graph, start_id);
    }

    let mut best: Vec<Option<u64>> = vec![None; graph.len()];
    let mut parents: Vec<Option<VertexId>> = vec![None; graph.len()];
    let mut queue = BinaryHeap::new();

    best[start_id] = Some(0);
    queue.push(QueueEntry {
        node: start_id,
        cost: 0,
    });

    while let Some(entry) = queue.pop() {
        match best[entry.node] {
            Some(cost) if cost < entry.cost => continue, // stale entry
            Some(_) => {}
            None => continue,
        }

        if entry.node == goal_id {
            break;
        }

        for edge in graph.neighbours(entry.node) {
            let next_cost = entry.cost + u64::from(edge.distance);
            if best[edge.target].map_or(true, |cost| next_cost < cost) {
                best[edge.target] = Some(next_cost);
                parents[edge.target] = Some(entry.node);
                queue.push(QueueEntry {
                    node: edge.target,
                    cost: next_cost,
                });
            }
        }
    }

    if parents[goal_id].is_none() {
        return PathResult::start_only(graph, start_id);
    }

    reconstruct(graph, &parents, start_id, goal_id)
}

/// Walk predecessors backward from the goal, reverse, and collect the stored
/// edge weight for each consecutive pair.
fn reconstruct(
    graph: &Graph,
    parents: &[Option<VertexId>],
    start: VertexId,
    goal: VertexId,
) -> PathResult {
    let mut order = vec![goal];
    let mut current = goal;
    while current != start {
        match parents[current] {
            Some(parent) => {
                order.push(parent);
                current = parent;
            }
            None => return PathResult::start_only(graph, start),
        }
    }
    order.reverse();

    let mut distances = Vec::with_capacity(order.len() - 1);
    for pair in order.windows(2) {
        let weight = graph
            .weight(pair[0], pair[1])
            .expect("consecutive path vertices share an edge");
        distances.push(weight);
    }

    PathResult {
        steps: order.iter().map(|&v| graph.name(v).to_string()).collect(),
        distances,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: VertexId,
    cost: u64,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::borders::BorderMap;
    use crate::distances::DistanceTable;
    use crate::graph::build_graph;
    use crate::identity::{AliasTable, Country, CountryRegistry};

    fn country(name: &str, code: &str) -> Country {
        Country {
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    /// Four-country fixture: A-B 100 km, B-C 150 km, A-C 500 km, D isolated.
    fn fixture_graph() -> Graph {
        let registry = CountryRegistry::from_parts(
            vec![
                country("Aland", "AAA"),
                country("Borduria", "BBB"),
                country("Cordovia", "CCC"),
                country("Dorne", "DDD"),
            ],
            AliasTable::default(),
        );

        let mut borders = BorderMap::new();
        borders.insert(
            "Aland".to_string(),
            BTreeSet::from(["Borduria".to_string(), "Cordovia".to_string()]),
        );
        borders.insert(
            "Borduria".to_string(),
            BTreeSet::from(["Aland".to_string(), "Cordovia".to_string()]),
        );
        borders.insert(
            "Cordovia".to_string(),
            BTreeSet::from(["Aland".to_string(), "Borduria".to_string()]),
        );
        borders.insert("Dorne".to_string(), BTreeSet::new());

        let mut distances = DistanceTable::default();
        distances.insert("AAA", "BBB", 100.0);
        distances.insert("BBB", "CCC", 150.0);
        distances.insert("AAA", "CCC", 500.0);

        build_graph(&borders, &distances, &registry)
    }

    #[test]
    fn multi_hop_route_beats_direct_edge() {
        let graph = fixture_graph();
        let result = shortest_path(&graph, "Aland", "Cordovia");
        assert_eq!(result.steps, vec!["Aland", "Borduria", "Cordovia"]);
        assert_eq!(result.distances, vec![100, 150]);
        assert_eq!(result.total_km(), 250);
    }

    #[test]
    fn same_country_returns_single_step_zero_total() {
        let graph = fixture_graph();
        let result = shortest_path(&graph, "Borduria", "Borduria");
        assert_eq!(result.steps, vec!["Borduria"]);
        assert!(result.distances.is_empty());
        assert_eq!(result.total_km(), 0);
        assert!(result.reaches("Borduria"));
    }

    #[test]
    fn unreachable_goal_returns_start_only() {
        let graph = fixture_graph();
        let result = shortest_path(&graph, "Aland", "Dorne");
        assert_eq!(result.steps, vec!["Aland"]);
        assert!(result.distances.is_empty());
        assert!(!result.reaches("Dorne"));
    }

    #[test]
    fn unknown_country_returns_empty_result() {
        let graph = fixture_graph();
        let result = shortest_path(&graph, "Aland", "Atlantis");
        assert!(result.is_empty());
        assert!(shortest_path(&graph, "Atlantis", "Aland").is_empty());
    }

    #[test]
    fn route_is_optimal_against_exhaustive_enumeration() {
        let graph = fixture_graph();
        let start = graph.vertex("Aland").expect("vertex");
        let goal = graph.vertex("Cordovia").expect("vertex");

        let mut best = u64::MAX;
        let mut stack = vec![(start, 0u64, vec![start])];
        while let Some((node, cost, path)) = stack.pop() {
            if node == goal {
                best = best.min(cost);
                continue;
            }
            for edge in graph.neighbours(node) {
                if path.contains(&edge.target) {
                    continue;
                }
                let mut next = path.clone();
                next.push(edge.target);
                stack.push((edge.target, cost + u64::from(edge.distance), next));
            }
        }

        let result = shortest_path(&graph, "Aland", "Cordovia");
        assert_eq!(result.total_km(), best);
    }

    #[test]
    fn hop_weights_match_graph_weights() {
        let graph = fixture_graph();
        let result = shortest_path(&graph, "Aland", "Cordovia");
        for (pair, &km) in result.steps.windows(2).zip(result.distances.iter()) {
            let a = graph.vertex(&pair[0]).expect("vertex");
            let b = graph.vertex(&pair[1]).expect("vertex");
            assert_eq!(graph.weight(a, b), Some(km));
        }
    }

    #[test]
    fn path_result_serializes() {
        let result = PathResult {
            steps: vec!["Aland".to_string(), "Borduria".to_string()],
            distances: vec![100],
        };
        let json = serde_json::to_value(&result).expect("serializes");
        assert_eq!(json["steps"][1], "Borduria");
        assert_eq!(json["distances"][0], 100);
    }
}
