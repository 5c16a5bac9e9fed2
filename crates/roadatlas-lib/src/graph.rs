//! Weighted border graph construction.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::borders::BorderMap;
use crate::distances::DistanceTable;
use crate::identity::CountryRegistry;

/// Index of a vertex within the border graph.
pub type VertexId = usize;

/// Edge within the border graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Edge {
    pub target: VertexId,
    /// Capital-to-capital distance in kilometres, rounded.
    pub distance: u32,
}

/// Undirected weighted graph over canonical countries.
///
/// Symmetric by construction: inserting an edge adds it to both adjacency
/// lists with the same weight. The graph may be disconnected; a bordering
/// pair without a resolvable distance record is simply not linked, and
/// isolated vertices are valid.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    names: Vec<String>,
    index: HashMap<String, VertexId>,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Vertex id for a canonical country name.
    pub fn vertex(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    /// Canonical name of a vertex.
    pub fn name(&self, vertex: VertexId) -> &str {
        &self.names[vertex]
    }

    /// Whether a canonical country name is a vertex.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Neighbours of a vertex.
    pub fn neighbours(&self, vertex: VertexId) -> &[Edge] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stored weight of the edge between two vertices, if present.
    pub fn weight(&self, a: VertexId, b: VertexId) -> Option<u32> {
        self.neighbours(a)
            .iter()
            .find(|edge| edge.target == b)
            .map(|edge| edge.distance)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate vertex names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    fn add_vertex(&mut self, name: &str) -> VertexId {
        if let Some(&vertex) = self.index.get(name) {
            return vertex;
        }
        let vertex = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), vertex);
        self.adjacency.push(Vec::new());
        vertex
    }

    fn add_edge(&mut self, a: VertexId, b: VertexId, distance: u32) {
        self.adjacency[a].push(Edge {
            target: b,
            distance,
        });
        self.adjacency[b].push(Edge {
            target: a,
            distance,
        });
    }

    fn finish(&mut self) {
        for neighbours in &mut self.adjacency {
            neighbours.sort_unstable();
            neighbours.dedup();
        }
    }
}

/// Build the border graph from the three ingestion outputs.
///
/// Vertices are border-file countries resolvable against the canonical set;
/// two raw spellings resolving to the same canonical country merge into one
/// vertex. An edge is added only when both endpoints resolve and the
/// distance table holds a record for their codes; everything else is
/// omitted rather than given a fabricated weight.
pub fn build_graph(
    borders: &BorderMap,
    distances: &DistanceTable,
    registry: &CountryRegistry,
) -> Graph {
    let mut graph = Graph::default();

    let mut unresolved_countries = 0usize;
    for raw in borders.keys() {
        match registry.resolve(raw) {
            Some(country) => {
                graph.add_vertex(&country.name);
            }
            None => unresolved_countries += 1,
        }
    }

    let mut unresolved_neighbours = 0usize;
    let mut missing_distances = 0usize;
    for (raw_country, neighbours) in borders {
        let Some(country) = registry.resolve(raw_country) else {
            continue;
        };
        let Some(a) = graph.vertex(&country.name) else {
            continue;
        };
        for raw_neighbour in neighbours {
            let Some(neighbour) = registry.resolve(raw_neighbour) else {
                unresolved_neighbours += 1;
                continue;
            };
            // Edges only between countries that are themselves vertices.
            let Some(b) = graph.vertex(&neighbour.name) else {
                continue;
            };
            if a == b {
                continue;
            }
            match distances.rounded_km(&country.code, &neighbour.code) {
                Some(km) => graph.add_edge(a, b, km),
                None => missing_distances += 1,
            }
        }
    }
    graph.finish();

    if unresolved_countries + unresolved_neighbours > 0 {
        warn!(
            unresolved_countries,
            unresolved_neighbours, "border names without a canonical identity were dropped",
        );
    }
    debug!(
        vertices = graph.len(),
        edges = graph.edge_count(),
        missing_distances,
        "border graph built"
    );
    graph
}
