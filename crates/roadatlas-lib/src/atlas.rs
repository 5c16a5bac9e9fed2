//! Query facade assembled from the ingestion and graph stages.

use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::borders;
use crate::distances::DistanceTable;
use crate::error::{Error, Result};
use crate::graph::{build_graph, Graph};
use crate::identity::{Country, CountryRegistry, DEFAULT_REFERENCE_DATE};
use crate::path::{self, PathResult};

/// Ready-to-query country atlas.
///
/// Built once by [`Atlas::load`]; every structure is immutable afterwards,
/// so shared references can serve concurrent read-only queries. Queries
/// never fail on data-quality grounds: unknown countries yield empty or
/// `None` results, and unresolvable edges were already omitted during
/// construction.
#[derive(Debug, Clone)]
pub struct Atlas {
    registry: CountryRegistry,
    distances: DistanceTable,
    graph: Graph,
}

impl Atlas {
    /// Load the three source datasets and build the border graph, using the
    /// default "still exists" reference date.
    ///
    /// I/O failure on any input is fatal and the returned error identifies
    /// which of the three inputs failed.
    pub fn load(borders_path: &Path, capdist_path: &Path, states_path: &Path) -> Result<Self> {
        Self::load_at(
            borders_path,
            capdist_path,
            states_path,
            *DEFAULT_REFERENCE_DATE,
        )
    }

    /// Load with an explicit reference date for the identity table.
    pub fn load_at(
        borders_path: &Path,
        capdist_path: &Path,
        states_path: &Path,
        reference_date: NaiveDate,
    ) -> Result<Self> {
        let borders = borders::load_borders(borders_path)?;
        let distances = DistanceTable::from_path(capdist_path)?;
        let registry = CountryRegistry::from_path_at(states_path, reference_date)?;
        let graph = build_graph(&borders, &distances, &registry);

        info!(
            countries = graph.len(),
            edges = graph.edge_count(),
            "atlas ready"
        );
        Ok(Self {
            registry,
            distances,
            graph,
        })
    }

    /// Direct capital-to-capital distance in rounded kilometres, independent
    /// of the border graph. `None` when either name is unknown or no record
    /// exists for the pair.
    pub fn distance(&self, country1: &str, country2: &str) -> Option<u32> {
        let a = self.registry.resolve(country1)?;
        let b = self.registry.resolve(country2)?;
        self.distances.rounded_km(&a.code, &b.code)
    }

    /// Whether the named country is a vertex in the border graph.
    pub fn contains(&self, country: &str) -> bool {
        self.registry
            .resolve(country)
            .map(|c| self.graph.contains(&c.name))
            .unwrap_or(false)
    }

    /// Shortest route between two countries by total capital distance.
    ///
    /// Unknown names yield the empty result; a known but unreachable
    /// destination yields a start-only result. Neither is an error.
    pub fn shortest_path(&self, country1: &str, country2: &str) -> PathResult {
        let Some(a) = self.registry.resolve(country1) else {
            return PathResult::empty();
        };
        let Some(b) = self.registry.resolve(country2) else {
            return PathResult::empty();
        };
        path::shortest_path(&self.graph, &a.name, &b.name)
    }

    /// Resolve a raw name to its canonical country, with fuzzy suggestions
    /// on failure for callers that present errors to users.
    pub fn resolve(&self, name: &str) -> Result<&Country> {
        self.registry.resolve(name).ok_or_else(|| Error::UnknownCountry {
            name: name.to_string(),
            suggestions: self.registry.fuzzy_matches(name, 3),
        })
    }

    /// The canonical country registry.
    pub fn registry(&self) -> &CountryRegistry {
        &self.registry
    }

    /// The constructed border graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}
