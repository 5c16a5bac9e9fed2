//! Roadatlas library entry points.
//!
//! This crate loads three independently-sourced country datasets (a land
//! border adjacency list, a capital-to-capital distance table, and a
//! historical state identity table), reconciles their inconsistent naming,
//! builds a single undirected weighted border graph, and answers
//! shortest-route queries over it. Higher-level consumers (the CLI) should
//! only depend on the types exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod atlas;
pub mod borders;
pub mod distances;
pub mod error;
pub mod graph;
pub mod identity;
pub mod path;

pub use atlas::Atlas;
pub use borders::{load_borders, BorderMap};
pub use distances::DistanceTable;
pub use error::{Error, Result};
pub use graph::{build_graph, Edge, Graph, VertexId};
pub use identity::{AliasTable, Country, CountryRegistry, DEFAULT_REFERENCE_DATE};
pub use path::{shortest_path, PathResult};
