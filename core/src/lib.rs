//! pathgraph-core: In-memory labeled multigraph with path queries.
//!
//! Maintains bidirectional adjacency lists with interned relationship types
//! and an exact-match property index, and answers two kinds of query:
//! every simple path of an exact length between two nodes, and the shortest
//! path between them within a depth bound. Both are pure reads over a graph
//! that is built once and never mutated afterwards.
//!
//! Ships with a small Doctor Who universe dataset ([`universe::doctor_who`])
//! for exercising the queries.

mod dataset;
mod error;
mod expander;
mod graph;
mod path;
mod traversal;
pub mod universe;

pub use dataset::{load_json, Dataset, NodeRecord, RelationshipRecord};
pub use error::{GraphError, Result};
pub use expander::Expander;
pub use graph::{
    properties, Direction, Edge, Graph, Node, NodeId, RelTypeId, TraversalDirection,
    DISPLAY_KEYS,
};
pub use path::{Path, PathNodeRecord, PathRecord, PathRelationship, PathRelationshipRecord};
pub use traversal::{
    all_shortest_paths, paths_with_length, shortest_path, single_path_with_length,
    PathsWithLength,
};
