use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::graph::{Graph, NodeId};

/// A node as it appears in a dataset document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// A relationship as it appears in a dataset document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub rel_type: String,
}

/// Serialized form of a whole graph:
///
/// ```json
/// { "nodes": [{ "id": 1, "properties": { "name": "Rose Tyler" } }],
///   "relationships": [{ "from": 1, "to": 2, "type": "APPEARED_IN" }] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the graph: every node first, then every relationship.
    ///
    /// A relationship naming an unknown node fails with `NodeNotFound`, a
    /// repeated node id with `InvalidArgument`.
    pub fn into_graph(self) -> Result<Graph> {
        let mut graph = Graph::with_capacity(self.nodes.len());

        for node in self.nodes {
            graph.add_node(node.id, node.properties)?;
        }

        let mut duplicates = 0usize;
        for rel in &self.relationships {
            if !graph.connect(rel.from, rel.to, &rel.rel_type)? {
                duplicates += 1;
            }
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            rel_types = graph.rel_types().len(),
            duplicates,
            "dataset loaded"
        );
        Ok(graph)
    }
}

/// Parse a JSON dataset and build its graph in one step.
pub fn load_json(json: &str) -> Result<Graph> {
    Dataset::from_json(json)?.into_graph()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    const SMALL: &str = r#"{
        "nodes": [
            {"id": 1, "properties": {"name": "Rose Tyler"}},
            {"id": 2, "properties": {"title": "Dalek"}},
            {"id": 3}
        ],
        "relationships": [
            {"from": 1, "to": 2, "type": "APPEARED_IN"},
            {"from": 1, "to": 2, "type": "APPEARED_IN"},
            {"from": 3, "to": 2, "type": "APPEARED_IN"}
        ]
    }"#;

    #[test]
    fn test_load_small() {
        let g = load_json(SMALL).unwrap();
        assert_eq!(g.node_count(), 3);
        // The repeated relationship is stored once
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.find_by_property("name", "Rose Tyler").unwrap(), 1);
        assert!(g.node(3).unwrap().properties.is_empty());
    }

    #[test]
    fn test_nodes_only() {
        let g = load_json(r#"{"nodes": [{"id": 7, "properties": {}}]}"#).unwrap();
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_dangling_relationship() {
        let json = r#"{"nodes": [{"id": 1}], "relationships": [{"from": 1, "to": 2, "type": "X"}]}"#;
        assert!(matches!(load_json(json), Err(GraphError::NodeNotFound(2))));
    }

    #[test]
    fn test_duplicate_node_id() {
        let json = r#"{"nodes": [{"id": 1}, {"id": 1}]}"#;
        assert!(matches!(load_json(json), Err(GraphError::InvalidArgument(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(load_json("{\"nodes\": ["), Err(GraphError::Dataset(_))));
        assert!(matches!(load_json("{}"), Err(GraphError::Dataset(_))));
    }

    #[test]
    fn test_round_trip_through_serde() {
        let ds = Dataset::from_json(SMALL).unwrap();
        let text = serde_json::to_string(&ds).unwrap();
        assert_eq!(Dataset::from_json(&text).unwrap(), ds);
    }
}
