use std::collections::HashSet;

use serde::Serialize;

use crate::graph::{Direction, Graph, NodeId, RelTypeId};

/// One traversed edge of a [`Path`]. `from` and `to` follow path order;
/// `direction` says whether the stored edge points the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathRelationship {
    pub from: NodeId,
    pub to: NodeId,
    pub rel_type: RelTypeId,
    pub direction: Direction,
}

/// Alternating node / relationship sequence, starting and ending with a node.
///
/// `nodes.len() == relationships.len() + 1` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    nodes: Vec<NodeId>,
    relationships: Vec<PathRelationship>,
}

impl Path {
    /// Zero-length path consisting of `node` alone.
    pub fn single(node: NodeId) -> Self {
        Self {
            nodes: vec![node],
            relationships: Vec::new(),
        }
    }

    /// Build from a node sequence and the edge taken at each step.
    ///
    /// `steps[i]` is `(rel_type, direction)` of the edge between `nodes[i]`
    /// and `nodes[i + 1]`.
    pub(crate) fn from_steps(nodes: Vec<NodeId>, steps: &[(RelTypeId, Direction)]) -> Self {
        debug_assert_eq!(nodes.len(), steps.len() + 1);
        let relationships = nodes
            .windows(2)
            .zip(steps)
            .map(|(pair, &(rel_type, direction))| PathRelationship {
                from: pair[0],
                to: pair[1],
                rel_type,
                direction,
            })
            .collect();
        Self {
            nodes,
            relationships,
        }
    }

    /// Number of relationships traversed.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn relationships(&self) -> &[PathRelationship] {
        &self.relationships
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// True when no node appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|n| seen.insert(*n))
    }

    /// Cypher-like rendering, e.g. `(Rose Tyler)-[:APPEARED_IN]->(Dalek)`.
    pub fn render(&self, graph: &Graph) -> String {
        let mut out = format!("({})", graph.display_name(self.start()));
        for rel in &self.relationships {
            let name = graph.rel_type_name(rel.rel_type).unwrap_or("UNKNOWN");
            let to = graph.display_name(rel.to);
            match rel.direction {
                Direction::Outgoing => out.push_str(&format!("-[:{}]->({})", name, to)),
                Direction::Incoming => out.push_str(&format!("<-[:{}]-({})", name, to)),
            }
        }
        out
    }

    /// Resolve ids and type names into a serializable record.
    pub fn to_record(&self, graph: &Graph) -> PathRecord {
        PathRecord {
            length: self.len(),
            nodes: self
                .nodes
                .iter()
                .map(|&id| PathNodeRecord {
                    id,
                    name: graph.display_name(id),
                })
                .collect(),
            relationships: self
                .relationships
                .iter()
                .map(|r| PathRelationshipRecord {
                    from: r.from,
                    to: r.to,
                    rel_type: graph.rel_type_name(r.rel_type).unwrap_or("UNKNOWN").to_string(),
                    direction: r.direction,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PathNodeRecord {
    pub id: NodeId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathRelationshipRecord {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub direction: Direction,
}

/// A [`Path`] with names resolved against its graph.
#[derive(Debug, Clone, Serialize)]
pub struct PathRecord {
    pub length: usize,
    pub nodes: Vec<PathNodeRecord>,
    pub relationships: Vec<PathRelationshipRecord>,
}
