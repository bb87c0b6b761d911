use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{GraphError, Result};

/// Opaque node identifier, assigned by whoever loads the graph.
pub type NodeId = u64;

/// Interned relationship type index (avoids storing duplicate strings per edge).
pub type RelTypeId = u16;

/// Property keys tried, in order, when rendering a node for humans.
pub const DISPLAY_KEYS: [&str; 4] = ["name", "title", "actor", "species"];

/// Stored direction of an edge relative to the node it was reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Followed from source to target.
    Outgoing,
    /// Followed from target back to source.
    Incoming,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Outgoing => "outgoing",
            Direction::Incoming => "incoming",
        }
    }
}

/// Which stored edge directions a traversal may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    Outgoing,
    Incoming,
    Both,
}

impl TraversalDirection {
    /// The filter a walk from the other end would need to see the same edges.
    pub fn reverse(self) -> Self {
        match self {
            TraversalDirection::Outgoing => TraversalDirection::Incoming,
            TraversalDirection::Incoming => TraversalDirection::Outgoing,
            TraversalDirection::Both => TraversalDirection::Both,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TraversalDirection::Outgoing => "outgoing",
            TraversalDirection::Incoming => "incoming",
            TraversalDirection::Both => "both",
        }
    }
}

impl fmt::Display for TraversalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts "outgoing", "incoming", "both" (case-insensitive) plus the short
/// forms "out" and "in".
impl FromStr for TraversalDirection {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "outgoing" | "out" => Ok(TraversalDirection::Outgoing),
            "incoming" | "in" => Ok(TraversalDirection::Incoming),
            "both" => Ok(TraversalDirection::Both),
            other => Err(GraphError::InvalidArgument(format!(
                "unknown direction '{}', use 'outgoing', 'incoming' or 'both'",
                other
            ))),
        }
    }
}

/// A node and its string properties. Immutable once added to a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub properties: BTreeMap<String, String>,
}

impl Node {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(|s| s.as_str())
    }
}

/// One entry of an adjacency list. `target` is the node at the other end,
/// so for `incoming` lists it is the edge's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: NodeId,
    pub rel_type: RelTypeId,
}

/// In-memory multigraph: adjacency lists, node properties, a property index
/// and relationship type interning.
///
/// Edges are stored bidirectionally: `outgoing[a]` contains edges from a,
/// `incoming[b]` contains edges into b. Both are populated by [`Graph::add_edge`].
/// The graph is append-only: nothing is ever removed or modified.
pub struct Graph {
    outgoing: HashMap<NodeId, Vec<Edge>>,
    incoming: HashMap<NodeId, Vec<Edge>>,
    nodes: HashMap<NodeId, Node>,
    /// property key → property value → nodes carrying it, in insertion order
    property_index: HashMap<String, HashMap<String, Vec<NodeId>>>,
    rel_types: Vec<String>,
    rel_type_map: HashMap<String, RelTypeId>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            nodes: HashMap::new(),
            property_index: HashMap::new(),
            rel_types: Vec::new(),
            rel_type_map: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            outgoing: HashMap::with_capacity(node_count),
            incoming: HashMap::with_capacity(node_count),
            nodes: HashMap::with_capacity(node_count),
            property_index: HashMap::new(),
            rel_types: Vec::new(),
            rel_type_map: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Intern a relationship type string, returning its compact ID.
    pub fn intern_rel_type(&mut self, rel_type: &str) -> Result<RelTypeId> {
        if let Some(&id) = self.rel_type_map.get(rel_type) {
            return Ok(id);
        }
        let id = RelTypeId::try_from(self.rel_types.len()).map_err(|_| {
            GraphError::InvalidArgument(format!(
                "too many relationship types (max {})",
                RelTypeId::MAX
            ))
        })?;
        self.rel_types.push(rel_type.to_string());
        self.rel_type_map.insert(rel_type.to_string(), id);
        Ok(id)
    }

    /// Look up an already interned relationship type.
    pub fn rel_type_id(&self, rel_type: &str) -> Option<RelTypeId> {
        self.rel_type_map.get(rel_type).copied()
    }

    /// Resolve a RelTypeId back to its string name.
    pub fn rel_type_name(&self, id: RelTypeId) -> Option<&str> {
        self.rel_types.get(id as usize).map(|s| s.as_str())
    }

    /// All interned relationship type names, in interning order.
    pub fn rel_types(&self) -> &[String] {
        &self.rel_types
    }

    /// Register a node. Ids are unique; re-adding an id is rejected.
    pub fn add_node(&mut self, id: NodeId, properties: BTreeMap<String, String>) -> Result<()> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::InvalidArgument(format!(
                "node {} already exists",
                id
            )));
        }
        for (key, value) in &properties {
            self.property_index
                .entry(key.clone())
                .or_default()
                .entry(value.clone())
                .or_default()
                .push(id);
        }
        self.nodes.insert(id, Node { id, properties });
        Ok(())
    }

    /// Add a directed, typed edge. Also inserts into the incoming adjacency list.
    ///
    /// Both endpoints must already be registered. Returns `false` when the
    /// same (from, to, type) edge is already present; it is not stored twice.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, rel_type: RelTypeId) -> Result<bool> {
        for id in [from, to] {
            if !self.nodes.contains_key(&id) {
                return Err(GraphError::NodeNotFound(id));
            }
        }
        if self.rel_type_name(rel_type).is_none() {
            return Err(GraphError::InvalidArgument(format!(
                "relationship type id {} was never interned",
                rel_type
            )));
        }

        let edge = Edge { target: to, rel_type };
        let out = self.outgoing.entry(from).or_default();
        if out.contains(&edge) {
            return Ok(false);
        }
        out.push(edge);
        self.incoming
            .entry(to)
            .or_default()
            .push(Edge { target: from, rel_type });
        self.edge_count += 1;
        Ok(true)
    }

    /// Intern `rel_type` and add the edge in one step.
    pub fn connect(&mut self, from: NodeId, to: NodeId, rel_type: &str) -> Result<bool> {
        let rt = self.intern_rel_type(rel_type)?;
        self.add_edge(from, to, rt)
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Whether `id` is a registered node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Fail with [`GraphError::NodeNotFound`] unless `id` is registered.
    pub fn require(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    /// All nodes whose `key` property equals `value`, in insertion order.
    pub fn nodes_with_property(&self, key: &str, value: &str) -> &[NodeId] {
        self.property_index
            .get(key)
            .and_then(|values| values.get(value))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve the single node whose `key` property equals `value`.
    ///
    /// Zero matches is [`GraphError::NoMatch`], more than one is
    /// [`GraphError::AmbiguousMatch`].
    pub fn find_by_property(&self, key: &str, value: &str) -> Result<NodeId> {
        match self.nodes_with_property(key, value) {
            [id] => Ok(*id),
            [] => Err(GraphError::NoMatch {
                key: key.to_string(),
                value: value.to_string(),
            }),
            many => Err(GraphError::AmbiguousMatch {
                key: key.to_string(),
                value: value.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Human-readable name: the first of [`DISPLAY_KEYS`] the node carries,
    /// otherwise `#<id>`.
    pub fn display_name(&self, id: NodeId) -> String {
        self.node(id)
            .and_then(|n| DISPLAY_KEYS.iter().find_map(|k| n.property(k)))
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("#{}", id))
    }

    /// Get outgoing edges for a node.
    pub fn neighbors_out(&self, id: NodeId) -> &[Edge] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get incoming edges for a node.
    pub fn neighbors_in(&self, id: NodeId) -> &[Edge] {
        self.incoming.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let props: usize = self
            .nodes
            .values()
            .flat_map(|n| n.properties.iter())
            .map(|(k, v)| k.len() + v.len() + 48)
            .sum();
        let nodes_mem = self.nodes.len() * (size_of::<NodeId>() + size_of::<Node>()) + props;
        let out_edges: usize = self.outgoing.values().map(|v| v.len() * size_of::<Edge>()).sum();
        let in_edges: usize = self.incoming.values().map(|v| v.len() * size_of::<Edge>()).sum();
        let index_mem: usize = self
            .property_index
            .values()
            .flat_map(|values| values.values())
            .map(|ids| ids.len() * size_of::<NodeId>() + 64)
            .sum();

        nodes_mem + out_edges + in_edges + index_mem
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a property map from `(key, value)` pairs.
pub fn properties<K, V, I>(pairs: I) -> BTreeMap<String, String>
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
