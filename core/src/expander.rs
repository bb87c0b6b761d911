use crate::error::{GraphError, Result};
use crate::graph::{Direction, Graph, NodeId, RelTypeId, TraversalDirection};

/// Edge filter shared by every path query: a set of relationship types and
/// the stored directions a step may follow.
///
/// Type names the graph has never seen are kept for reporting but match no
/// edges, so a query over them simply finds nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expander {
    rel_types: Vec<RelTypeId>,
    names: Vec<String>,
    direction: TraversalDirection,
}

impl Expander {
    /// Build an expander over `names` in `direction`. At least one type is required.
    pub fn for_types<S: AsRef<str>>(
        graph: &Graph,
        names: &[S],
        direction: TraversalDirection,
    ) -> Result<Self> {
        if names.is_empty() {
            return Err(GraphError::InvalidArgument(
                "at least one relationship type is required".to_string(),
            ));
        }

        let mut rel_types: Vec<RelTypeId> = names
            .iter()
            .filter_map(|n| graph.rel_type_id(n.as_ref()))
            .collect();
        rel_types.sort_unstable();
        rel_types.dedup();

        let mut names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
        names.sort();
        names.dedup();

        Ok(Self {
            rel_types,
            names,
            direction,
        })
    }

    pub fn for_type(graph: &Graph, name: &str, direction: TraversalDirection) -> Result<Self> {
        Self::for_types(graph, &[name], direction)
    }

    pub fn direction(&self) -> TraversalDirection {
        self.direction
    }

    /// Relationship type names this expander was built from.
    pub fn type_names(&self) -> &[String] {
        &self.names
    }

    /// Same types, walked from the other end.
    pub fn reversed(&self) -> Self {
        Self {
            rel_types: self.rel_types.clone(),
            names: self.names.clone(),
            direction: self.direction.reverse(),
        }
    }

    pub fn matches(&self, rel_type: RelTypeId) -> bool {
        self.rel_types.binary_search(&rel_type).is_ok()
    }

    /// Iterate `(neighbor, rel_type, direction)` for every edge at `node` the
    /// filter admits. Outgoing edges come before incoming ones, each in
    /// insertion order.
    ///
    /// Uses boolean flags to avoid Box/dyn dispatch over the direction.
    pub fn expand<'a>(
        &'a self,
        graph: &'a Graph,
        node: NodeId,
    ) -> impl Iterator<Item = (NodeId, RelTypeId, Direction)> + 'a {
        let (use_out, use_inc) = match self.direction {
            TraversalDirection::Outgoing => (true, false),
            TraversalDirection::Incoming => (false, true),
            TraversalDirection::Both => (true, true),
        };

        let out_iter = graph
            .neighbors_out(node)
            .iter()
            .filter(move |_| use_out)
            .map(|e| (e.target, e.rel_type, Direction::Outgoing));

        let in_iter = graph
            .neighbors_in(node)
            .iter()
            .filter(move |_| use_inc)
            .map(|e| (e.target, e.rel_type, Direction::Incoming));

        out_iter
            .chain(in_iter)
            .filter(move |&(_, rel_type, _)| self.matches(rel_type))
    }
}
