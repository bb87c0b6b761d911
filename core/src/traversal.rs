use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::expander::Expander;
use crate::graph::{Direction, Graph, NodeId, RelTypeId};
use crate::path::Path;

/// Candidate step out of a node: `(neighbor, rel_type, direction)`.
type Step = (NodeId, RelTypeId, Direction);

/// Lazily enumerates every simple path of an exact length between two nodes.
///
/// Depth-first with an explicit stack, so each call to `next` resumes the
/// search where the previous path was found. `frontier[i]` holds the untried
/// steps out of `nodes[i]`, stored reversed so `pop` yields adjacency order.
///
/// Created by [`paths_with_length`].
pub struct PathsWithLength<'g> {
    graph: &'g Graph,
    expander: Expander,
    length: usize,
    /// Hops from each node to `end` along the expander, ignoring simplicity.
    /// Only nodes within `length` hops are present.
    distance_to_end: HashMap<NodeId, u32>,
    nodes: Vec<NodeId>,
    steps: Vec<(RelTypeId, Direction)>,
    on_path: HashSet<NodeId>,
    frontier: Vec<Vec<Step>>,
    paths_found: usize,
    finished: bool,
}

impl<'g> PathsWithLength<'g> {
    fn new(
        graph: &'g Graph,
        start: NodeId,
        end: NodeId,
        expander: &Expander,
        length: u32,
    ) -> Self {
        // A simple path visits each node at most once.
        let max_hops = graph.node_count().saturating_sub(1);
        let feasible = length as usize <= max_hops;
        let distance_to_end = if feasible {
            distances_to(graph, end, &expander.reversed(), length)
        } else {
            HashMap::new()
        };
        let capacity = (length as usize).min(max_hops);

        let mut search = Self {
            graph,
            expander: expander.clone(),
            length: length as usize,
            distance_to_end,
            nodes: vec![start],
            steps: Vec::with_capacity(capacity),
            on_path: HashSet::from([start]),
            frontier: Vec::with_capacity(capacity),
            paths_found: 0,
            finished: false,
        };

        // A simple path cannot return to its first node, so start == end
        // yields nothing for any positive length.
        if feasible && start != end && search.distance_to_end.contains_key(&start) {
            let first = search.candidates(start);
            search.frontier.push(first);
        }
        search
    }

    /// Steps out of `node` that keep the path simple and can still reach
    /// `end` in exactly the remaining budget.
    fn candidates(&self, node: NodeId) -> Vec<Step> {
        let next_depth = self.steps.len() + 1;
        let mut out: Vec<Step> = self
            .expander
            .expand(self.graph, node)
            .filter(|(next, _, _)| !self.on_path.contains(next))
            .filter(|(next, _, _)| match self.distance_to_end.get(next) {
                // `end` itself is only acceptable as the final node
                Some(0) => next_depth == self.length,
                Some(&d) => next_depth + d as usize <= self.length,
                None => false,
            })
            .collect();
        out.reverse();
        out
    }

    fn exhausted(&mut self) -> Option<Path> {
        if !self.finished {
            self.finished = true;
            debug!(
                start = self.nodes[0],
                length = self.length,
                paths = self.paths_found,
                "exact-length path search exhausted"
            );
        }
        None
    }
}

impl Iterator for PathsWithLength<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            let Some(top) = self.frontier.last_mut() else {
                return self.exhausted();
            };

            let Some((next, rel_type, direction)) = top.pop() else {
                // Backtrack: every step out of nodes[frontier.len() - 1] is tried
                self.frontier.pop();
                if !self.steps.is_empty() {
                    if let Some(node) = self.nodes.pop() {
                        self.on_path.remove(&node);
                    }
                    self.steps.pop();
                }
                continue;
            };

            self.nodes.push(next);
            self.steps.push((rel_type, direction));

            if self.steps.len() == self.length {
                // Candidate filtering guarantees `next` is the end node here
                let path = Path::from_steps(self.nodes.clone(), &self.steps);
                self.nodes.pop();
                self.steps.pop();
                self.paths_found += 1;
                return Some(path);
            }

            self.on_path.insert(next);
            let deeper = self.candidates(next);
            self.frontier.push(deeper);
        }
    }
}

/// BFS hop counts from `origin` along `expander`, bounded by `max_depth`.
///
/// Uses visited-set pruning: each node is recorded once, at its minimum
/// distance.
fn distances_to(
    graph: &Graph,
    origin: NodeId,
    expander: &Expander,
    max_depth: u32,
) -> HashMap<NodeId, u32> {
    let mut distance: HashMap<NodeId, u32> = HashMap::new();
    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();

    distance.insert(origin, 0);
    queue.push_back((origin, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for (next, _, _) in expander.expand(graph, current) {
            if !distance.contains_key(&next) {
                distance.insert(next, depth + 1);
                queue.push_back((next, depth + 1));
            }
        }
    }

    distance
}

fn check_endpoints(graph: &Graph, start: NodeId, end: NodeId) -> Result<()> {
    match [start, end].into_iter().find(|&id| !graph.contains(id)) {
        Some(missing) => Err(GraphError::NodeNotFound(missing)),
        None => Ok(()),
    }
}

/// All simple paths from `start` to `end` with exactly `length` relationships
/// admitted by `expander`.
///
/// The result is lazy and finite. Order follows adjacency insertion order
/// but callers should treat it as a set. Fails with
/// [`GraphError::InvalidArgument`] for `length == 0` and
/// [`GraphError::NodeNotFound`] for an unknown endpoint.
pub fn paths_with_length<'g>(
    graph: &'g Graph,
    start: NodeId,
    end: NodeId,
    expander: &Expander,
    length: u32,
) -> Result<PathsWithLength<'g>> {
    if length == 0 {
        return Err(GraphError::InvalidArgument(
            "path length must be positive".to_string(),
        ));
    }
    check_endpoints(graph, start, end)?;

    debug!(
        start,
        end,
        length,
        types = ?expander.type_names(),
        direction = %expander.direction(),
        "exact-length path search"
    );

    Ok(PathsWithLength::new(graph, start, end, expander, length))
}

/// First path [`paths_with_length`] produces, if any.
pub fn single_path_with_length(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    expander: &Expander,
    length: u32,
) -> Result<Option<Path>> {
    Ok(paths_with_length(graph, start, end, expander, length)?.next())
}

/// Shortest path from `start` to `end` using BFS (unweighted).
///
/// BFS settles nodes in order of hop count, so the first time `end` is
/// discovered its parent chain is a minimum-length path. Among several
/// shortest paths the one returned depends on adjacency order.
///
/// Returns `None` if no path exists within `max_depth` hops. `start == end`
/// yields the zero-length path.
pub fn shortest_path(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    expander: &Expander,
    max_depth: u32,
) -> Result<Option<Path>> {
    if max_depth == 0 {
        return Err(GraphError::InvalidArgument(
            "max depth must be positive".to_string(),
        ));
    }
    check_endpoints(graph, start, end)?;

    if start == end {
        return Ok(Some(Path::single(start)));
    }

    // BFS with parent tracking: node → (parent, rel_type, direction)
    let mut visited: HashMap<NodeId, (NodeId, RelTypeId, Direction)> = HashMap::new();
    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();

    // Sentinel: start node's parent is itself
    visited.insert(start, (start, 0, Direction::Outgoing));
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for (next, rel_type, direction) in expander.expand(graph, current) {
            if visited.contains_key(&next) {
                continue;
            }
            visited.insert(next, (current, rel_type, direction));

            if next == end {
                let path = reconstruct_path(&visited, start, end);
                debug!(start, end, hops = path.len(), visited = visited.len(), "shortest path found");
                return Ok(Some(path));
            }

            queue.push_back((next, depth + 1));
        }
    }

    debug!(start, end, max_depth, visited = visited.len(), "no path within depth bound");
    Ok(None)
}

/// Walk parent pointers from `end` back to `start`.
fn reconstruct_path(
    visited: &HashMap<NodeId, (NodeId, RelTypeId, Direction)>,
    start: NodeId,
    end: NodeId,
) -> Path {
    let mut nodes = vec![end];
    let mut steps = Vec::new();
    let mut current = end;

    while current != start {
        let &(parent, rel_type, direction) = &visited[&current];
        steps.push((rel_type, direction));
        nodes.push(parent);
        current = parent;
    }

    nodes.reverse();
    steps.reverse();
    Path::from_steps(nodes, &steps)
}

/// Every path of minimal length from `start` to `end`, within `max_depth`.
///
/// Layered BFS that keeps all parents one layer closer to `start`, then
/// enumerates the parent chains. Parallel edges of different types give
/// distinct paths. Empty when `end` is unreachable within the bound.
pub fn all_shortest_paths(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    expander: &Expander,
    max_depth: u32,
) -> Result<Vec<Path>> {
    if max_depth == 0 {
        return Err(GraphError::InvalidArgument(
            "max depth must be positive".to_string(),
        ));
    }
    check_endpoints(graph, start, end)?;

    if start == end {
        return Ok(vec![Path::single(start)]);
    }

    let mut depth_of: HashMap<NodeId, u32> = HashMap::from([(start, 0)]);
    let mut parents: HashMap<NodeId, Vec<Step>> = HashMap::new();
    let mut layer = vec![start];
    let mut depth = 0;

    while !layer.is_empty() && depth < max_depth && !depth_of.contains_key(&end) {
        let mut next_layer = Vec::new();
        for &current in &layer {
            for (next, rel_type, direction) in expander.expand(graph, current) {
                let known = depth_of.get(&next).copied();
                match known {
                    None => {
                        depth_of.insert(next, depth + 1);
                        next_layer.push(next);
                    }
                    Some(d) if d == depth + 1 => {}
                    Some(_) => continue,
                }
                parents
                    .entry(next)
                    .or_default()
                    .push((current, rel_type, direction));
            }
        }
        layer = next_layer;
        depth += 1;
    }

    if !depth_of.contains_key(&end) {
        debug!(start, end, max_depth, "no path within depth bound");
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    let mut nodes = vec![end];
    let mut steps = Vec::new();
    collect_parent_chains(&parents, start, &mut nodes, &mut steps, &mut paths);

    debug!(start, end, hops = depth, paths = paths.len(), "all shortest paths found");
    Ok(paths)
}

/// Depth-first walk over the parent DAG; `nodes` and `steps` hold the
/// partial path from `end` backwards.
fn collect_parent_chains(
    parents: &HashMap<NodeId, Vec<Step>>,
    start: NodeId,
    nodes: &mut Vec<NodeId>,
    steps: &mut Vec<(RelTypeId, Direction)>,
    out: &mut Vec<Path>,
) {
    let current = nodes[nodes.len() - 1];
    if current == start {
        let mut forward_nodes = nodes.clone();
        let mut forward_steps = steps.clone();
        forward_nodes.reverse();
        forward_steps.reverse();
        out.push(Path::from_steps(forward_nodes, &forward_steps));
        return;
    }

    for &(parent, rel_type, direction) in parents.get(&current).map(|v| v.as_slice()).unwrap_or(&[]) {
        nodes.push(parent);
        steps.push((rel_type, direction));
        collect_parent_chains(parents, start, nodes, steps, out);
        nodes.pop();
        steps.pop();
    }
}
