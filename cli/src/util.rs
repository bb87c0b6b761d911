use clap::ValueEnum;
use pathgraph_core::{Graph, NodeId};

use crate::error::{CliError, Result};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Resolve a node selector: `key=value` goes through the property index,
/// anything else must be a numeric id present in the graph.
pub fn resolve_node(graph: &Graph, selector: &str) -> Result<NodeId> {
    if let Some((key, value)) = selector.split_once('=') {
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::Selector(selector.to_string()));
        }
        return Ok(graph.find_by_property(key, value.trim())?);
    }

    let id: NodeId = selector
        .trim()
        .parse()
        .map_err(|_| CliError::Selector(selector.to_string()))?;
    graph.require(id)?;
    Ok(id)
}
