use std::collections::BTreeMap;

use pathgraph_core::{Graph, NodeId};
use serde::Serialize;

use crate::error::Result;
use crate::load::LoadedGraph;
use crate::util::{resolve_node, Format};

#[derive(Serialize)]
struct Status<'a> {
    source: &'a str,
    node_count: usize,
    edge_count: usize,
    rel_types: &'a [String],
    memory_bytes: usize,
    load_time_ms: f64,
}

pub fn run_stats(loaded: &LoadedGraph, format: Format) -> Result<String> {
    let g = &loaded.graph;
    let status = Status {
        source: &loaded.source,
        node_count: g.node_count(),
        edge_count: g.edge_count(),
        rel_types: g.rel_types(),
        memory_bytes: g.memory_usage(),
        load_time_ms: loaded.load_time_ms,
    };

    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&status)?),
        Format::Text => Ok(format!(
            "source:             {}\n\
             nodes:              {}\n\
             relationships:      {}\n\
             relationship types: {}\n\
             memory:             ~{:.1}KB\n\
             load time:          {:.2}ms",
            status.source,
            status.node_count,
            status.edge_count,
            status.rel_types.join(", "),
            status.memory_bytes as f64 / 1024.0,
            status.load_time_ms
        )),
    }
}

#[derive(Serialize)]
struct NodeOutput<'a> {
    id: NodeId,
    properties: &'a BTreeMap<String, String>,
}

pub fn run_lookup(graph: &Graph, selector: &str, format: Format) -> Result<String> {
    let id = resolve_node(graph, selector)?;
    let node = graph.require(id)?;

    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&NodeOutput {
            id,
            properties: &node.properties,
        })?),
        Format::Text => {
            let mut out = vec![format!("node {}", id)];
            out.extend(node.properties.iter().map(|(k, v)| format!("  {} = {}", k, v)));
            Ok(out.join("\n"))
        }
    }
}
