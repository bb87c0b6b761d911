use std::path::Path;
use std::time::Instant;

use pathgraph_core::{load_json, universe, Graph};
use tracing::info;

use crate::error::{CliError, Result};

/// The graph a command runs against, plus where it came from.
pub struct LoadedGraph {
    pub graph: Graph,
    pub source: String,
    pub load_time_ms: f64,
}

/// Load `dataset` if given, otherwise the bundled Doctor Who universe.
pub fn load_graph(dataset: Option<&Path>) -> Result<LoadedGraph> {
    let start = Instant::now();

    let (graph, source) = match dataset {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            (load_json(&json)?, path.display().to_string())
        }
        None => (universe::doctor_who()?, "bundled:doctor-who".to_string()),
    };

    let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        source = %source,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        load_time_ms,
        "graph ready"
    );

    Ok(LoadedGraph {
        graph,
        source,
        load_time_ms,
    })
}
