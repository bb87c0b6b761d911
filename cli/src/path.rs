use clap::Args;
use pathgraph_core::{
    all_shortest_paths, paths_with_length, shortest_path, Expander, Graph, Path, PathRecord,
    TraversalDirection,
};
use serde::Serialize;

use crate::error::Result;
use crate::util::{resolve_node, Format};

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Start node: key=value or numeric id
    pub from: String,
    /// End node: key=value or numeric id
    pub to: String,
    /// Relationship type to follow (repeatable)
    #[arg(short = 't', long = "type", required = true)]
    pub types: Vec<String>,
    /// outgoing, incoming or both
    #[arg(short, long, default_value = "both")]
    pub direction: TraversalDirection,
    /// Exact number of relationships per path
    #[arg(short, long, default_value_t = 2, env = "PATHGRAPH_LENGTH")]
    pub length: u32,
    /// Stop after this many paths
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ShortestArgs {
    /// Start node: key=value or numeric id
    pub from: String,
    /// End node: key=value or numeric id
    pub to: String,
    /// Relationship type to follow
    #[arg(short = 't', long = "type")]
    pub rel_type: String,
    /// outgoing, incoming or both
    #[arg(short, long, default_value = "outgoing")]
    pub direction: TraversalDirection,
    /// Longest path considered, in relationships
    #[arg(short, long, default_value_t = 100, env = "PATHGRAPH_MAX_DEPTH")]
    pub max_depth: u32,
    /// Report every shortest path instead of one
    #[arg(long)]
    pub all: bool,
}

#[derive(Serialize)]
struct PathsOutput {
    count: usize,
    paths: Vec<PathRecord>,
}

pub fn run_paths(graph: &Graph, args: &PathsArgs, format: Format) -> Result<String> {
    let start = resolve_node(graph, &args.from)?;
    let end = resolve_node(graph, &args.to)?;
    let expander = Expander::for_types(graph, &args.types, args.direction)?;

    let found = paths_with_length(graph, start, end, &expander, args.length)?;
    let paths: Vec<Path> = match args.limit {
        Some(n) => found.take(n).collect(),
        None => found.collect(),
    };

    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&PathsOutput {
            count: paths.len(),
            paths: paths.iter().map(|p| p.to_record(graph)).collect(),
        })?),
        Format::Text => {
            let mut out: Vec<String> = paths.iter().map(|p| p.render(graph)).collect();
            out.push(format!(
                "{} path{} of length {}",
                paths.len(),
                if paths.len() == 1 { "" } else { "s" },
                args.length
            ));
            Ok(out.join("\n"))
        }
    }
}

pub fn run_shortest(graph: &Graph, args: &ShortestArgs, format: Format) -> Result<String> {
    let start = resolve_node(graph, &args.from)?;
    let end = resolve_node(graph, &args.to)?;
    let expander = Expander::for_type(graph, &args.rel_type, args.direction)?;

    let paths: Vec<Path> = if args.all {
        all_shortest_paths(graph, start, end, &expander, args.max_depth)?
    } else {
        shortest_path(graph, start, end, &expander, args.max_depth)?
            .into_iter()
            .collect()
    };

    match format {
        Format::Json if args.all => Ok(serde_json::to_string_pretty(&PathsOutput {
            count: paths.len(),
            paths: paths.iter().map(|p| p.to_record(graph)).collect(),
        })?),
        Format::Json => {
            let record = paths.first().map(|p| p.to_record(graph));
            Ok(serde_json::to_string_pretty(&record)?)
        }
        Format::Text if paths.is_empty() => Ok(format!(
            "no path from {} to {} within {} hops",
            graph.display_name(start),
            graph.display_name(end),
            args.max_depth
        )),
        Format::Text => {
            let mut out: Vec<String> = paths.iter().map(|p| p.render(graph)).collect();
            out.push(format!("length {}", paths[0].len()));
            Ok(out.join("\n"))
        }
    }
}
