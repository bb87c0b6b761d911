//! pathgraph: run path queries against a dataset from the command line.
//!
//! Loads the bundled Doctor Who universe (or a JSON dataset given with
//! `--dataset`) and prints exact-length or shortest paths between two nodes.
//!
//! ```text
//! pathgraph paths "name=Rose Tyler" "species=Dalek" -t APPEARED_IN
//! pathgraph shortest "actor=Roger Delgado" "actor=John Simm" -t REGENERATED_TO
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod load;
mod path;
mod status;
mod util;

use path::{PathsArgs, ShortestArgs};
use util::Format;

#[derive(Parser, Debug)]
#[command(name = "pathgraph", version, about = "Path queries over an in-memory graph")]
struct Cli {
    /// JSON dataset to load instead of the bundled Doctor Who universe
    #[arg(long, global = true, env = "PATHGRAPH_DATASET")]
    dataset: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Every simple path of an exact length between two nodes
    Paths(PathsArgs),
    /// Shortest path between two nodes along one relationship type
    Shortest(ShortestArgs),
    /// Show the node a selector resolves to
    Lookup {
        /// key=value or numeric id
        selector: String,
    },
    /// Summary of the loaded graph
    Stats,
}

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pathgraph_core=warn,pathgraph_cli=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn run(cli: Cli) -> error::Result<String> {
    let loaded = load::load_graph(cli.dataset.as_deref())?;
    let graph = &loaded.graph;

    match &cli.command {
        Command::Paths(args) => path::run_paths(graph, args, cli.format),
        Command::Shortest(args) => path::run_shortest(graph, args, cli.format),
        Command::Lookup { selector } => status::run_lookup(graph, selector, cli.format),
        Command::Stats => status::run_stats(&loaded, cli.format),
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("pathgraph: {}", e);
            ExitCode::FAILURE
        }
    }
}
