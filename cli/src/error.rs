use std::path::PathBuf;

use pathgraph_core::GraphError;
use thiserror::Error;

/// Errors that end a `pathgraph` invocation with a non-zero exit status.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("cannot read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid node selector '{0}': use key=value or a numeric node id")]
    Selector(String),

    #[error("cannot encode output: {0}")]
    Output(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
