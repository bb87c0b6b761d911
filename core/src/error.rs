use thiserror::Error;

use crate::graph::NodeId;

/// Errors surfaced by graph construction, lookups and path queries.
///
/// Queries fail fast: nothing is retried and no partial result accompanies
/// an error.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no node has {key} = '{value}'")]
    NoMatch { key: String, value: String },

    #[error("{count} nodes have {key} = '{value}', expected exactly one")]
    AmbiguousMatch {
        key: String,
        value: String,
        count: usize,
    },

    #[error("malformed dataset: {0}")]
    Dataset(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
