//! Error types for the host protocol.

use thiserror::Error;

use crate::database::DatabaseError;

/// Failures while handling one host request.
///
/// Each maps to an error response; none of them end the session.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Request is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Unknown method '{0}'")]
    UnknownMethod(String),

    #[error("Invalid params for '{method}': {source}")]
    InvalidParams {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rebuild failed: {0}")]
    RebuildFailed(#[from] DatabaseError),
}

impl HostError {
    /// JSON-RPC style numeric code.
    pub fn code(&self) -> i64 {
        match self {
            Self::InvalidJson(_) => -32700,
            Self::UnknownMethod(_) => -32601,
            Self::InvalidParams { .. } => -32602,
            Self::RebuildFailed(_) => -32000,
        }
    }
}
