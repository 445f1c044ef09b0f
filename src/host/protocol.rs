//! Wire types for the line-delimited JSON host protocol.
//!
//! One request per line:
//! ```json
//! {"id": 1, "method": "provideConfigurations", "params": {"uris": ["/p/a.cpp"]}}
//! ```
//! One response per line, carrying either `result` or `error`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use super::HostError;

/// Decoded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    CanProvideConfiguration { uri: PathBuf },
    ProvideConfigurations { uris: Vec<PathBuf> },
    CanProvideBrowseConfiguration,
    ProvideBrowseConfiguration,
    ProvideFolderBrowseConfiguration { folder: PathBuf },
    Rebuild,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    #[serde(default)]
    id: Value,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct UriParams {
    uri: PathBuf,
}

#[derive(Debug, Deserialize)]
struct UrisParams {
    uris: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct FolderParams {
    folder: PathBuf,
}

impl HostRequest {
    /// Parse one request line into its id and typed request.
    ///
    /// The id is returned even when the method or params are bad, so the
    /// error response can still be correlated.
    pub fn parse(line: &str) -> (Value, Result<Self, HostError>) {
        let raw: RawRequest = match serde_json::from_str(line) {
            Ok(raw) => raw,
            Err(e) => return (Value::Null, Err(HostError::InvalidJson(e))),
        };
        let request = Self::from_parts(&raw.method, raw.params);
        (raw.id, request)
    }

    fn from_parts(method: &str, params: Value) -> Result<Self, HostError> {
        let invalid = |source| HostError::InvalidParams {
            method: method.to_string(),
            source,
        };

        match method {
            "canProvideConfiguration" => {
                let p: UriParams = serde_json::from_value(params).map_err(invalid)?;
                Ok(Self::CanProvideConfiguration { uri: p.uri })
            }
            "provideConfigurations" => {
                let p: UrisParams = serde_json::from_value(params).map_err(invalid)?;
                Ok(Self::ProvideConfigurations { uris: p.uris })
            }
            "canProvideBrowseConfiguration" => Ok(Self::CanProvideBrowseConfiguration),
            "provideBrowseConfiguration" => Ok(Self::ProvideBrowseConfiguration),
            "provideFolderBrowseConfiguration" => {
                let p: FolderParams = serde_json::from_value(params).map_err(invalid)?;
                Ok(Self::ProvideFolderBrowseConfiguration { folder: p.folder })
            }
            "rebuild" => Ok(Self::Rebuild),
            other => Err(HostError::UnknownMethod(other.to_string())),
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::CanProvideConfiguration { .. } => "canProvideConfiguration",
            Self::ProvideConfigurations { .. } => "provideConfigurations",
            Self::CanProvideBrowseConfiguration => "canProvideBrowseConfiguration",
            Self::ProvideBrowseConfiguration => "provideBrowseConfiguration",
            Self::ProvideFolderBrowseConfiguration { .. } => "provideFolderBrowseConfiguration",
            Self::Rebuild => "rebuild",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: i64,
    pub message: String,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl HostResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: Value, error: &HostError) -> Self {
        Self {
            id,
            result: None,
            error: Some(ErrorBody {
                code: error.code(),
                message: error.to_string(),
            }),
        }
    }
}
