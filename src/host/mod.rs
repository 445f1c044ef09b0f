//! Line-delimited JSON protocol for an external IDE host.
//!
//! The host writes one request per line on our stdin and reads one response
//! per line from our stdout. Every request gets a response; malformed or
//! unknown requests produce an error response and the session continues.

mod error;
mod protocol;

pub use error::HostError;
pub use protocol::{ErrorBody, HostRequest, HostResponse};

use serde_json::{Value, json};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::configuration::BuildTarget;
use crate::debug_event;
use crate::index::{ConfigurationProvider, SharedIndex};

/// Request dispatcher bound to one shared index.
#[derive(Debug, Clone)]
pub struct HostSession {
    index: SharedIndex,
    database_path: PathBuf,
    target: BuildTarget,
}

impl HostSession {
    pub fn new(index: SharedIndex, database_path: PathBuf, target: BuildTarget) -> Self {
        Self {
            index,
            database_path,
            target,
        }
    }

    /// Handle one request line and return the response.
    pub fn handle_line(&self, line: &str) -> HostResponse {
        let (id, request) = HostRequest::parse(line);
        match request.and_then(|request| self.dispatch(request)) {
            Ok(result) => HostResponse::ok(id, result),
            Err(e) => {
                tracing::warn!("[host] request failed: {e}");
                HostResponse::err(id, &e)
            }
        }
    }

    fn dispatch(&self, request: HostRequest) -> Result<Value, HostError> {
        debug_event!("host", "request", "{}", request.method());
        let result = match request {
            HostRequest::CanProvideConfiguration { uri } => {
                json!(self.index.can_provide_configuration(&uri))
            }
            HostRequest::ProvideConfigurations { uris } => {
                json!(self.index.provide_configurations(&uris))
            }
            HostRequest::CanProvideBrowseConfiguration => {
                json!(self.index.can_provide_browse_configuration())
            }
            HostRequest::ProvideBrowseConfiguration => {
                json!(self.index.provide_browse_configuration())
            }
            HostRequest::ProvideFolderBrowseConfiguration { folder } => {
                json!(self.index.provide_folder_browse_configuration(&folder))
            }
            HostRequest::Rebuild => {
                let stats = self.index.refresh_from(&self.database_path, &self.target)?;
                json!(stats)
            }
        };
        Ok(result)
    }

    /// Serve requests until `input` reaches end of file.
    ///
    /// Blank lines are ignored. Lines that are not UTF-8 are decoded lossily
    /// and answered with a parse error. Only I/O failures end the session
    /// early.
    pub fn serve(&self, mut input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buf);
            if line.trim().is_empty() {
                continue;
            }
            let response = self.handle_line(&line);
            serde_json::to_writer(&mut output, &response)?;
            output.write_all(b"\n")?;
            output.flush()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ConfigurationIndex;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> HostSession {
        let root = dir.path().to_path_buf();
        let db_path = root.join("compile_commands.json");
        let db = json!([{
            "directory": root,
            "file": "main.cpp",
            "arguments": ["sh", "/usr/bin/clang", "-Iinclude", "-std=c++17", "-O2"]
        }]);
        fs::write(&db_path, db.to_string()).unwrap();

        let index = SharedIndex::new(ConfigurationIndex::new([root]));
        HostSession::new(index, db_path, BuildTarget::new("x64", "linux"))
    }

    #[test]
    fn test_rebuild_then_query() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        let main = dir.path().join("main.cpp");

        let before = session.handle_line(&format!(
            r#"{{"id": 1, "method": "canProvideConfiguration", "params": {{"uri": {}}}}}"#,
            json!(main)
        ));
        assert_eq!(before.result, Some(json!(false)));

        let rebuilt = session.handle_line(r#"{"id": 2, "method": "rebuild"}"#);
        assert_eq!(rebuilt.result.unwrap()["files"], 1);

        let configs = session.handle_line(&format!(
            r#"{{"id": 3, "method": "provideConfigurations", "params": {{"uris": [{}, "/missing.c"]}}}}"#,
            json!(main)
        ));
        let items = configs.result.unwrap();
        assert_eq!(items.as_array().unwrap().len(), 1);
        assert_eq!(items[0]["configuration"]["standard"], "c++17");
        assert_eq!(items[0]["configuration"]["intelliSenseMode"], "clang-x64");
    }

    #[test]
    fn test_unknown_folder_is_null_not_error() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);

        let response = session.handle_line(
            r#"{"id": 9, "method": "provideFolderBrowseConfiguration", "params": {"folder": "/elsewhere"}}"#,
        );

        assert_eq!(response.error, None);
        assert_eq!(response.result, Some(Value::Null));
    }

    #[test]
    fn test_serve_answers_every_line() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        let input = concat!(
            "{\"id\": 1, \"method\": \"rebuild\"}\n",
            "\n",
            "garbage\n",
            "{\"id\": 2, \"method\": \"canProvideBrowseConfiguration\"}\n",
            "{\"id\": 3, \"method\": \"provideBrowseConfiguration\"}\n",
        );
        let mut output = Vec::new();

        session.serve(Cursor::new(input), &mut output).unwrap();

        let responses: Vec<HostResponse> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 4);
        assert_eq!(responses[1].error.as_ref().unwrap().code, -32700);
        assert_eq!(responses[2].result, Some(json!(true)));
        let browse = responses[3].result.as_ref().unwrap();
        assert_eq!(browse["compilerArgs"], json!(["-O2"]));
        assert_eq!(browse["standard"], "c++17");
    }

    #[test]
    fn test_serve_survives_non_utf8_line() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        let mut input = b"\xff\xfe garbage\n".to_vec();
        input.extend_from_slice(b"{\"id\": 2, \"method\": \"canProvideBrowseConfiguration\"}");
        let mut output = Vec::new();

        session.serve(Cursor::new(input), &mut output).unwrap();

        let responses: Vec<HostResponse> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, Value::Null);
        assert_eq!(responses[0].error.as_ref().unwrap().code, -32700);
        assert_eq!(responses[1].id, json!(2));
        assert_eq!(responses[1].result, Some(json!(true)));
    }

    #[test]
    fn test_rebuild_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let index = SharedIndex::new(ConfigurationIndex::new([dir.path().to_path_buf()]));
        let session = HostSession::new(
            index,
            dir.path().join("absent.json"),
            BuildTarget::new("x64", "linux"),
        );

        let response = session.handle_line(r#"{"id": 5, "method": "rebuild"}"#);

        assert_eq!(response.id, json!(5));
        assert_eq!(response.error.unwrap().code, -32000);
    }
}
