//! Mock transport for testing without API access.
//!
//! Serves canned response bodies as if they were live API responses and
//! records every request it receives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use super::endpoint::{Command, Endpoint};
use super::error::BartError;
use super::query::Query;
use super::transport::Transport;

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Query,
}

/// Mock transport that serves bodies keyed by endpoint and command.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<(Endpoint, String), String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `command` on `endpoint`.
    pub fn with_response(
        mut self,
        endpoint: Endpoint,
        command: Command,
        body: impl Into<String>,
    ) -> Self {
        self.responses
            .insert((endpoint, command.as_str().to_string()), body.into());
        self
    }

    /// Load responses from a directory.
    ///
    /// Expects files named `{endpoint}_{cmd}.json`, e.g. `etd_etd.json` or
    /// `stn_help.json`. Other files are ignored.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, BartError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| BartError::Status {
            status: 0,
            message: format!("Failed to read mock data directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| BartError::Status {
                status: 0,
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some((stem, cmd)) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.split_once('_'))
            else {
                continue;
            };

            let Some(endpoint) = Endpoint::ALL.into_iter().find(|e| e.stem() == stem) else {
                continue;
            };

            let body = std::fs::read_to_string(&path).map_err(|e| BartError::Status {
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;

            responses.insert((endpoint, cmd.to_string()), body);
        }

        if responses.is_empty() {
            return Err(BartError::Status {
                status: 0,
                message: format!("No mock response files found in {:?}", data_dir),
            });
        }

        Ok(Self {
            responses,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    /// Number of canned responses available.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, query: &Query) -> Result<String, BartError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                query: query.clone(),
            });
        }

        let endpoint = Endpoint::ALL
            .into_iter()
            .find(|e| url.ends_with(e.path()))
            .ok_or_else(|| BartError::Status {
                status: 404,
                message: format!("No mock endpoint for {}", url),
            })?;

        self.responses
            .get(&(endpoint, query.command().to_string()))
            .cloned()
            .ok_or_else(|| BartError::Status {
                status: 404,
                message: format!(
                    "No mock response for cmd={} on {}",
                    query.command(),
                    endpoint.path()
                ),
            })
    }
}
