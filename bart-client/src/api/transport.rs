//! Transport seam between the client and the network.

use std::time::Duration;

use tracing::debug;

use super::error::BartError;
use super::query::Query;

/// Performs a single GET and returns the response body.
///
/// This abstraction allows the client to be tested with canned responses.
pub trait Transport {
    fn get(&self, url: &str, query: &Query) -> Result<String, BartError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &Query) -> Result<String, BartError> {
        (**self).get(url, query)
    }
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, BartError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &Query) -> Result<String, BartError> {
        let response = self.http.get(url).query(query.pairs()).send()?;
        let status = response.status();
        debug!(%url, cmd = query.command(), status = status.as_u16(), "response received");

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BartError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text()?)
    }
}
