//! BART real-time API client.
//!
//! This module provides a blocking HTTP client for the BART legacy API at
//! `api.bart.gov`, covering advisories, real-time estimates, routes,
//! schedules, stations and the API version.
//!
//! Key characteristics of the API:
//! - Every request is a GET carrying `cmd`, `key` and `json=y`
//! - Responses are XML documents translated to JSON, so attributes arrive
//!   as `@name` keys and repeated elements may collapse to single objects
//! - Failures are usually reported with HTTP 200 and an `error` element in
//!   the body, which the client turns into [`BartError::Api`]

mod client;
mod convert;
mod endpoint;
mod error;
mod mock;
mod query;
mod transport;
mod types;


pub use client::{BartClient, BartConfig, DEMO_API_KEY};
pub use convert::ConversionError;
pub use endpoint::{Command, DEFAULT_BASE_URL, Endpoint, Endpoints};
pub use error::BartError;
pub use mock::{MockTransport, RecordedRequest};
pub use query::Query;
pub use transport::{HttpTransport, Transport};
