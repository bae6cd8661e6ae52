//! BART real-time API client.
//!
//! A typed, blocking wrapper around the Bay Area Rapid Transit public API:
//! service advisories, real-time departure estimates, routes, schedules,
//! fares and station information.

pub mod api;
pub mod domain;
pub mod report;
