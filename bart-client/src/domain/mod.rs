//! Domain types for the BART API client.
//!
//! Request parameters are validated at construction time, so the client can
//! serialize them without further checks. Result types are plain structures
//! converted from the API's responses; rendering them for people lives in
//! [`crate::report`].

mod advisory;
mod error;
mod estimate;
mod info;
mod route;
mod schedule;
mod station;
mod time;

pub use advisory::{Advisories, Advisory, TrainCount};
pub use error::DomainError;
pub use estimate::{
    Departures, DestinationGroup, Direction, Estimate, EstimateFilter, Minutes, Platform,
    StationDepartures,
};
pub use info::{HelpMessage, HelpTopic, VersionInfo};
pub use route::{RouteInfo, RouteSummary};
pub use schedule::{
    Fare, FareQuote, Holiday, MAX_TRIP_COUNT, RouteSchedule, ScheduleInfo, ScheduledStop,
    ScheduledTrain, SpecialSchedule, StationSchedule, StationScheduleItem, Trip, TripLeg,
    TripPlan, TripQuery,
};
pub use station::{StationAbbr, StationAccess, StationInfo, StationSummary};
pub use time::{QueryDate, format_query_time, parse_query_time};
