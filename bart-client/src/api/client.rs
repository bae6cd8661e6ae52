//! BART API client.
//!
//! Provides one blocking method per API command. Every method follows the
//! same pipeline: build the query, GET it from the category's endpoint,
//! reject bodies the API flagged as errors, decode the typed response and
//! convert it to domain results.

use std::time::Duration;

use chrono::NaiveTime;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{
    Advisories, Departures, Direction, EstimateFilter, FareQuote, HelpMessage, HelpTopic,
    Holiday, Platform, QueryDate, RouteInfo, RouteSchedule, RouteSummary, ScheduleInfo,
    SpecialSchedule, StationAbbr, StationAccess, StationInfo, StationSchedule, StationSummary,
    TrainCount, TripPlan, TripQuery, VersionInfo, format_query_time,
};

use super::convert;
use super::endpoint::{Command, DEFAULT_BASE_URL, Endpoint, Endpoints};
use super::error::BartError;
use super::query::Query;
use super::transport::{HttpTransport, Transport};
use super::types::{
    AdvisoriesRoot, CountRoot, Envelope, EtdRoot, FareRoot, HolidayRoot, MessageRoot,
    RouteInfoRoot, RouteSchedRoot, RoutesRoot, SchedulesRoot, SpecialRoot, StationAccessDto,
    StationDetailDto, StationDto, StationsRoot, StnSchedRoot, TripRoot, VersionRoot,
};

/// Public demonstration key published with the API documentation.
pub const DEMO_API_KEY: &str = "MW9S-E7SL-26DU-VV8V";

/// Longest body excerpt carried in a JSON error.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the BART client.
#[derive(Debug, Clone)]
pub struct BartConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BartConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for BartConfig {
    fn default() -> Self {
        Self::new(DEMO_API_KEY)
    }
}

/// BART API client.
///
/// Stateless apart from the key and endpoint URLs fixed at construction;
/// each method performs at most one request.
#[derive(Debug, Clone)]
pub struct BartClient<T = HttpTransport> {
    key: String,
    endpoints: Endpoints,
    transport: T,
}

impl BartClient<HttpTransport> {
    /// Create a client that talks to the network.
    pub fn new(config: BartConfig) -> Result<Self, BartError> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> BartClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(config: BartConfig, transport: T) -> Self {
        Self {
            endpoints: Endpoints::new(&config.base_url),
            key: config.api_key,
            transport,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn query(&self, command: Command) -> Query {
        Query::new(command, &self.key)
    }

    /// Send `query` to `endpoint` and decode the `root` of the response.
    fn fetch<R: DeserializeOwned>(&self, endpoint: Endpoint, query: Query) -> Result<R, BartError> {
        let url = self.endpoints.url(endpoint);
        debug!(%url, cmd = query.command(), "sending request");

        let body = self.transport.get(url, &query)?;

        if body.contains("error") {
            let message = api_error_message(&body);
            warn!(cmd = query.command(), %message, "API reported an error");
            return Err(BartError::Api { message });
        }

        let envelope: Envelope<R> = serde_json::from_str(&body).map_err(|e| BartError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })?;

        Ok(envelope.root)
    }

    fn help_for(&self, topic: HelpTopic) -> Result<HelpMessage, BartError> {
        let endpoint = match topic {
            HelpTopic::Advisories => Endpoint::Advisories,
            HelpTopic::Estimates => Endpoint::Estimates,
            HelpTopic::Routes => Endpoint::Routes,
            HelpTopic::Schedules => Endpoint::Schedules,
            HelpTopic::Stations => Endpoint::Stations,
        };
        let root: MessageRoot = self.fetch(endpoint, self.query(Command::Help).finish())?;
        Ok(convert::convert_help(root, topic)?)
    }

    /// Current service announcements.
    ///
    /// `orig` is accepted by the API but announcements are not yet
    /// station-specific.
    pub fn bsa(&self, orig: Option<&StationAbbr>) -> Result<Advisories, BartError> {
        let query = self.query(Command::Bsa).push_opt("orig", orig).finish();
        let root: AdvisoriesRoot = self.fetch(Endpoint::Advisories, query)?;
        Ok(convert::convert_advisories(root))
    }

    /// Number of trains currently active.
    pub fn train_count(&self) -> Result<TrainCount, BartError> {
        let root: CountRoot =
            self.fetch(Endpoint::Advisories, self.query(Command::Count).finish())?;
        Ok(convert::convert_train_count(root)?)
    }

    /// Elevator status announcements.
    pub fn elev(&self) -> Result<Advisories, BartError> {
        let root: AdvisoriesRoot =
            self.fetch(Endpoint::Advisories, self.query(Command::Elev).finish())?;
        Ok(convert::convert_advisories(root))
    }

    pub fn elev_help(&self) -> Result<HelpMessage, BartError> {
        self.help_for(HelpTopic::Advisories)
    }

    /// Estimated departures from `orig` (or every station for `ALL`).
    ///
    /// Platform and direction are mutually exclusive: when both are given
    /// the direction is ignored.
    pub fn etd(
        &self,
        orig: &StationAbbr,
        plat: Option<Platform>,
        dir: Option<Direction>,
    ) -> Result<Departures, BartError> {
        let filter = EstimateFilter::new(plat, dir);

        let query = self
            .query(Command::Etd)
            .push("orig", orig)
            .push_opt("plat", filter.platform())
            .push_opt("dir", filter.direction().map(|d| d.as_query()))
            .finish();

        let root: EtdRoot = self.fetch(Endpoint::Estimates, query)?;
        Ok(convert::convert_departures(root, orig.as_str(), filter)?)
    }

    pub fn etd_help(&self) -> Result<HelpMessage, BartError> {
        self.help_for(HelpTopic::Estimates)
    }

    /// Details of one route. A schedule number takes precedence over a date.
    pub fn route_info(
        &self,
        route: u32,
        sched: Option<u32>,
        date: Option<QueryDate>,
    ) -> Result<RouteInfo, BartError> {
        let date = if sched.is_some() { None } else { date };
        let query = self
            .query(Command::RouteInfo)
            .push("route", route)
            .push_opt("sched", sched)
            .push_opt("date", date)
            .finish();

        let root: RouteInfoRoot = self.fetch(Endpoint::Routes, query)?;
        Ok(convert::convert_route_info(root)?)
    }

    /// All routes. A schedule number takes precedence over a date.
    pub fn routes(
        &self,
        sched: Option<u32>,
        date: Option<QueryDate>,
    ) -> Result<Vec<RouteSummary>, BartError> {
        let date = if sched.is_some() { None } else { date };
        let query = self
            .query(Command::Routes)
            .push_opt("sched", sched)
            .push_opt("date", date)
            .finish();

        let root: RoutesRoot = self.fetch(Endpoint::Routes, query)?;
        Ok(convert::convert_routes(root))
    }

    pub fn route_help(&self) -> Result<HelpMessage, BartError> {
        self.help_for(HelpTopic::Routes)
    }

    /// Trips from `orig` to `dest` arriving around the requested time.
    pub fn arrive(
        &self,
        orig: &StationAbbr,
        dest: &StationAbbr,
        trip: &TripQuery,
    ) -> Result<TripPlan, BartError> {
        self.plan_trip(Command::Arrive, orig, dest, trip)
    }

    /// Trips from `orig` to `dest` departing around the requested time.
    pub fn depart(
        &self,
        orig: &StationAbbr,
        dest: &StationAbbr,
        trip: &TripQuery,
    ) -> Result<TripPlan, BartError> {
        self.plan_trip(Command::Depart, orig, dest, trip)
    }

    fn plan_trip(
        &self,
        command: Command,
        orig: &StationAbbr,
        dest: &StationAbbr,
        trip: &TripQuery,
    ) -> Result<TripPlan, BartError> {
        trip.validate()?;

        let query = self
            .query(command)
            .push("orig", orig)
            .push("dest", dest)
            .push_opt("time", trip.time.map(format_query_time))
            .push_opt("date", trip.date)
            .push_opt("b", trip.before)
            .push_opt("a", trip.after)
            .finish();

        let root: TripRoot = self.fetch(Endpoint::Schedules, query)?;
        Ok(convert::convert_trip_plan(root))
    }

    /// Fares for a trip between two stations.
    pub fn fare(
        &self,
        orig: &StationAbbr,
        dest: &StationAbbr,
        date: Option<QueryDate>,
        sched: Option<u32>,
    ) -> Result<FareQuote, BartError> {
        let query = self
            .query(Command::Fare)
            .push("orig", orig)
            .push("dest", dest)
            .push_opt("date", date)
            .push_opt("sched", sched)
            .finish();

        let root: FareRoot = self.fetch(Endpoint::Schedules, query)?;
        Ok(convert::convert_fare_quote(root))
    }

    /// Holidays and the schedule type that runs on each.
    pub fn holiday(&self) -> Result<Vec<Holiday>, BartError> {
        let root: HolidayRoot =
            self.fetch(Endpoint::Schedules, self.query(Command::Holiday).finish())?;
        Ok(convert::convert_holidays(root))
    }

    /// Timetable of every train on a route.
    pub fn routesched(
        &self,
        route: u32,
        date: Option<QueryDate>,
        time: Option<NaiveTime>,
        sched: Option<u32>,
    ) -> Result<RouteSchedule, BartError> {
        let query = self
            .query(Command::RouteSched)
            .push("route", route)
            .push_opt("time", time.map(format_query_time))
            .push_opt("date", date)
            .push_opt("sched", sched)
            .finish();

        let root: RouteSchedRoot = self.fetch(Endpoint::Schedules, query)?;
        Ok(convert::convert_route_schedule(root))
    }

    /// Published schedule versions.
    pub fn scheds(&self) -> Result<Vec<ScheduleInfo>, BartError> {
        let root: SchedulesRoot =
            self.fetch(Endpoint::Schedules, self.query(Command::Scheds).finish())?;
        Ok(convert::convert_schedules(root))
    }

    /// Current and upcoming special schedules.
    pub fn special(&self) -> Result<Vec<SpecialSchedule>, BartError> {
        let root: SpecialRoot =
            self.fetch(Endpoint::Schedules, self.query(Command::Special).finish())?;
        Ok(convert::convert_special(root))
    }

    /// Timetable of every train calling at a station.
    pub fn stnsched(
        &self,
        orig: &StationAbbr,
        date: Option<QueryDate>,
    ) -> Result<StationSchedule, BartError> {
        let query = self
            .query(Command::StnSched)
            .push("orig", orig)
            .push_opt("date", date)
            .finish();

        let root: StnSchedRoot = self.fetch(Endpoint::Schedules, query)?;
        Ok(convert::convert_station_schedule(root))
    }

    pub fn sched_help(&self) -> Result<HelpMessage, BartError> {
        self.help_for(HelpTopic::Schedules)
    }

    /// Address and description of a station.
    pub fn stninfo(&self, orig: &StationAbbr) -> Result<StationInfo, BartError> {
        let query = self.query(Command::StnInfo).push("orig", orig).finish();
        let root: StationsRoot<StationDetailDto> = self.fetch(Endpoint::Stations, query)?;
        Ok(convert::convert_station_info(root.stations.station)?)
    }

    /// Parking, bike and locker facilities at a station.
    pub fn stnaccess(&self, orig: &StationAbbr) -> Result<StationAccess, BartError> {
        let query = self.query(Command::StnAccess).push("orig", orig).finish();
        let root: StationsRoot<StationAccessDto> = self.fetch(Endpoint::Stations, query)?;
        Ok(convert::convert_station_access(root.stations.station)?)
    }

    /// Every station, in the order the API lists them.
    pub fn stns(&self) -> Result<Vec<StationSummary>, BartError> {
        let root: StationsRoot<StationDto> =
            self.fetch(Endpoint::Stations, self.query(Command::Stns).finish())?;
        Ok(convert::convert_stations(root.stations.station))
    }

    pub fn stn_help(&self) -> Result<HelpMessage, BartError> {
        self.help_for(HelpTopic::Stations)
    }

    pub fn version(&self) -> Result<VersionInfo, BartError> {
        let root: VersionRoot = self.fetch(Endpoint::Version, self.query(Command::Ver).finish())?;
        Ok(convert::convert_version(root))
    }

    /// Help for every category, in the order routes, advisories, estimates,
    /// stations, schedules.
    pub fn help(&self) -> Result<Vec<HelpMessage>, BartError> {
        Ok(vec![
            self.route_help()?,
            self.elev_help()?,
            self.etd_help()?,
            self.stn_help()?,
            self.sched_help()?,
        ])
    }
}

/// Best-effort description of an error response.
///
/// Uses `root.message.error` when the body decodes; otherwise falls back
/// to a generic description.
fn api_error_message(body: &str) -> String {
    let described = serde_json::from_str::<Envelope<MessageRoot>>(body)
        .ok()
        .and_then(|envelope| envelope.root.message.0.error)
        .map(|error| {
            let text = error.text.into_inner();
            let details = error.details.into_inner();
            match (text.trim().is_empty(), details.trim().is_empty()) {
                (false, false) => format!("{}: {}", text.trim(), details.trim()),
                (false, true) => text.trim().to_string(),
                (true, false) => details.trim().to_string(),
                (true, true) => String::new(),
            }
        })
        .filter(|message| !message.is_empty());

    described.unwrap_or_else(|| "response body contains \"error\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = BartConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = BartConfig::default();

        assert_eq!(config.api_key, DEMO_API_KEY);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = BartClient::new(BartConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn error_message_from_body() {
        let body = r##"{"root": {"message": {"error": {
            "text": {"#cdata-section": "Invalid key"},
            "details": {"#cdata-section": "The api key was missing or invalid."}
        }}}}"##;
        assert_eq!(
            api_error_message(body),
            "Invalid key: The api key was missing or invalid."
        );
    }

    #[test]
    fn error_message_fallback() {
        assert_eq!(
            api_error_message("<html>internal error</html>"),
            "response body contains \"error\""
        );
    }
}
