//! Fixed API endpoints and command tags.

use std::fmt;

/// Default base URL for the BART API.
pub const DEFAULT_BASE_URL: &str = "https://api.bart.gov/api";

/// Functional category of the API, each served by its own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Advisories,
    Estimates,
    Routes,
    Schedules,
    Stations,
    Version,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::Advisories,
        Endpoint::Estimates,
        Endpoint::Routes,
        Endpoint::Schedules,
        Endpoint::Stations,
        Endpoint::Version,
    ];

    /// Path of the endpoint below the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Advisories => "bsa.aspx",
            Endpoint::Estimates => "etd.aspx",
            Endpoint::Routes => "route.aspx",
            Endpoint::Schedules => "sched.aspx",
            Endpoint::Stations => "stn.aspx",
            Endpoint::Version => "version.aspx",
        }
    }

    /// Short name used for fixture files, e.g. `etd` for `etd.aspx`.
    pub fn stem(&self) -> &'static str {
        self.path().trim_end_matches(".aspx")
    }
}

/// Full URLs of every endpoint, resolved once from a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    advisories: String,
    estimates: String,
    routes: String,
    schedules: String,
    stations: String,
    version: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let url = |endpoint: Endpoint| format!("{}/{}", base, endpoint.path());
        Self {
            advisories: url(Endpoint::Advisories),
            estimates: url(Endpoint::Estimates),
            routes: url(Endpoint::Routes),
            schedules: url(Endpoint::Schedules),
            stations: url(Endpoint::Stations),
            version: url(Endpoint::Version),
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Advisories => &self.advisories,
            Endpoint::Estimates => &self.estimates,
            Endpoint::Routes => &self.routes,
            Endpoint::Schedules => &self.schedules,
            Endpoint::Stations => &self.stations,
            Endpoint::Version => &self.version,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Value of the `cmd` query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Bsa,
    Count,
    Elev,
    Etd,
    RouteInfo,
    Routes,
    Arrive,
    Depart,
    Fare,
    Holiday,
    RouteSched,
    Scheds,
    Special,
    StnSched,
    StnInfo,
    StnAccess,
    Stns,
    Ver,
    Help,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Bsa => "bsa",
            Command::Count => "count",
            Command::Elev => "elev",
            Command::Etd => "etd",
            Command::RouteInfo => "routeinfo",
            Command::Routes => "routes",
            Command::Arrive => "arrive",
            Command::Depart => "depart",
            Command::Fare => "fare",
            Command::Holiday => "holiday",
            Command::RouteSched => "routesched",
            Command::Scheds => "scheds",
            Command::Special => "special",
            Command::StnSched => "stnsched",
            Command::StnInfo => "stninfo",
            Command::StnAccess => "stnaccess",
            Command::Stns => "stns",
            Command::Ver => "ver",
            Command::Help => "help",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
