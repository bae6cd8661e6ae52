//! Help and version results.

use std::fmt;

/// API category whose help text can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpTopic {
    Advisories,
    Estimates,
    Routes,
    Schedules,
    Stations,
}

impl HelpTopic {
    /// Client operations available for this category.
    pub fn operations(&self) -> &'static [&'static str] {
        match self {
            HelpTopic::Advisories => &["bsa", "train_count", "elev", "elev_help"],
            HelpTopic::Estimates => &["etd", "etd_help"],
            HelpTopic::Routes => &["route_help", "routes", "route_info"],
            HelpTopic::Schedules => &[
                "arrive",
                "depart",
                "fare",
                "sched_help",
                "holiday",
                "routesched",
                "scheds",
                "special",
                "stnsched",
            ],
            HelpTopic::Stations => &["stn_help", "stninfo", "stnaccess", "stns"],
        }
    }
}

impl fmt::Display for HelpTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HelpTopic::Advisories => "advisories",
            HelpTopic::Estimates => "estimates",
            HelpTopic::Routes => "routes",
            HelpTopic::Schedules => "schedules",
            HelpTopic::Stations => "stations",
        };
        f.write_str(name)
    }
}

/// Help text returned by one category's `help` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpMessage {
    pub topic: HelpTopic,
    pub text: String,
    pub operations: &'static [&'static str],
}

/// API version details (`ver`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub api_version: String,
    pub copyright: String,
    pub license: String,
}
