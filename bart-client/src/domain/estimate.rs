//! Real-time departure estimates.
//!
//! Estimates arrive nested three levels deep: station, destination group,
//! individual estimate. Platform and direction filters apply at the
//! innermost level.

use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// A platform number at a BART station (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform(u8);

impl Platform {
    /// Create a platform, rejecting numbers outside 1-4.
    pub fn new(n: u8) -> Result<Self, DomainError> {
        if (1..=4).contains(&n) {
            Ok(Self(n))
        } else {
            Err(DomainError::InvalidPlatform(n.to_string()))
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Whether a platform string from an estimate refers to this platform.
    pub fn matches(&self, reported: &str) -> bool {
        reported.trim().parse::<u8>() == Ok(self.0)
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| DomainError::InvalidPlatform(s.to_string()))
            .and_then(Self::new)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// The value the API expects in the `dir` query field.
    pub fn as_query(&self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::South => "s",
        }
    }

    /// Whether a direction string from an estimate ("North", "South")
    /// refers to this direction.
    pub fn matches(&self, reported: &str) -> bool {
        let initial = match self {
            Direction::North => 'n',
            Direction::South => 's',
        };
        reported
            .trim()
            .chars()
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&initial))
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            _ => Err(DomainError::InvalidDirection(s.to_string())),
        }
    }
}

/// Minutes until departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Minutes {
    /// The train is boarding now.
    Leaving,
    In(u32),
}

impl Minutes {
    /// Parse the API's minutes field ("Leaving" or a number).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("leaving") {
            return Some(Minutes::Leaving);
        }
        s.parse().ok().map(Minutes::In)
    }
}

/// A single predicted departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate {
    pub minutes: Minutes,
    pub platform: String,
    /// "North" or "South" as reported by the API.
    pub direction: String,
    /// Line color name, e.g. "RED".
    pub color: String,
    pub hex_color: String,
    /// Train length in cars.
    pub length: Option<u32>,
    pub bike_flag: bool,
    /// Delay in seconds.
    pub delay: Option<u32>,
}

/// Estimates for trains heading to one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationGroup {
    pub destination: String,
    pub abbreviation: String,
    pub estimates: Vec<Estimate>,
}

/// All destination groups departing one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationDepartures {
    pub name: String,
    pub abbr: String,
    pub destinations: Vec<DestinationGroup>,
}

/// Result of an estimates query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departures {
    /// The station the query was made for (may be `ALL`).
    pub origin: String,
    pub date: String,
    pub time: String,
    pub stations: Vec<StationDepartures>,
    /// Set when the API matched nothing, e.g. "No data matched your criteria."
    pub warning: Option<String>,
}

impl Departures {
    /// Total number of estimates across all stations and destinations.
    pub fn estimate_count(&self) -> usize {
        self.stations
            .iter()
            .flat_map(|s| &s.destinations)
            .map(|d| d.estimates.len())
            .sum()
    }
}

/// Platform/direction filter applied to individual estimates.
///
/// The two filters are mutually exclusive: when both are supplied the
/// direction is dropped in favor of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EstimateFilter {
    platform: Option<Platform>,
    direction: Option<Direction>,
}

impl EstimateFilter {
    pub fn new(platform: Option<Platform>, direction: Option<Direction>) -> Self {
        let direction = if platform.is_some() { None } else { direction };
        Self {
            platform,
            direction,
        }
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.platform.is_some() || self.direction.is_some()
    }

    /// Whether an estimate passes the filter.
    pub fn accepts(&self, estimate: &Estimate) -> bool {
        if let Some(platform) = self.platform
            && !platform.matches(&estimate.platform)
        {
            return false;
        }
        if let Some(direction) = self.direction
            && !direction.matches(&estimate.direction)
        {
            return false;
        }
        true
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn direction_strategy() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            Just(None),
            Just(Some(Direction::North)),
            Just(Some(Direction::South)),
        ]
    }

    proptest! {
        #[test]
        fn platform_and_direction_equals_platform_alone(
            plat in 1u8..=4,
            dir in direction_strategy(),
            reported_plat in 1u8..=4,
            reported_dir in prop_oneof![Just("North"), Just("South")],
        ) {
            let platform = Platform::new(plat).unwrap();
            let both = EstimateFilter::new(Some(platform), dir);
            let alone = EstimateFilter::new(Some(platform), None);

            let est = Estimate {
                minutes: Minutes::Leaving,
                platform: reported_plat.to_string(),
                direction: reported_dir.to_string(),
                color: "YELLOW".to_string(),
                hex_color: "#ffff33".to_string(),
                length: None,
                bike_flag: false,
                delay: None,
            };

            prop_assert_eq!(both, alone);
            prop_assert_eq!(both.accepts(&est), alone.accepts(&est));
            prop_assert_eq!(both.accepts(&est), plat == reported_plat);
        }
    }
}
