//! Schedule queries and results: trip planning, fares, timetables.

use chrono::NaiveTime;

use super::{DomainError, QueryDate};

/// Largest number of trips the API returns either side of the requested time.
pub const MAX_TRIP_COUNT: u8 = 4;

/// Optional refinements for an `arrive` / `depart` trip request.
///
/// Unset fields are left to the API defaults (current time, today, two
/// trips before and two after).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripQuery {
    pub time: Option<NaiveTime>,
    pub date: Option<QueryDate>,
    /// Trips before the requested time (0-4).
    pub before: Option<u8>,
    /// Trips after the requested time (0-4).
    pub after: Option<u8>,
}

impl TripQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn on(mut self, date: QueryDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn before(mut self, n: u8) -> Self {
        self.before = Some(n);
        self
    }

    pub fn after(mut self, n: u8) -> Self {
        self.after = Some(n);
        self
    }

    /// Check trip counts are within the range the API accepts.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [("before", self.before), ("after", self.after)] {
            if let Some(value) = value
                && value > MAX_TRIP_COUNT
            {
                return Err(DomainError::InvalidTripCount { field, value });
            }
        }
        Ok(())
    }
}

/// One fare class for a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fare {
    /// Amount in dollars, as reported, e.g. "4.35".
    pub amount: String,
    /// Fare name, e.g. "Clipper".
    pub name: String,
    /// Fare class, e.g. "clipper" or "cash".
    pub class: String,
}

/// A leg of a trip, ridden on a single train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripLeg {
    pub order: Option<u32>,
    pub origin: String,
    pub destination: String,
    pub orig_time_min: String,
    pub dest_time_min: String,
    pub line: String,
    pub train_head_station: String,
}

/// A planned trip between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub orig_time_min: String,
    pub orig_time_date: String,
    pub dest_time_min: String,
    pub dest_time_date: String,
    /// Standard fare.
    pub fare: String,
    pub fares: Vec<Fare>,
    pub legs: Vec<TripLeg>,
}

/// Result of an `arrive` or `depart` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPlan {
    pub origin: String,
    pub destination: String,
    pub trips: Vec<Trip>,
}

/// Fares between two stations (`fare`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareQuote {
    pub origin: String,
    pub destination: String,
    pub fares: Vec<Fare>,
}

/// A holiday and the schedule type that runs on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub name: String,
    pub date: String,
    /// "Saturday" or "Sunday".
    pub schedule_type: String,
}

/// A stop made by a scheduled train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledStop {
    pub station: String,
    pub orig_time: String,
}

/// A train running on a route, with its timed stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTrain {
    pub train_id: String,
    pub stops: Vec<ScheduledStop>,
}

/// Timetable for one route (`routesched`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSchedule {
    pub sched_num: String,
    pub date: String,
    pub trains: Vec<ScheduledTrain>,
}

/// A published schedule version (`scheds`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleInfo {
    pub id: String,
    pub effective_date: String,
}

/// A current or upcoming special schedule (`special`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialSchedule {
    pub start_date: String,
    pub end_date: String,
    pub text: String,
    pub link: String,
    pub routes_affected: String,
}

/// A train calling at a station (`stnsched`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationScheduleItem {
    pub train_id: String,
    pub line: String,
    pub head_station: String,
    pub orig_time: String,
    pub dest_time: String,
}

/// Timetable for one station (`stnsched`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSchedule {
    pub name: String,
    pub abbr: String,
    pub sched_num: String,
    pub date: String,
    pub items: Vec<StationScheduleItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_query_builder() {
        let time = NaiveTime::from_hms_opt(8, 15, 0).unwrap();
        let query = TripQuery::new().at(time).on(QueryDate::Today).before(1).after(3);

        assert_eq!(query.time, Some(time));
        assert_eq!(query.date, Some(QueryDate::Today));
        assert_eq!(query.before, Some(1));
        assert_eq!(query.after, Some(3));
        assert!(query.validate().is_ok());
    }

    #[test]
    fn trip_counts_are_bounded() {
        assert!(TripQuery::new().before(4).after(0).validate().is_ok());

        assert_eq!(
            TripQuery::new().before(5).validate(),
            Err(DomainError::InvalidTripCount {
                field: "before",
                value: 5
            })
        );
        assert_eq!(
            TripQuery::new().after(9).validate(),
            Err(DomainError::InvalidTripCount {
                field: "after",
                value: 9
            })
        );
    }

    #[test]
    fn default_query_is_empty() {
        let query = TripQuery::default();
        assert!(query.time.is_none());
        assert!(query.date.is_none());
        assert!(query.validate().is_ok());
    }
}
