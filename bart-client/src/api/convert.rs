//! Conversion from BART DTOs to domain types.
//!
//! Presence of required keys is checked by serde while decoding; this
//! module handles what serde cannot: numeric fields sent as strings,
//! flags, empty-string sentinels, estimate filtering and the alternating
//! trip/leg sequence.

use tracing::trace;

use crate::domain::{
    Advisories, Advisory, Departures, DestinationGroup, Estimate, EstimateFilter, Fare,
    FareQuote, HelpMessage, HelpTopic, Holiday, Minutes, RouteInfo, RouteSchedule, RouteSummary,
    ScheduleInfo, ScheduledStop, ScheduledTrain, SpecialSchedule, StationAccess,
    StationDepartures, StationInfo, StationSchedule, StationScheduleItem, StationSummary,
    TrainCount, Trip, TripLeg, TripPlan, VersionInfo,
};

use super::types::{
    AdvisoriesRoot, BsaDto, CountRoot, EstimateDto, EtdRoot, FareDto, FareRoot, HolidayRoot,
    MessageRoot, RouteInfoRoot, RouteSchedRoot, RoutesRoot, SchedulesRoot, SpecialRoot,
    StationAccessDto, StationDetailDto, StationDto, StnSchedRoot, TripDto, TripEntryDto,
    TripRoot, VersionRoot,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required element
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A numeric field held something else
    #[error("invalid number in {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A minutes field was neither a number nor "Leaving"
    #[error("invalid minutes value: {0:?}")]
    InvalidMinutes(String),
}

/// Empty strings stand in for absent values throughout the API.
fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

fn parse_optional_u32(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

fn flag(s: &str) -> bool {
    s.trim() == "1"
}

pub fn convert_advisories(root: AdvisoriesRoot) -> Advisories {
    Advisories {
        date: root.date,
        time: root.time,
        announcements: root.bsa.into_iter().map(convert_advisory).collect(),
    }
}

fn convert_advisory(dto: BsaDto) -> Advisory {
    Advisory {
        id: non_empty(dto.id),
        station: dto.station,
        kind: non_empty(dto.kind),
        description: dto.description.into_inner(),
        sms_text: non_empty(dto.sms_text.map(|c| c.into_inner())),
        posted: non_empty(dto.posted),
        expires: non_empty(dto.expires),
    }
}

pub fn convert_train_count(root: CountRoot) -> Result<TrainCount, ConversionError> {
    let count = root
        .traincount
        .trim()
        .parse()
        .map_err(|_| ConversionError::InvalidNumber {
            field: "traincount",
            value: root.traincount.clone(),
        })?;

    Ok(TrainCount {
        date: root.date,
        time: root.time,
        count,
    })
}

pub fn convert_help(root: MessageRoot, topic: HelpTopic) -> Result<HelpMessage, ConversionError> {
    let text = root
        .message
        .0
        .help
        .ok_or(ConversionError::MissingField("message.help"))?
        .into_inner();

    Ok(HelpMessage {
        topic,
        text,
        operations: topic.operations(),
    })
}

/// Convert an estimates response, applying `filter` to each estimate.
///
/// Destination groups emptied by the filter are dropped.
pub fn convert_departures(
    root: EtdRoot,
    origin: &str,
    filter: EstimateFilter,
) -> Result<Departures, ConversionError> {
    let warning = root.message.0.warning.map(|w| w.into_inner());

    let mut stations = Vec::with_capacity(root.station.len());
    for station in root.station {
        let mut destinations = Vec::with_capacity(station.etd.len());
        for group in station.etd {
            let had_estimates = !group.estimate.is_empty();
            let mut estimates = Vec::with_capacity(group.estimate.len());
            for dto in group.estimate {
                let estimate = convert_estimate(dto)?;
                if !filter.accepts(&estimate) {
                    trace!(
                        destination = %group.destination,
                        platform = %estimate.platform,
                        direction = %estimate.direction,
                        "skipping estimate"
                    );
                    continue;
                }
                estimates.push(estimate);
            }

            if filter.is_active() && had_estimates && estimates.is_empty() {
                continue;
            }
            destinations.push(DestinationGroup {
                destination: group.destination,
                abbreviation: group.abbreviation,
                estimates,
            });
        }

        stations.push(StationDepartures {
            name: station.name,
            abbr: station.abbr,
            destinations,
        });
    }

    Ok(Departures {
        origin: origin.to_string(),
        date: root.date,
        time: root.time,
        stations,
        warning: non_empty(warning),
    })
}

fn convert_estimate(dto: EstimateDto) -> Result<Estimate, ConversionError> {
    let minutes =
        Minutes::parse(&dto.minutes).ok_or_else(|| ConversionError::InvalidMinutes(dto.minutes))?;

    Ok(Estimate {
        minutes,
        platform: dto.platform,
        direction: dto.direction,
        color: dto.color,
        hex_color: dto.hexcolor,
        length: parse_optional_u32(&dto.length),
        bike_flag: flag(&dto.bikeflag),
        delay: parse_optional_u32(&dto.delay),
    })
}

pub fn convert_route_info(root: RouteInfoRoot) -> Result<RouteInfo, ConversionError> {
    let route = root
        .routes
        .route
        .into_iter()
        .next()
        .ok_or(ConversionError::MissingField("routes.route"))?;

    Ok(RouteInfo {
        route_id: route.route_id,
        name: route.name,
        abbr: route.abbr,
        number: parse_optional_u32(&route.number),
        origin: route.origin,
        destination: route.destination,
        color: route.color,
        hex_color: route.hexcolor,
        stations: route
            .config
            .into_iter()
            .flat_map(|c| c.station)
            .collect(),
    })
}

pub fn convert_routes(root: RoutesRoot) -> Vec<RouteSummary> {
    root.routes
        .route
        .into_iter()
        .map(|r| RouteSummary {
            number: parse_optional_u32(&r.number),
            route_id: r.route_id,
            name: r.name,
            abbr: r.abbr,
            color: r.color,
        })
        .collect()
}

/// Convert an `arrive` / `depart` response.
///
/// The `trip` sequence alternates trip and leg entries; only even
/// positions are read as trips.
pub fn convert_trip_plan(root: TripRoot) -> TripPlan {
    let trips = root
        .schedule
        .request
        .trip
        .into_iter()
        .step_by(2)
        .filter_map(|entry| match entry {
            TripEntryDto::Trip(trip) => Some(convert_trip(*trip)),
            TripEntryDto::Other(_) => None,
        })
        .collect();

    TripPlan {
        origin: root.origin,
        destination: root.destination,
        trips,
    }
}

fn convert_trip(dto: TripDto) -> Trip {
    Trip {
        orig_time_min: dto.orig_time_min,
        orig_time_date: dto.orig_time_date,
        dest_time_min: dto.dest_time_min,
        dest_time_date: dto.dest_time_date,
        fare: dto.fare,
        fares: dto.fares.fare.into_iter().map(convert_fare).collect(),
        legs: dto
            .leg
            .into_iter()
            .map(|leg| TripLeg {
                order: parse_optional_u32(&leg.order),
                origin: leg.origin,
                destination: leg.destination,
                orig_time_min: leg.orig_time_min,
                dest_time_min: leg.dest_time_min,
                line: leg.line,
                train_head_station: leg.train_head_station,
            })
            .collect(),
    }
}

fn convert_fare(dto: FareDto) -> Fare {
    Fare {
        amount: dto.amount,
        name: dto.name,
        class: dto.class,
    }
}

pub fn convert_fare_quote(root: FareRoot) -> FareQuote {
    FareQuote {
        origin: root.origin,
        destination: root.destination,
        fares: root.fares.fare.into_iter().map(convert_fare).collect(),
    }
}

pub fn convert_holidays(root: HolidayRoot) -> Vec<Holiday> {
    root.holidays
        .into_iter()
        .flat_map(|list| list.holiday)
        .map(|h| Holiday {
            name: h.name,
            date: h.date,
            schedule_type: h.schedule_type,
        })
        .collect()
}

/// Convert a route timetable. Stops without an origin time are skipped.
pub fn convert_route_schedule(root: RouteSchedRoot) -> RouteSchedule {
    let trains = root
        .route
        .train
        .into_iter()
        .map(|train| ScheduledTrain {
            train_id: train.train_id,
            stops: train
                .stop
                .into_iter()
                .filter_map(|stop| {
                    non_empty(stop.orig_time).map(|orig_time| ScheduledStop {
                        station: stop.station,
                        orig_time,
                    })
                })
                .collect(),
        })
        .collect();

    RouteSchedule {
        sched_num: root.sched_num,
        date: root.date,
        trains,
    }
}

pub fn convert_schedules(root: SchedulesRoot) -> Vec<ScheduleInfo> {
    root.schedules
        .schedule
        .into_iter()
        .map(|s| ScheduleInfo {
            id: s.id,
            effective_date: s.effective_date,
        })
        .collect()
}

pub fn convert_special(root: SpecialRoot) -> Vec<SpecialSchedule> {
    root.special_schedules
        .into_iter()
        .flat_map(|list| list.special_schedule)
        .map(|s| SpecialSchedule {
            start_date: s.start_date,
            end_date: s.end_date,
            text: s.text.into_inner(),
            link: s.link.into_inner(),
            routes_affected: s.routes_affected,
        })
        .collect()
}

pub fn convert_station_schedule(root: StnSchedRoot) -> StationSchedule {
    StationSchedule {
        name: root.station.name,
        abbr: root.station.abbr,
        sched_num: root.sched_num,
        date: root.date,
        items: root
            .station
            .item
            .into_iter()
            .map(|item| StationScheduleItem {
                train_id: item.train_id,
                line: item.line,
                head_station: item.train_head_station,
                orig_time: item.orig_time,
                dest_time: item.dest_time,
            })
            .collect(),
    }
}

pub fn convert_station_info(
    stations: Vec<StationDetailDto>,
) -> Result<StationInfo, ConversionError> {
    let station = stations
        .into_iter()
        .next()
        .ok_or(ConversionError::MissingField("stations.station"))?;

    Ok(StationInfo {
        name: station.name,
        abbr: station.abbr,
        address: station.address,
        city: station.city,
        state: station.state,
        zipcode: station.zipcode,
        link: station.link.into_inner(),
        north_routes: station.north_routes.into_iter().flat_map(|r| r.route).collect(),
        south_routes: station.south_routes.into_iter().flat_map(|r| r.route).collect(),
        platform_info: station.platform_info,
        intro: station.intro.into_inner(),
    })
}

pub fn convert_station_access(
    stations: Vec<StationAccessDto>,
) -> Result<StationAccess, ConversionError> {
    let station = stations
        .into_iter()
        .next()
        .ok_or(ConversionError::MissingField("stations.station"))?;

    Ok(StationAccess {
        parking: flag(&station.parking_flag),
        bike_racks: flag(&station.bike_flag),
        bike_station: flag(&station.bike_station_flag),
        lockers: flag(&station.locker_flag),
        name: station.name,
        abbr: station.abbr,
    })
}

pub fn convert_stations(stations: Vec<StationDto>) -> Vec<StationSummary> {
    stations
        .into_iter()
        .map(|s| StationSummary {
            name: s.name,
            abbr: s.abbr,
            address: s.address,
            city: s.city,
            state: s.state,
            zipcode: s.zipcode,
        })
        .collect()
}

pub fn convert_version(root: VersionRoot) -> VersionInfo {
    VersionInfo {
        api_version: root.api_version,
        copyright: root.copyright.into_inner(),
        license: root.license.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Platform};

    fn etd_root(json: &str) -> EtdRoot {
        serde_json::from_str(json).unwrap()
    }

    const TWO_GROUPS: &str = r##"{
        "date": "10/19/2026",
        "time": "09:10:01 AM PDT",
        "station": [{
            "name": "Richmond",
            "abbr": "RICH",
            "etd": [
                {
                    "destination": "Millbrae",
                    "abbreviation": "MLBR",
                    "estimate": [
                        {"minutes": "5", "platform": "2", "direction": "South", "length": "10", "color": "RED", "hexcolor": "#ff0000", "bikeflag": "1", "delay": "0"},
                        {"minutes": "20", "platform": "2", "direction": "South", "length": "8", "color": "RED", "hexcolor": "#ff0000", "bikeflag": "1", "delay": "0"}
                    ]
                },
                {
                    "destination": "Berryessa",
                    "abbreviation": "BERY",
                    "estimate": {"minutes": "Leaving", "platform": "1", "direction": "North", "length": "6", "color": "ORANGE", "hexcolor": "#ff9933", "bikeflag": "0", "delay": "120"}
                }
            ]
        }],
        "message": ""
    }"##;

    #[test]
    fn departures_without_filter() {
        let departures =
            convert_departures(etd_root(TWO_GROUPS), "RICH", EstimateFilter::default()).unwrap();

        assert_eq!(departures.stations.len(), 1);
        assert_eq!(departures.stations[0].destinations.len(), 2);
        assert_eq!(departures.estimate_count(), 3);
        assert_eq!(departures.warning, None);

        let berryessa = &departures.stations[0].destinations[1];
        assert_eq!(berryessa.estimates[0].minutes, Minutes::Leaving);
        assert_eq!(berryessa.estimates[0].delay, Some(120));
        assert!(!berryessa.estimates[0].bike_flag);
    }

    #[test]
    fn departures_filtered_by_platform() {
        let filter = EstimateFilter::new(Some(Platform::new(2).unwrap()), None);
        let departures = convert_departures(etd_root(TWO_GROUPS), "RICH", filter).unwrap();

        let groups = &departures.stations[0].destinations;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].destination, "Millbrae");
        assert!(groups[0].estimates.iter().all(|e| e.platform == "2"));
        assert_eq!(departures.estimate_count(), 2);
    }

    #[test]
    fn departures_filtered_by_direction() {
        let filter = EstimateFilter::new(None, Some(Direction::North));
        let departures = convert_departures(etd_root(TWO_GROUPS), "RICH", filter).unwrap();

        let groups = &departures.stations[0].destinations;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].abbreviation, "BERY");
    }

    #[test]
    fn departures_with_warning() {
        let root = etd_root(
            r#"{
                "date": "10/19/2026",
                "time": "09:10:01 AM PDT",
                "message": {"warning": "No data matched your criteria."}
            }"#,
        );
        let departures = convert_departures(root, "RICH", EstimateFilter::default()).unwrap();

        assert!(departures.stations.is_empty());
        assert_eq!(
            departures.warning.as_deref(),
            Some("No data matched your criteria.")
        );
    }

    #[test]
    fn invalid_minutes_is_an_error() {
        let root = etd_root(
            r#"{
                "date": "10/19/2026",
                "time": "09:10:01 AM PDT",
                "station": {"name": "Richmond", "abbr": "RICH", "etd": {
                    "destination": "Millbrae",
                    "estimate": {"minutes": "soon", "platform": "2", "direction": "South"}
                }}
            }"#,
        );
        let result = convert_departures(root, "RICH", EstimateFilter::default());
        assert_eq!(result, Err(ConversionError::InvalidMinutes("soon".into())));
    }

    #[test]
    fn train_count_must_be_numeric() {
        let root: CountRoot = serde_json::from_str(
            r#"{"date": "10/19/2026", "time": "09:10:01 AM PDT", "traincount": "many"}"#,
        )
        .unwrap();
        assert!(matches!(
            convert_train_count(root),
            Err(ConversionError::InvalidNumber { field: "traincount", .. })
        ));
    }

    #[test]
    fn trip_plan_reads_even_positions_only() {
        let root: TripRoot = serde_json::from_str(
            r#"{
                "origin": "ASHB",
                "destination": "CIVC",
                "schedule": {"request": {"trip": [
                    {"@origTimeMin": "8:05 AM", "@origTimeDate": "10/19/2026", "@destTimeMin": "8:25 AM", "@destTimeDate": "10/19/2026", "@fare": "4.35"},
                    {"@origTimeMin": "8:10 AM", "@destTimeMin": "8:30 AM", "@fare": "4.35"},
                    {"@origTimeMin": "8:20 AM", "@origTimeDate": "10/19/2026", "@destTimeMin": "8:40 AM", "@destTimeDate": "10/19/2026", "@fare": "4.35"}
                ]}}
            }"#,
        )
        .unwrap();

        let plan = convert_trip_plan(root);
        assert_eq!(plan.trips.len(), 2);
        assert_eq!(plan.trips[0].orig_time_min, "8:05 AM");
        assert_eq!(plan.trips[1].orig_time_min, "8:20 AM");
    }

    #[test]
    fn route_schedule_skips_untimed_stops() {
        let root: RouteSchedRoot = serde_json::from_str(
            r#"{
                "date": "10/19/2026",
                "sched_num": "78",
                "route": {"train": {"@trainId": "1", "stop": [
                    {"@station": "RICH", "@origTime": "5:15 AM"},
                    {"@station": "DELN"},
                    {"@station": "PLZA", "@origTime": ""},
                    {"@station": "NBRK", "@origTime": "5:21 AM"}
                ]}}
            }"#,
        )
        .unwrap();

        let schedule = convert_route_schedule(root);
        let stations: Vec<_> = schedule.trains[0]
            .stops
            .iter()
            .map(|s| s.station.as_str())
            .collect();
        assert_eq!(stations, vec!["RICH", "NBRK"]);
    }

    #[test]
    fn station_access_flags() {
        let dto: StationAccessDto = serde_json::from_str(
            r#"{"@parking_flag": "1", "@bike_flag": "1", "@bike_station_flag": "0", "@locker_flag": "0", "name": "12th St. Oakland City Center", "abbr": "12TH"}"#,
        )
        .unwrap();

        let access = convert_station_access(vec![dto]).unwrap();
        assert!(access.parking);
        assert!(access.bike_racks);
        assert!(!access.bike_station);
        assert!(!access.lockers);
    }

    #[test]
    fn missing_station_is_an_error() {
        assert_eq!(
            convert_station_info(Vec::new()),
            Err(ConversionError::MissingField("stations.station"))
        );
    }
}
