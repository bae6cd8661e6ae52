//! Human-readable rendering of API results.
//!
//! Every result type implements `Display` with the sentences printed by
//! the `bart` binary. Multi-line results end without a trailing newline.

use std::fmt;

use crate::domain::{
    Advisories, Advisory, Departures, Estimate, FareQuote, HelpMessage, Holiday, Minutes,
    RouteInfo, RouteSchedule, RouteSummary, ScheduleInfo, SpecialSchedule, StationAccess,
    StationInfo, StationSchedule, StationSummary, TrainCount, Trip, TripPlan, VersionInfo,
};

/// Renders a slice of results one per line.
pub struct Listing<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for Listing<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_station() {
            write!(f, "{}: {}", self.station, self.description)?;
        } else {
            f.write_str(&self.description)?;
        }
        if let Some(sms) = &self.sms_text {
            write!(f, "\nSMS text announcement: {sms}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Advisories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The following announcements were available on {} at {}...",
            self.date, self.time
        )?;
        for announcement in &self.announcements {
            write!(f, "\n{announcement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TrainCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} trains active on {} at {}.",
            self.count, self.date, self.time
        )
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minutes {
            Minutes::Leaving => write!(
                f,
                "{} train on platform {} is leaving now!",
                self.color, self.platform
            ),
            Minutes::In(minutes) => write!(
                f,
                "{} train on platform {} leaving in {} minutes!",
                self.color, self.platform, minutes
            ),
        }
    }
}

impl fmt::Display for Departures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Estimated departure time(s) for {} on {} {}...",
            self.origin, self.date, self.time
        )?;
        if let Some(warning) = &self.warning {
            write!(f, "\n{warning}")?;
        }
        for station in &self.stations {
            write!(f, "\nDepartures for {}...", station.name)?;
            for group in &station.destinations {
                write!(f, "\nFor those leaving to {}:", group.destination)?;
                for estimate in &group.estimates {
                    write!(f, "\n{estimate}")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for RouteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is {}, going from {} to {}.",
            self.route_id, self.name, self.origin, self.destination
        )?;
        if !self.stations.is_empty() {
            write!(f, "\nStations: {}", self.stations.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} with abbreviation \"{}\"",
            self.route_id, self.name, self.abbr
        )
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trip leaving at {} and arriving at {} on {} with the following fares...",
            self.orig_time_min,
            self.dest_time_min,
            self.orig_time_date.trim()
        )?;
        write!(f, "\nStandard: {}", self.fare)?;
        for fare in &self.fares {
            write!(f, "\n{}: {} ({})", fare.name, fare.amount, fare.class)?;
        }
        Ok(())
    }
}

impl fmt::Display for TripPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trips from {} to {}...", self.origin, self.destination)?;
        for trip in &self.trips {
            write!(f, "\n{trip}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FareQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A trip from {} to {} has the following fare...",
            self.origin, self.destination
        )?;
        for fare in &self.fares {
            write!(f, "\n{} for {} ({})", fare.amount, fare.name, fare.class)?;
        }
        Ok(())
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {} has a {} schedule type.",
            self.name, self.date, self.schedule_type
        )
    }
}

impl fmt::Display for RouteSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "For schedule number {} on {}...",
            self.sched_num, self.date
        )?;
        for train in &self.trains {
            let stops: Vec<String> = train
                .stops
                .iter()
                .map(|stop| format!("{} at {}", stop.station, stop.orig_time))
                .collect();
            write!(
                f,
                "\nTrain with ID {} has the following stops: {}",
                train.train_id,
                stops.join(", ")
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ScheduleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Schedule {} has effective date {}",
            self.id, self.effective_date
        )
    }
}

impl fmt::Display for SpecialSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From {} to {}: {}", self.start_date, self.end_date, self.text)?;
        write!(
            f,
            "\nThe routes affected are {}, more information here: {}",
            self.routes_affected, self.link
        )
    }
}

impl fmt::Display for StationSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} schedule ({}) details on {}...",
            self.name, self.sched_num, self.date
        )?;
        for item in &self.items {
            write!(
                f,
                "\nTrain {} with {}, (Head Station {}): from {} to {}.",
                item.train_id, item.line, item.head_station, item.orig_time, item.dest_time
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for StationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is at {}, {}, {} {} and can be found at {}.",
            self.name, self.address, self.city, self.state, self.zipcode, self.link
        )
    }
}

impl fmt::Display for StationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (\"{}\") is at {}, {}, {} {}.",
            self.name, self.abbr, self.address, self.city, self.state, self.zipcode
        )
    }
}

impl fmt::Display for StationAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        writeln!(f, "Parking: {}", yes_no(self.parking))?;
        writeln!(f, "Bike Racks: {}", yes_no(self.bike_racks))?;
        writeln!(f, "Bike Station: {}", yes_no(self.bike_station))?;
        write!(f, "Lockers: {}", yes_no(self.lockers))
    }
}

impl fmt::Display for HelpMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operations: Vec<String> = self.operations.iter().map(|op| format!("{op}()")).collect();
        write!(f, "{}\n{}", self.text.trim_end(), operations.join(", "))
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Version: {}\nCopyright: {}\nLicense: {}",
            self.api_version, self.copyright, self.license
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DestinationGroup, Fare, HelpTopic, StationDepartures};

    fn estimate(minutes: Minutes, platform: &str) -> Estimate {
        Estimate {
            minutes,
            platform: platform.to_string(),
            direction: "South".to_string(),
            color: "RED".to_string(),
            hex_color: "#ff0000".to_string(),
            length: Some(10),
            bike_flag: true,
            delay: None,
        }
    }

    fn summary(name: &str, abbr: &str) -> StationSummary {
        StationSummary {
            name: name.to_string(),
            abbr: abbr.to_string(),
            address: "2000 Mission Street".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            zipcode: "94110".to_string(),
        }
    }

    #[test]
    fn train_count_sentence() {
        let count = TrainCount {
            date: "10/19/2026".to_string(),
            time: "09:10:01 AM PDT".to_string(),
            count: 48,
        };
        assert_eq!(
            count.to_string(),
            "48 trains active on 10/19/2026 at 09:10:01 AM PDT."
        );
    }

    #[test]
    fn estimate_sentences() {
        assert_eq!(
            estimate(Minutes::In(5), "2").to_string(),
            "RED train on platform 2 leaving in 5 minutes!"
        );
        assert_eq!(
            estimate(Minutes::Leaving, "1").to_string(),
            "RED train on platform 1 is leaving now!"
        );
    }

    #[test]
    fn departures_layout() {
        let departures = Departures {
            origin: "RICH".to_string(),
            date: "10/19/2026".to_string(),
            time: "09:10:01 AM PDT".to_string(),
            stations: vec![StationDepartures {
                name: "Richmond".to_string(),
                abbr: "RICH".to_string(),
                destinations: vec![DestinationGroup {
                    destination: "Millbrae".to_string(),
                    abbreviation: "MLBR".to_string(),
                    estimates: vec![estimate(Minutes::In(20), "2")],
                }],
            }],
            warning: None,
        };

        let lines: Vec<String> = departures.to_string().lines().map(String::from).collect();
        assert_eq!(
            lines,
            vec![
                "Estimated departure time(s) for RICH on 10/19/2026 09:10:01 AM PDT...",
                "Departures for Richmond...",
                "For those leaving to Millbrae:",
                "RED train on platform 2 leaving in 20 minutes!",
            ]
        );
    }

    #[test]
    fn station_listing() {
        let stations = vec![summary("16th St. Mission", "16TH"), summary("24th St. Mission", "24TH")];
        let rendered = Listing(&stations).to_string();

        assert_eq!(rendered.lines().count(), 2);
        assert_eq!(
            rendered.lines().next(),
            Some("16th St. Mission (\"16TH\") is at 2000 Mission Street, San Francisco, CA 94110.")
        );
    }

    #[test]
    fn empty_listing_renders_nothing() {
        let empty: Vec<Holiday> = Vec::new();
        assert_eq!(Listing(&empty).to_string(), "");
    }

    #[test]
    fn route_sentence() {
        let route = RouteInfo {
            route_id: "ROUTE 1".to_string(),
            name: "Antioch to SFIA/Millbrae".to_string(),
            abbr: "ANTC-SFIA".to_string(),
            number: Some(1),
            origin: "ANTC".to_string(),
            destination: "MLBR".to_string(),
            color: "YELLOW".to_string(),
            hex_color: "#ffff33".to_string(),
            stations: Vec::new(),
        };
        assert_eq!(
            route.to_string(),
            "ROUTE 1 is Antioch to SFIA/Millbrae, going from ANTC to MLBR."
        );
    }

    #[test]
    fn fare_quote_lines() {
        let quote = FareQuote {
            origin: "ASHB".to_string(),
            destination: "CIVC".to_string(),
            fares: vec![Fare {
                amount: "4.35".to_string(),
                name: "Clipper".to_string(),
                class: "clipper".to_string(),
            }],
        };
        assert_eq!(
            quote.to_string(),
            "A trip from ASHB to CIVC has the following fare...\n4.35 for Clipper (clipper)"
        );
    }

    #[test]
    fn station_access_flags() {
        let access = StationAccess {
            name: "12th St. Oakland City Center".to_string(),
            abbr: "12TH".to_string(),
            parking: false,
            bike_racks: true,
            bike_station: true,
            lockers: false,
        };
        let rendered = access.to_string();
        assert!(rendered.starts_with("12th St. Oakland City Center:\n"));
        assert!(rendered.contains("Parking: no"));
        assert!(rendered.contains("Bike Racks: yes"));
        assert!(rendered.ends_with("Lockers: no"));
    }

    #[test]
    fn help_lists_operations() {
        let help = HelpMessage {
            topic: HelpTopic::Estimates,
            text: "etd: Requests current departure information.\n".to_string(),
            operations: HelpTopic::Estimates.operations(),
        };
        assert_eq!(
            help.to_string(),
            "etd: Requests current departure information.\netd(), etd_help()"
        );
    }

    #[test]
    fn version_block() {
        let version = VersionInfo {
            api_version: "3.10".to_string(),
            copyright: "Copyright 2026 Bay Area Rapid Transit District".to_string(),
            license: "http://www.bart.gov/schedules/developers/developer-license-agreement"
                .to_string(),
        };
        assert_eq!(
            version.to_string(),
            "Version: 3.10\nCopyright: Copyright 2026 Bay Area Rapid Transit District\n\
             License: http://www.bart.gov/schedules/developers/developer-license-agreement"
        );
    }
}
