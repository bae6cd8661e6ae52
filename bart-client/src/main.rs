//! CLI entry point for the BART API client.
//!
//! One subcommand per API operation; results are printed with the
//! `report` rendering.

use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;

use bart_client::api::{BartClient, BartConfig, BartError, DEMO_API_KEY, MockTransport, Transport};
use bart_client::domain::{
    Direction, Platform, QueryDate, StationAbbr, TripQuery, parse_query_time,
};
use bart_client::report::Listing;
use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bart")]
#[command(about = "Query the BART real-time API", long_about = None)]
struct Cli {
    /// API key (falls back to the public demo key)
    #[arg(long, env = "BART_API_KEY", default_value = DEMO_API_KEY, hide_default_value = true)]
    key: String,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Serve responses from fixture files in this directory instead of the network
    #[arg(long, value_name = "DIR")]
    mock_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Date and schedule selection shared by schedule-based commands.
#[derive(Args)]
struct ScheduleArgs {
    /// Date as mm/dd/yyyy, yyyy-mm-dd, "today" or "now"
    #[arg(long)]
    date: Option<QueryDate>,

    /// Schedule number
    #[arg(long)]
    sched: Option<u32>,
}

/// Time and trip-count options for trip planning.
#[derive(Args)]
struct TripArgs {
    /// Time as h:mm am/pm or HH:MM
    #[arg(long, value_parser = parse_query_time)]
    time: Option<NaiveTime>,

    /// Date as mm/dd/yyyy, yyyy-mm-dd, "today" or "now"
    #[arg(long)]
    date: Option<QueryDate>,

    /// Trips before the requested time (0-4)
    #[arg(long)]
    before: Option<u8>,

    /// Trips after the requested time (0-4)
    #[arg(long)]
    after: Option<u8>,
}

impl TripArgs {
    fn to_query(&self) -> TripQuery {
        TripQuery {
            time: self.time,
            date: self.date,
            before: self.before,
            after: self.after,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Current service advisories
    Bsa {
        /// Station abbreviation
        #[arg(long)]
        orig: Option<StationAbbr>,
    },
    /// Number of trains currently active
    Count,
    /// Elevator status
    Elev,
    /// Real-time departure estimates
    Etd {
        /// Station abbreviation, or ALL
        orig: StationAbbr,

        /// Platform number (1-4); takes precedence over --direction
        #[arg(long)]
        platform: Option<Platform>,

        /// Direction: n or s
        #[arg(long)]
        direction: Option<Direction>,
    },
    /// Details of one route
    RouteInfo {
        route: u32,

        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// All routes
    Routes {
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Trips arriving around a time
    Arrive {
        orig: StationAbbr,
        dest: StationAbbr,

        #[command(flatten)]
        trip: TripArgs,
    },
    /// Trips departing around a time
    Depart {
        orig: StationAbbr,
        dest: StationAbbr,

        #[command(flatten)]
        trip: TripArgs,
    },
    /// Fares between two stations
    Fare {
        orig: StationAbbr,
        dest: StationAbbr,

        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Upcoming holidays
    Holiday,
    /// Timetable for a route
    RouteSched {
        route: u32,

        /// Time as h:mm am/pm or HH:MM
        #[arg(long, value_parser = parse_query_time)]
        time: Option<NaiveTime>,

        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Published schedules
    Scheds,
    /// Special schedule notices
    Special,
    /// Timetable for a station
    StnSched {
        orig: StationAbbr,

        /// Date as mm/dd/yyyy, yyyy-mm-dd, "today" or "now"
        #[arg(long)]
        date: Option<QueryDate>,
    },
    /// Station details
    StnInfo { orig: StationAbbr },
    /// Station access and facilities
    StnAccess { orig: StationAbbr },
    /// All stations
    Stns,
    /// API version
    Version,
    /// Help for every API category
    Help,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = BartConfig::new(&cli.key).with_timeout(cli.timeout);
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }

    let result = match &cli.mock_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "using mock responses");
            MockTransport::from_dir(dir)
                .map(|transport| BartClient::with_transport(config, transport))
                .and_then(|client| run(&client, cli.command))
        }
        None => BartClient::new(config).and_then(|client| run(&client, cli.command)),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn render(value: impl Display) -> String {
    value.to_string()
}

/// Run one command and render its result.
fn run<T: Transport>(client: &BartClient<T>, command: Commands) -> Result<String, BartError> {
    let output = match command {
        Commands::Bsa { orig } => render(client.bsa(orig.as_ref())?),
        Commands::Count => render(client.train_count()?),
        Commands::Elev => render(client.elev()?),
        Commands::Etd {
            orig,
            platform,
            direction,
        } => render(client.etd(&orig, platform, direction)?),
        Commands::RouteInfo { route, schedule } => {
            render(client.route_info(route, schedule.sched, schedule.date)?)
        }
        Commands::Routes { schedule } => {
            render(Listing(&client.routes(schedule.sched, schedule.date)?))
        }
        Commands::Arrive { orig, dest, trip } => {
            render(client.arrive(&orig, &dest, &trip.to_query())?)
        }
        Commands::Depart { orig, dest, trip } => {
            render(client.depart(&orig, &dest, &trip.to_query())?)
        }
        Commands::Fare {
            orig,
            dest,
            schedule,
        } => render(client.fare(&orig, &dest, schedule.date, schedule.sched)?),
        Commands::Holiday => render(Listing(&client.holiday()?)),
        Commands::RouteSched {
            route,
            time,
            schedule,
        } => render(client.routesched(route, schedule.date, time, schedule.sched)?),
        Commands::Scheds => render(Listing(&client.scheds()?)),
        Commands::Special => render(Listing(&client.special()?)),
        Commands::StnSched { orig, date } => render(client.stnsched(&orig, date)?),
        Commands::StnInfo { orig } => render(client.stninfo(&orig)?),
        Commands::StnAccess { orig } => render(client.stnaccess(&orig)?),
        Commands::Stns => render(Listing(&client.stns()?)),
        Commands::Version => render(client.version()?),
        Commands::Help => {
            let sections: Vec<String> = client.help()?.iter().map(ToString::to_string).collect();
            sections.join("\n\n")
        }
    };
    Ok(output)
}
