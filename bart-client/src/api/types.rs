//! BART API response DTOs.
//!
//! The API produces JSON by translating its XML documents, which leaves
//! several artifacts these types absorb:
//!
//! - XML attributes become `@`-prefixed keys (`@origTimeMin`)
//! - CDATA text becomes `{"#cdata-section": "..."}`
//! - a repeated element that happens to occur once becomes a bare object
//!   instead of a one-element array, and an empty one becomes `""`
//! - numbers are usually, but not always, sent as strings
//!
//! Every payload sits under a top-level `root` key.

use serde::{Deserialize, Deserializer};

/// Top-level wrapper around every response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub root: T,
}

/// Text that may arrive CDATA-wrapped or as a plain string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "CdataShape")]
pub struct Cdata(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum CdataShape {
    Wrapped {
        #[serde(rename = "#cdata-section", default)]
        text: String,
    },
    Plain(String),
}

impl From<CdataShape> for Cdata {
    fn from(shape: CdataShape) -> Self {
        match shape {
            CdataShape::Wrapped { text } | CdataShape::Plain(text) => Cdata(text),
        }
    }
}

impl Cdata {
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// The empty string the API sends for an element with no children.
struct Blank;

impl<'de> Deserialize<'de> for Blank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            Ok(Blank)
        } else {
            Err(serde::de::Error::custom("expected an empty string"))
        }
    }
}

// `Blank` is tried before `One` so that `""` is not taken as a single
// string item.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListShape<T> {
    Many(Vec<T>),
    Blank(Blank),
    One(T),
    Null,
}

/// Deserialize a repeated element that may be an array, a single object,
/// an empty string or null.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match ListShape::deserialize(deserializer)? {
        ListShape::Many(items) => items,
        ListShape::One(item) => vec![item],
        ListShape::Blank(Blank) | ListShape::Null => Vec::new(),
    })
}

/// Deserialize a scalar (string, number, bool or null) as a string.
pub fn scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {other}"
        ))),
    }
}

/// The `message` element: empty, or carrying help text, a warning or an
/// error description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "MessageShape")]
pub struct Message(pub MessageBody);

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub help: Option<Cdata>,
    #[serde(default)]
    pub warning: Option<Cdata>,
    #[serde(default)]
    pub error: Option<ApiErrorDto>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MessageShape {
    Body(MessageBody),
    Blank(String),
    Null,
}

impl From<MessageShape> for Message {
    fn from(shape: MessageShape) -> Self {
        match shape {
            MessageShape::Body(body) => Message(body),
            MessageShape::Blank(_) | MessageShape::Null => Message::default(),
        }
    }
}

/// Error description inside `root.message.error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorDto {
    #[serde(default)]
    pub text: Cdata,
    #[serde(default)]
    pub details: Cdata,
}

/// Root of any response, read only for its `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRoot {
    #[serde(default)]
    pub message: Message,
}

/// Response root for `bsa` and `elev`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoriesRoot {
    pub date: String,
    pub time: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub bsa: Vec<BsaDto>,
}

/// A single announcement.
#[derive(Debug, Clone, Deserialize)]
pub struct BsaDto {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub station: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Cdata,
    #[serde(default)]
    pub sms_text: Option<Cdata>,
    #[serde(default)]
    pub posted: Option<String>,
    #[serde(default)]
    pub expires: Option<String>,
}

/// Response root for `count`.
#[derive(Debug, Clone, Deserialize)]
pub struct CountRoot {
    pub date: String,
    pub time: String,
    #[serde(deserialize_with = "scalar")]
    pub traincount: String,
}

/// Response root for `etd`.
#[derive(Debug, Clone, Deserialize)]
pub struct EtdRoot {
    pub date: String,
    pub time: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub station: Vec<EtdStationDto>,
    #[serde(default)]
    pub message: Message,
}

/// Departures from one station.
#[derive(Debug, Clone, Deserialize)]
pub struct EtdStationDto {
    pub name: String,
    pub abbr: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub etd: Vec<EtdDto>,
}

/// Departures towards one destination.
#[derive(Debug, Clone, Deserialize)]
pub struct EtdDto {
    pub destination: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub estimate: Vec<EstimateDto>,
}

/// A single departure estimate.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateDto {
    #[serde(deserialize_with = "scalar")]
    pub minutes: String,
    #[serde(deserialize_with = "scalar")]
    pub platform: String,
    pub direction: String,
    #[serde(default, deserialize_with = "scalar")]
    pub length: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub hexcolor: String,
    #[serde(default, deserialize_with = "scalar")]
    pub bikeflag: String,
    #[serde(default, deserialize_with = "scalar")]
    pub delay: String,
}

/// Response root for `routeinfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteInfoRoot {
    pub routes: RouteDetailList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteDetailList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub route: Vec<RouteDetailDto>,
}

/// Full route description.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDetailDto {
    pub name: String,
    #[serde(default)]
    pub abbr: String,
    #[serde(rename = "routeID")]
    pub route_id: String,
    #[serde(default, deserialize_with = "scalar")]
    pub number: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub hexcolor: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub config: Vec<RouteConfigDto>,
}

/// Stations served by a route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfigDto {
    #[serde(default, deserialize_with = "one_or_many")]
    pub station: Vec<String>,
}

/// Response root for `routes`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesRoot {
    pub routes: RouteList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub route: Vec<RouteDto>,
}

/// Route list entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub name: String,
    #[serde(default)]
    pub abbr: String,
    #[serde(rename = "routeID")]
    pub route_id: String,
    #[serde(default, deserialize_with = "scalar")]
    pub number: String,
    #[serde(default)]
    pub color: String,
}

/// Response root for `arrive` and `depart`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRoot {
    pub origin: String,
    pub destination: String,
    pub schedule: TripSchedule,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripSchedule {
    pub request: TripRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripRequest {
    #[serde(default, deserialize_with = "one_or_many")]
    pub trip: Vec<TripEntryDto>,
}

/// An element of the `trip` sequence: a trip, or the leg data that
/// follows it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TripEntryDto {
    Trip(Box<TripDto>),
    Other(serde_json::Value),
}

/// A planned trip.
#[derive(Debug, Clone, Deserialize)]
pub struct TripDto {
    #[serde(rename = "@origTimeMin")]
    pub orig_time_min: String,
    #[serde(rename = "@origTimeDate", default)]
    pub orig_time_date: String,
    #[serde(rename = "@destTimeMin")]
    pub dest_time_min: String,
    #[serde(rename = "@destTimeDate", default)]
    pub dest_time_date: String,
    #[serde(rename = "@fare", default, deserialize_with = "scalar")]
    pub fare: String,
    #[serde(default)]
    pub fares: FaresDto,
    #[serde(default, deserialize_with = "one_or_many")]
    pub leg: Vec<LegDto>,
}

/// A leg of a trip.
#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    #[serde(rename = "@order", default, deserialize_with = "scalar")]
    pub order: String,
    #[serde(rename = "@origin", default)]
    pub origin: String,
    #[serde(rename = "@destination", default)]
    pub destination: String,
    #[serde(rename = "@origTimeMin", default)]
    pub orig_time_min: String,
    #[serde(rename = "@destTimeMin", default)]
    pub dest_time_min: String,
    #[serde(rename = "@line", default)]
    pub line: String,
    #[serde(rename = "@trainHeadStation", default)]
    pub train_head_station: String,
}

/// Fare list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaresDto {
    #[serde(default, deserialize_with = "one_or_many")]
    pub fare: Vec<FareDto>,
}

/// One fare class.
#[derive(Debug, Clone, Deserialize)]
pub struct FareDto {
    #[serde(rename = "@amount", deserialize_with = "scalar")]
    pub amount: String,
    #[serde(rename = "@class", default)]
    pub class: String,
    #[serde(rename = "@name", default)]
    pub name: String,
}

/// Response root for `fare`.
#[derive(Debug, Clone, Deserialize)]
pub struct FareRoot {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub fares: FaresDto,
}

/// Response root for `holiday`.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayRoot {
    #[serde(default, deserialize_with = "one_or_many")]
    pub holidays: Vec<HolidayList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub holiday: Vec<HolidayDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayDto {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub schedule_type: String,
}

/// Response root for `routesched`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSchedRoot {
    pub date: String,
    #[serde(default, deserialize_with = "scalar")]
    pub sched_num: String,
    pub route: RouteSchedTrains,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteSchedTrains {
    #[serde(default, deserialize_with = "one_or_many")]
    pub train: Vec<TrainDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainDto {
    #[serde(rename = "@trainId", deserialize_with = "scalar")]
    pub train_id: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub stop: Vec<StopDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    #[serde(rename = "@station")]
    pub station: String,
    #[serde(rename = "@origTime", default)]
    pub orig_time: Option<String>,
}

/// Response root for `scheds`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulesRoot {
    pub schedules: ScheduleList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub schedule: Vec<ScheduleDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDto {
    #[serde(rename = "@id", deserialize_with = "scalar")]
    pub id: String,
    #[serde(rename = "@effectivedate")]
    pub effective_date: String,
}

/// Response root for `special`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialRoot {
    #[serde(default, deserialize_with = "one_or_many")]
    pub special_schedules: Vec<SpecialList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecialList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub special_schedule: Vec<SpecialDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecialDto {
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub text: Cdata,
    #[serde(default)]
    pub link: Cdata,
    #[serde(default)]
    pub routes_affected: String,
}

/// Response root for `stnsched`.
#[derive(Debug, Clone, Deserialize)]
pub struct StnSchedRoot {
    pub date: String,
    #[serde(default, deserialize_with = "scalar")]
    pub sched_num: String,
    pub station: StnSchedStation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StnSchedStation {
    pub name: String,
    #[serde(default)]
    pub abbr: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub item: Vec<StnSchedItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StnSchedItemDto {
    #[serde(rename = "@line", default)]
    pub line: String,
    #[serde(rename = "@trainHeadStation", default)]
    pub train_head_station: String,
    #[serde(rename = "@origTime", default)]
    pub orig_time: String,
    #[serde(rename = "@destTime", default)]
    pub dest_time: String,
    #[serde(rename = "@trainId", default, deserialize_with = "scalar")]
    pub train_id: String,
}

/// Response root for `stninfo`, `stnaccess` and `stns`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsRoot<S> {
    pub stations: StationList<S>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct StationList<S> {
    #[serde(default, deserialize_with = "one_or_many")]
    pub station: Vec<S>,
}

/// Station entry in `stns`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub name: String,
    pub abbr: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "scalar")]
    pub zipcode: String,
}

/// Station entry in `stninfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDetailDto {
    pub name: String,
    pub abbr: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "scalar")]
    pub zipcode: String,
    #[serde(default)]
    pub link: Cdata,
    #[serde(default, deserialize_with = "one_or_many")]
    pub north_routes: Vec<RouteRefs>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub south_routes: Vec<RouteRefs>,
    #[serde(default)]
    pub platform_info: String,
    #[serde(default)]
    pub intro: Cdata,
}

/// Routes serving one side of a station.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRefs {
    #[serde(default, deserialize_with = "one_or_many")]
    pub route: Vec<String>,
}

/// Station entry in `stnaccess`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationAccessDto {
    pub name: String,
    #[serde(default)]
    pub abbr: String,
    #[serde(rename = "@parking_flag", default, deserialize_with = "scalar")]
    pub parking_flag: String,
    #[serde(rename = "@bike_flag", default, deserialize_with = "scalar")]
    pub bike_flag: String,
    #[serde(rename = "@bike_station_flag", default, deserialize_with = "scalar")]
    pub bike_station_flag: String,
    #[serde(rename = "@locker_flag", default, deserialize_with = "scalar")]
    pub locker_flag: String,
}

/// Response root for `ver`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRoot {
    pub api_version: String,
    #[serde(default)]
    pub copyright: Cdata,
    #[serde(default)]
    pub license: Cdata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "one_or_many")]
        items: Vec<String>,
    }

    #[test]
    fn cdata_accepts_wrapped_and_plain() {
        let wrapped: Cdata = serde_json::from_str(r##"{"#cdata-section": "hello"}"##).unwrap();
        assert_eq!(wrapped.0, "hello");

        let plain: Cdata = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(plain.0, "hello");
    }

    #[test]
    fn one_or_many_shapes() {
        let many: Holder = serde_json::from_str(r#"{"items": ["a", "b"]}"#).unwrap();
        assert_eq!(many.items, vec!["a", "b"]);

        let one: Holder = serde_json::from_str(r#"{"items": "a"}"#).unwrap();
        assert_eq!(one.items, vec!["a"]);

        let missing: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(missing.items.is_empty());

        let null: Holder = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(null.items.is_empty());
    }

    #[test]
    fn one_or_many_blank_string_list() {
        let blank: Holder = serde_json::from_str(r#"{"items": ""}"#).unwrap();
        assert!(blank.items.is_empty());

        let refs: RouteRefs = serde_json::from_str(r#"{"route": ""}"#).unwrap();
        assert!(refs.route.is_empty());

        let config: RouteConfigDto = serde_json::from_str(r#"{"station": " "}"#).unwrap();
        assert!(config.station.is_empty());

        let one: RouteRefs = serde_json::from_str(r#"{"route": "ROUTE 1"}"#).unwrap();
        assert_eq!(one.route, vec!["ROUTE 1"]);
    }

    #[test]
    fn station_list_decodes_each_station_shape() {
        let stns: StationsRoot<StationDto> = serde_json::from_str(
            r#"{"stations": {"station": {"name": "Ashby", "abbr": "ASHB"}}}"#,
        )
        .unwrap();
        assert_eq!(stns.stations.station.len(), 1);

        let access: StationsRoot<StationAccessDto> = serde_json::from_str(
            r#"{"stations": {"station": [{"name": "Ashby", "@parking_flag": "1"}]}}"#,
        )
        .unwrap();
        assert_eq!(access.stations.station[0].parking_flag, "1");

        let empty: StationsRoot<StationDetailDto> =
            serde_json::from_str(r#"{"stations": {"station": ""}}"#).unwrap();
        assert!(empty.stations.station.is_empty());
    }

    #[test]
    fn one_or_many_blank_object_list() {
        let root: SpecialRoot = serde_json::from_str(r#"{"special_schedules": ""}"#).unwrap();
        assert!(root.special_schedules.is_empty());
    }

    #[test]
    fn message_shapes() {
        let blank: MessageRoot = serde_json::from_str(r#"{"message": ""}"#).unwrap();
        assert_eq!(blank.message, Message::default());

        let warning: MessageRoot =
            serde_json::from_str(r#"{"message": {"warning": "No data matched your criteria."}}"#)
                .unwrap();
        assert_eq!(
            warning.message.0.warning,
            Some(Cdata("No data matched your criteria.".to_string()))
        );

        let help: MessageRoot = serde_json::from_str(
            r##"{"message": {"help": {"#cdata-section": "etd: real time estimates"}}}"##,
        )
        .unwrap();
        assert_eq!(
            help.message.0.help.map(Cdata::into_inner).as_deref(),
            Some("etd: real time estimates")
        );
    }

    #[test]
    fn scalar_accepts_numbers() {
        let count: CountRoot =
            serde_json::from_str(r#"{"date": "10/19/2026", "time": "09:10:00 AM PDT", "traincount": 48}"#)
                .unwrap();
        assert_eq!(count.traincount, "48");
    }

    #[test]
    fn deserialize_estimate() {
        let json = r##"{
            "minutes": "Leaving",
            "platform": "2",
            "direction": "South",
            "length": "10",
            "color": "RED",
            "hexcolor": "#ff0000",
            "bikeflag": "1",
            "delay": "0"
        }"##;

        let estimate: EstimateDto = serde_json::from_str(json).unwrap();
        assert_eq!(estimate.minutes, "Leaving");
        assert_eq!(estimate.platform, "2");
        assert_eq!(estimate.direction, "South");
        assert_eq!(estimate.hexcolor, "#ff0000");
    }

    #[test]
    fn trip_entries_split_into_trips_and_others() {
        let json = r#"{"trip": [
            {"@origTimeMin": "8:05 AM", "@destTimeMin": "8:40 AM", "@fare": "4.35"},
            {"leg": [{"@order": "1"}]}
        ]}"#;

        let request: TripRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.trip.len(), 2);
        assert!(matches!(request.trip[0], TripEntryDto::Trip(_)));
        assert!(matches!(request.trip[1], TripEntryDto::Other(_)));
    }

    #[test]
    fn missing_required_field_fails() {
        let result: Result<StationDto, _> = serde_json::from_str(r#"{"name": "Richmond"}"#);
        assert!(result.is_err());
    }
}
