//! Service advisories, elevator status and train counts.

/// A single service announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub id: Option<String>,
    /// Affected station, empty for system-wide announcements.
    pub station: String,
    /// Announcement type, e.g. "DELAY" or "EMERGENCY".
    pub kind: Option<String>,
    pub description: String,
    /// Short form of the description sent by SMS, if any.
    pub sms_text: Option<String>,
    pub posted: Option<String>,
    pub expires: Option<String>,
}

impl Advisory {
    /// Whether this announcement is tied to a particular station.
    pub fn has_station(&self) -> bool {
        !self.station.trim().is_empty()
    }
}

/// Announcements available at a point in time (`bsa` and `elev`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisories {
    pub date: String,
    pub time: String,
    pub announcements: Vec<Advisory>,
}

/// Number of trains currently active in the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainCount {
    pub date: String,
    pub time: String,
    pub count: u32,
}
