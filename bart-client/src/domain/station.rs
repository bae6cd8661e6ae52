//! Station codes and station information results.

use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// A BART station abbreviation such as `RICH`, `12TH` or `ALL`.
///
/// Abbreviations are 3 or 4 ASCII letters or digits. Input is normalized to
/// upper case, so `12th` and `12TH` are the same station.
///
/// # Examples
///
/// ```
/// use bart_client::domain::StationAbbr;
///
/// let rich = StationAbbr::parse("rich").unwrap();
/// assert_eq!(rich.as_str(), "RICH");
///
/// assert!(StationAbbr::parse("AB").is_err());
/// assert!(StationAbbr::parse("ASHBY").is_err());
/// assert!(StationAbbr::parse("A-B").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationAbbr {
    bytes: [u8; 4],
    len: u8,
}

impl StationAbbr {
    /// Pseudo-station requesting estimates for every station.
    pub const ALL: StationAbbr = StationAbbr {
        bytes: *b"ALL\0",
        len: 3,
    };

    /// Parse a station abbreviation, normalizing to upper case.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = |reason| DomainError::InvalidStation {
            value: s.to_string(),
            reason,
        };

        let raw = s.trim().as_bytes();
        if !(3..=4).contains(&raw.len()) {
            return Err(invalid("must be 3 or 4 characters"));
        }

        let mut bytes = [0u8; 4];
        for (slot, &b) in bytes.iter_mut().zip(raw) {
            if !b.is_ascii_alphanumeric() {
                return Err(invalid("must be ASCII letters or digits"));
            }
            *slot = b.to_ascii_uppercase();
        }

        Ok(Self {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Returns the abbreviation as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    /// Whether this is the `ALL` pseudo-station.
    pub fn is_all(&self) -> bool {
        *self == Self::ALL
    }
}

impl FromStr for StationAbbr {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for StationAbbr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationAbbr({})", self.as_str())
    }
}

impl fmt::Display for StationAbbr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detailed information about one station (`stninfo`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationInfo {
    pub name: String,
    pub abbr: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    /// Station page on bart.gov.
    pub link: String,
    pub north_routes: Vec<String>,
    pub south_routes: Vec<String>,
    pub platform_info: String,
    pub intro: String,
}

/// Access facilities at a station (`stnaccess`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationAccess {
    pub name: String,
    pub abbr: String,
    pub parking: bool,
    pub bike_racks: bool,
    pub bike_station: bool,
    pub lockers: bool,
}

/// One entry of the station list (`stns`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSummary {
    pub name: String,
    pub abbr: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_abbreviations() {
        assert!(StationAbbr::parse("RICH").is_ok());
        assert!(StationAbbr::parse("12TH").is_ok());
        assert!(StationAbbr::parse("ALL").is_ok());
        assert!(StationAbbr::parse("19TH").is_ok());
    }

    #[test]
    fn lowercase_is_normalized() {
        let abbr = StationAbbr::parse("12th").unwrap();
        assert_eq!(abbr.as_str(), "12TH");
        assert_eq!(abbr, StationAbbr::parse("12TH").unwrap());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(StationAbbr::parse("").is_err());
        assert!(StationAbbr::parse("AB").is_err());
        assert!(StationAbbr::parse("ASHBY").is_err());
    }

    #[test]
    fn reject_non_alphanumeric() {
        assert!(StationAbbr::parse("A-B").is_err());
        assert!(StationAbbr::parse("A B").is_err());
        assert!(StationAbbr::parse("RÏCH").is_err());
    }

    #[test]
    fn all_constant_matches_parsed() {
        assert_eq!(StationAbbr::parse("all").unwrap(), StationAbbr::ALL);
        assert!(StationAbbr::ALL.is_all());
        assert_eq!(StationAbbr::ALL.as_str(), "ALL");
    }

    #[test]
    fn display_and_from_str() {
        let abbr: StationAbbr = "ashb".parse().unwrap();
        assert_eq!(abbr.to_string(), "ASHB");
        assert_eq!(format!("{abbr:?}"), "StationAbbr(ASHB)");
    }
}
