//! Station identifiers and records.

use std::fmt;

use super::geo::{self, Coordinate};

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: &'static str,
}

impl InvalidId {
    pub(crate) fn new(kind: &'static str, reason: &'static str) -> Self {
        Self { kind, reason }
    }
}

/// Validate an identifier string shared by stations and railways.
pub(crate) fn check_id(kind: &'static str, s: &str) -> Result<(), InvalidId> {
    if s.is_empty() {
        return Err(InvalidId::new(kind, "must not be empty"));
    }
    if s.trim() != s {
        return Err(InvalidId::new(
            kind,
            "must not have leading or trailing whitespace",
        ));
    }
    Ok(())
}

/// A globally unique station identifier.
///
/// Identifiers are opaque strings (e.g. `GSG-001`). Ordering is
/// lexicographic and is used to break ties during route search.
///
/// # Examples
///
/// ```
/// use route_server::domain::StationId;
///
/// let id = StationId::parse("GSG-001").unwrap();
/// assert_eq!(id.as_str(), "GSG-001");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse(" GSG-001").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier.
    ///
    /// The input must be non-empty and carry no surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        check_id("station", s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point in the rail network.
///
/// Immutable once constructed; two stations with the same id are the same
/// station.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    /// Name in local script (e.g. `深圳北`).
    pub name_local: String,
    pub name_romaji: String,
    pub name_english: String,
    pub location: Coordinate,
    pub has_passenger_service: bool,
}

impl Station {
    /// Create a station with passenger service.
    pub fn new(
        id: StationId,
        name_local: impl Into<String>,
        name_romaji: impl Into<String>,
        name_english: impl Into<String>,
        location: Coordinate,
    ) -> Self {
        Self {
            id,
            name_local: name_local.into(),
            name_romaji: name_romaji.into(),
            name_english: name_english.into(),
            location,
            has_passenger_service: true,
        }
    }

    /// Set the passenger-service flag.
    pub fn with_passenger_service(mut self, has_passenger_service: bool) -> Self {
        self.has_passenger_service = has_passenger_service;
        self
    }

    /// Great-circle distance to another station in kilometres.
    pub fn straight_line_km(&self, other: &Station) -> f64 {
        geo::distance(self.location, other.location)
    }
}
