//! Station name normalisation.
//!
//! OSM names carry suffixes that the station table omits: `站` ("station")
//! and `线路所` ("line post", shortened to `所` in the table).

/// Normalise an OSM station name to the form used by the station table.
///
/// Replaces every `线路所` with `所`, then removes every `站`.
pub fn normalize_station_name(name: &str) -> String {
    name.replace("线路所", "所").replace('站', "")
}
