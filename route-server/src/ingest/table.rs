//! Station table scraping.
//!
//! The station table is an HTML page listing, per row, the line name, the
//! station name, two columns we ignore, and the station code. Further
//! columns hold flags; a station that is only a junction between lines is
//! marked with [`CONNECTION_MARKER`].

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

/// Column value marking a station without passenger service.
pub const CONNECTION_MARKER: &str = "连接";

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*/?\s*(tr|td|th)\b[^>]*>|<[^>]+>").expect("tag pattern is valid")
});

/// One row of the station table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStation {
    /// Station code, used as the station id.
    pub code: String,
    /// Station name as written in the table.
    pub name: String,
    pub has_passenger_service: bool,
}

/// Flatten table markup into one `|`-separated line per row.
///
/// Row tags become line breaks, cell tags become `|`, and any other tag
/// becomes a space.
pub fn flatten_table(html: &str) -> Vec<String> {
    let flat = TAG.replace_all(html, |caps: &Captures| match caps.get(1) {
        Some(tag) if tag.as_str().eq_ignore_ascii_case("tr") => "\n",
        Some(_) => "|",
        None => " ",
    });

    flat.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the stations listed for `line_name`.
///
/// Rows with fewer than five non-empty columns, a different line name, or
/// an empty station name or code are skipped.
pub fn parse_station_table(html: &str, line_name: &str) -> Vec<TableStation> {
    let stations: Vec<TableStation> = flatten_table(html)
        .iter()
        .filter(|line| line.contains(line_name))
        .filter_map(|line| parse_row(line, line_name))
        .collect();

    debug!(line = line_name, stations = stations.len(), "parsed station table");
    stations
}

fn parse_row(line: &str, line_name: &str) -> Option<TableStation> {
    let cols: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    let [row_line, name, _, _, code, ..] = cols.as_slice() else {
        return None;
    };
    if *row_line != line_name {
        return None;
    }

    Some(TableStation {
        code: code.to_string(),
        name: name.to_string(),
        has_passenger_service: !cols.contains(&CONNECTION_MARKER),
    })
}
