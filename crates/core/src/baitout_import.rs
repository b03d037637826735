//! Station-name resolution and free-text classification for the baitout
//! issue import.
//!
//! Field reports name stations like `Kea12` or `north face 3`; the line is
//! recovered by splitting the trailing digits off, generating name
//! candidates (casing, a ` line` suffix, and east/west variants), and
//! taking the first line whose station range contains the station number.
//! Issue text is classified with ordered regex pattern lists; the first
//! match wins.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::choices::{IssueType, StationType};
use crate::station::range_contains;
use crate::types::{Date, DbId};

/// Date format used in baitout files.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Fixed column positions in the pipe-delimited baitout file.
pub const COL_STATION_NAME: usize = 0;
pub const COL_PERSON: usize = 3;
pub const COL_DATE: usize = 4;
pub const COL_ISSUE_TEXT: usize = 6;

/// The subset of a line needed to resolve station names against.
#[derive(Debug, Clone)]
pub struct LineRef {
    pub id: DbId,
    pub name: String,
    pub start_station_id: String,
    pub end_station_id: String,
}

/// A parsed baitout row, before line resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBaitoutRow {
    pub station_name: String,
    pub person: String,
    pub date: Date,
    pub issue_text: String,
}

/// Parse one baitout data row. Returns a skip reason on failure.
pub fn parse_row(fields: &[&str]) -> Result<ParsedBaitoutRow, String> {
    if fields.len() < 2 {
        return Err(format!("row has {} columns, expected at least 2", fields.len()));
    }
    if fields.len() <= COL_ISSUE_TEXT {
        return Err(format!(
            "row has {} columns, expected at least {}",
            fields.len(),
            COL_ISSUE_TEXT + 1
        ));
    }

    let date_str = fields[COL_DATE].trim();
    let date = Date::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|_| format!("invalid date format: {date_str}"))?;

    Ok(ParsedBaitoutRow {
        station_name: fields[COL_STATION_NAME].trim().to_string(),
        person: fields[COL_PERSON].trim().to_string(),
        date,
        issue_text: fields[COL_ISSUE_TEXT].to_string(),
    })
}

static STATION_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)([0-9]+)$").expect("valid regex"));

/// Split a station name into its textual prefix and trailing number.
///
/// `"Kea12"` splits to `("Kea", 12)`; names without trailing digits return
/// `None`.
pub fn split_station_name(name: &str) -> Option<(String, i32)> {
    let caps = STATION_NAME_RE.captures(name)?;
    let base = caps.get(1)?.as_str().trim().to_string();
    let number = caps.get(2)?.as_str().trim().parse::<i32>().ok()?;
    Some((base, number))
}

/// Line-name candidates for a station prefix, in lookup order.
///
/// The base name, its lowercase form, and the base with a ` line` suffix are
/// each tried bare and with east/west directional suffixes.
pub fn candidate_names(base: &str) -> Vec<String> {
    let mut candidates = Vec::with_capacity(9);
    for name in [base.to_string(), base.to_lowercase(), format!("{base} line")] {
        for suffix in ["", " east", " west"] {
            candidates.push(format!("{name}{suffix}"));
        }
    }
    candidates
}

/// Resolve a station name to a line and station number.
///
/// Accepts the first candidate line whose station-id range contains the
/// parsed station number.
pub fn resolve_station<'a>(
    station_name: &str,
    lines_by_name: &'a HashMap<String, LineRef>,
) -> Option<(i32, &'a LineRef)> {
    let (base, number) = split_station_name(station_name)?;
    for candidate in candidate_names(&base) {
        if let Some(line) = lines_by_name.get(&candidate) {
            if range_contains(&line.start_station_id, &line.end_station_id, number) {
                return Some((number, line));
            }
        }
    }
    None
}

static STATION_TYPE_PATTERNS: LazyLock<Vec<(StationType, Regex)>> = LazyLock::new(|| {
    [
        (StationType::NovacoilBoxed, r"NC.+box|box.+NC|black tunnel"),
        (StationType::Novacoil, r"NC|staple|[nN]ovacoil"),
        (StationType::WoodenBox, r"box|screws"),
    ]
    .into_iter()
    .map(|(t, p)| (t, Regex::new(p).expect("valid regex")))
    .collect()
});

/// Classify issue text into a station type. First matching pattern wins.
pub fn match_station_type(issue_text: &str) -> StationType {
    for (station_type, pattern) in STATION_TYPE_PATTERNS.iter() {
        if pattern.is_match(issue_text) {
            return *station_type;
        }
    }
    StationType::Na
}

static ISSUE_TYPE_PATTERNS: LazyLock<Vec<(IssueType, Regex)>> = LazyLock::new(|| {
    [
        (IssueType::RopeOnDeadTree, r"rope.+(dead|rott|tree)"),
        (IssueType::NeedsRope, r"rope"),
        (IssueType::MissingStation, r"not found"),
        (IssueType::NeedsClearing, r"clear|mark|treefall|tree fall"),
        (IssueType::VeryRotten, r"rott"),
        (IssueType::RustingHoop, r"rust"),
        (IssueType::MissingHoop, r"hoop"),
        (IssueType::NeedsNewIcc, r"IC|lid"),
    ]
    .into_iter()
    .map(|(t, p)| (t, Regex::new(p).expect("valid regex")))
    .collect()
});

/// Classify issue text into an issue type. First matching pattern wins.
pub fn match_issue_type(issue_text: &str) -> IssueType {
    for (issue_type, pattern) in ISSUE_TYPE_PATTERNS.iter() {
        if pattern.is_match(issue_text) {
            return *issue_type;
        }
    }
    IssueType::Complicated
}
