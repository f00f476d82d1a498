//! Display formatting for event dates and times

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use volunteer_api::Event;

/// `2025-03-08` → `Mar 8, 2025`. Input that is not a date comes back as is.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw.trim()) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// `14:30` or `14:30:00` → `2:30 PM`. Input that is not a time comes back as is.
pub fn format_time(raw: &str) -> String {
    match parse_time(raw.trim()) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// A single date when both ends fall on the same day.
pub fn date_range(start: &str, end: &str) -> String {
    let start = format_date(start);
    let end = format_date(end);

    if end.is_empty() || start == end {
        start
    } else {
        format!("{start} - {end}")
    }
}

pub fn time_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{} - {}", format_time(start), format_time(end))),
        (Some(start), None) => Some(format_time(start)),
        (None, Some(end)) => Some(format!("Until {}", format_time(end))),
        (None, None) => None,
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|datetime| datetime.date())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

/// Event as shown in a list row or details screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCard {
    pub id: i64,
    pub title: String,
    pub organization: String,
    pub dates: String,
    pub times: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
}

impl From<&Event> for EventCard {
    fn from(event: &Event) -> Self {
        let organization = event
            .organization
            .clone()
            .or_else(|| event.organization_id.map(|id| format!("Org #{id}")))
            .unwrap_or_default();

        Self {
            id: event.event_id,
            title: event.title.clone(),
            organization,
            dates: date_range(&event.start_date, &event.end_date),
            times: time_range(event.start_time.as_deref(), event.end_time.as_deref()),
            rating: event.rating,
            description: event.description.clone(),
        }
    }
}
