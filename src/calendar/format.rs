use super::models::CalendarEvent;
use chrono::DateTime;

/// Placeholder summary for events Google returns without one
const UNTITLED: &str = "(no title)";

/// Render one event as a single display line.
/// Timed events get date, time and timezone; all-day events just the date;
/// events with no start at all get an explicit marker.
pub fn format_event(event: &CalendarEvent) -> String {
    let summary = event.summary.as_deref().unwrap_or(UNTITLED);

    if let Some(date_time) = &event.start_date_time {
        // date_time is a string in RFC3339 format
        match DateTime::parse_from_rfc3339(date_time) {
            Ok(parsed) => format!("{} {}", parsed.format("%Y-%m-%d %H:%M:%S %:z"), summary),
            Err(_) => format!("{} {}", date_time, summary),
        }
    } else if let Some(date) = &event.start_date {
        format!("{} {}", date, summary)
    } else {
        format!("No date - {}", summary)
    }
}

/// Drop the leading date token from a rendered line. Used for single-day
/// queries where the date is implied by the query itself; only lines that
/// start with a digit carry one.
pub fn strip_leading_date(line: &str) -> String {
    if line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        line.chars().skip(10).collect::<String>().trim_start().to_string()
    } else {
        line.to_string()
    }
}

/// Render a whole listing result as one message body. An empty result
/// becomes a single placeholder line, never an empty message.
pub fn render_listing(events: &[CalendarEvent], placeholder: &str, strip_dates: bool) -> String {
    if events.is_empty() {
        return placeholder.to_string();
    }
    events
        .iter()
        .map(|event| {
            let line = format_event(event);
            if strip_dates {
                strip_leading_date(&line)
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
