/// Simplified calendar event representation
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    /// RFC 3339 start for timed events
    pub start_date_time: Option<String>,
    /// YYYY-MM-DD start for all-day events
    pub start_date: Option<String>,
}
