use calbot::bot::args;
use calbot::calendar::format::render_listing;
use calbot::calendar::{CalendarEvent, EventWindow, MAX_EVENTS};
use calbot::error::BotResult;
use chrono::{NaiveDate, Utc};

/// Mock lister standing in for the Google Calendar endpoint
#[derive(Debug, Clone, Default)]
struct MockCalendarClient {
    events: Vec<CalendarEvent>,
}

impl MockCalendarClient {
    fn new() -> Self {
        let events = vec![
            CalendarEvent {
                summary: Some("Test Event 1".to_string()),
                start_date_time: Some("2023-01-01T10:00:00+02:00".to_string()),
                start_date: None,
            },
            CalendarEvent {
                summary: Some("Test Event 2".to_string()),
                start_date_time: None,
                start_date: Some("2023-01-02".to_string()),
            },
        ];
        Self { events }
    }

    /// Return at most `max_results` events, the way the real endpoint caps
    async fn list_events(&self, window: &EventWindow) -> BotResult<Vec<CalendarEvent>> {
        Ok(self
            .events
            .iter()
            .take(window.max_results as usize)
            .cloned()
            .collect())
    }
}

/// Blank argument to the count-style commands resolves to the full window cap
#[tokio::test]
async fn test_blank_count_requests_maximum() {
    let count = args::parse_count("").unwrap();
    assert_eq!(count, MAX_EVENTS);

    let window = EventWindow::upcoming(Utc::now(), count);
    assert_eq!(window.max_results, 100);
}

/// End-to-end shape of a /near style query against the mock lister
#[tokio::test]
async fn test_upcoming_flow_renders_each_event() {
    let client = MockCalendarClient::new();
    let count = args::parse_count("5").unwrap();

    let window = EventWindow::upcoming(Utc::now(), count);
    let events = client.list_events(&window).await.unwrap();

    let body = render_listing(&events, "No upcoming events found.", false);
    assert_eq!(
        body,
        "2023-01-01 10:00:00 +02:00 Test Event 1\n2023-01-02 Test Event 2"
    );
}

/// The cap requested by the user truncates the listing
#[tokio::test]
async fn test_count_caps_results() {
    let client = MockCalendarClient::new();
    let window = EventWindow::upcoming(Utc::now(), args::parse_count("1").unwrap());

    let events = client.list_events(&window).await.unwrap();
    assert_eq!(events.len(), 1);
}

/// An empty listing becomes exactly one placeholder line
#[tokio::test]
async fn test_empty_listing_renders_placeholder() {
    let client = MockCalendarClient::default();
    let window = EventWindow::upcoming(Utc::now(), MAX_EVENTS);

    let events = client.list_events(&window).await.unwrap();
    let body = render_listing(&events, "No upcoming events found.", false);
    assert_eq!(body, "No upcoming events found.");
}

/// A /period style query resolved from the raw argument text
#[tokio::test]
async fn test_period_flow_resolves_window_from_argument() {
    let (start, end) = args::parse_date_pair("2023-01-01 - 2023-01-10").unwrap();
    let window = EventWindow::date_pair(start, end);

    assert_eq!(window.time_min, "2023-01-01T00:00:00.00000Z");
    assert_eq!(window.time_max.as_deref(), Some("2023-01-10T00:00:00.00000Z"));

    let client = MockCalendarClient::new();
    let events = client.list_events(&window).await.unwrap();
    assert_eq!(events.len(), 2);
}

/// A /day query with a blank argument matches the literal-today query
#[tokio::test]
async fn test_day_blank_argument_equals_today() {
    let today = Utc::now().date_naive();
    let blank = args::parse_single_date("", today).unwrap();
    let literal = args::parse_single_date(&today.format("%Y-%m-%d").to_string(), today).unwrap();
    assert_eq!(blank, literal);
    assert_eq!(EventWindow::single_day(blank), EventWindow::single_day(literal));
}

/// Day-mode rendering drops the date the query already implies
#[tokio::test]
async fn test_day_flow_strips_leading_dates() {
    let client = MockCalendarClient::new();
    let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let window = EventWindow::single_day(date);

    let events = client.list_events(&window).await.unwrap();
    let body = render_listing(&events, "No events found.", true);
    assert_eq!(body, "10:00:00 +02:00 Test Event 1\nTest Event 2");
}
