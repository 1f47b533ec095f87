use super::models::CalendarEvent;
use super::window::EventWindow;
use crate::error::{google_api_error, BotResult};
use reqwest::Client;
use url::Url;

const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";

/// Client for the Google Calendar v3 events-list endpoint
#[derive(Debug, Clone, Default)]
pub struct CalendarClient {
    client: Client,
}

impl CalendarClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Issue exactly one listing request for the resolved window. Ordering is
    /// ascending by start time and recurring events arrive pre-expanded; a
    /// result truncated by the cap is surfaced as-is, never re-fetched.
    pub async fn list_events(
        &self,
        access_token: &str,
        window: &EventWindow,
    ) -> BotResult<Vec<CalendarEvent>> {
        let mut url = Url::parse(EVENTS_URL)
            .map_err(|e| google_api_error(&format!("Failed to parse URL: {}", e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("timeMin", &window.time_min);
            if let Some(time_max) = &window.time_max {
                query.append_pair("timeMax", time_max);
            }
            query.append_pair("maxResults", &window.max_results.to_string());
            query.append_pair("singleEvents", "true");
            query.append_pair("orderBy", "startTime");
        }

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_api_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: serde_json::Value = response.json().await?;

        // A calendar with nothing in the window has no "items" key at all
        let Some(items) = response_data.get("items").and_then(|i| i.as_array()) else {
            return Ok(Vec::new());
        };

        let events = items
            .iter()
            .map(|event| {
                let summary = event
                    .get("summary")
                    .and_then(|s| s.as_str())
                    .map(|s| s.to_string());

                let start_date_time = event
                    .get("start")
                    .and_then(|start| start.get("dateTime"))
                    .and_then(|dt| dt.as_str())
                    .map(|s| s.to_string());

                let start_date = event
                    .get("start")
                    .and_then(|start| start.get("date"))
                    .and_then(|d| d.as_str())
                    .map(|s| s.to_string());

                CalendarEvent {
                    summary,
                    start_date_time,
                    start_date,
                }
            })
            .collect();

        Ok(events)
    }
}
