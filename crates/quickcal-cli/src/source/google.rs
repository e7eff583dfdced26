//! Google Calendar source over the v3 REST API.
//!
//! Authenticates with a bearer token supplied by configuration. Events are requested
//! with `singleEvents=true`, so recurring series arrive already expanded.

use std::time::Duration;

use async_trait::async_trait;
use quickcal_engine::{CalendarEvent, QueryWindow};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::wire::{CalendarListResponse, EventsResponse};
use super::{CalendarInfo, CalendarSource, SourceError};

/// Google Calendar data source
pub struct GoogleCalendarSource {
    client: Client,
    api_base: Url,
    access_token: String,
}

impl GoogleCalendarSource {
    pub fn new(api_base: &str, access_token: &str, timeout: Duration) -> Result<Self, SourceError> {
        let api_base =
            Url::parse(api_base).map_err(|_| SourceError::InvalidUrl(api_base.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base,
            access_token: access_token.to_string(),
        })
    }

    /// `api_base` with `segments` appended, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SourceError::Api { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CalendarSource for GoogleCalendarSource {
    async fn list_calendars(&self) -> Result<Vec<CalendarInfo>, SourceError> {
        let url = self.endpoint(&["users", "me", "calendarList"])?;
        let mut calendars = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = Vec::new();
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }

            let page: CalendarListResponse = self.get_json(url.clone(), &query).await?;
            for entry in page.items {
                calendars.push(entry.into_info());
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = calendars.len(), "listed calendars");
        Ok(calendars)
    }

    async fn fetch_events(
        &self,
        calendar: &CalendarInfo,
        window: &QueryWindow,
    ) -> Result<Vec<CalendarEvent>, SourceError> {
        let url = self.endpoint(&["calendars", calendar.id.as_str(), "events"])?;
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("timeMin", window.now.to_rfc3339()),
                ("timeMax", window.end.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ];
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }

            let page: EventsResponse = self.get_json(url.clone(), &query).await?;
            for item in page.items {
                events.extend(item.into_event(calendar.time_zone)?);
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(calendar_id = %calendar.id, count = events.len(), "fetched events");
        Ok(events)
    }
}
