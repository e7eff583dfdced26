//! Calendar data sources.
//!
//! A source lists the calendars available to the caller and returns each calendar's
//! events for a query window, with every timestamp already normalized to an absolute
//! instant.

pub mod file;
pub mod google;
mod wire;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono_tz::Tz;
use quickcal_engine::{CalendarEvent, EngineError, QueryWindow};
use thiserror::Error;

use crate::config::{SourceConfig, SourceKind};

/// A calendar as reported by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInfo {
    pub id: String,
    pub name: String,
    /// Zone used for event timestamps that carry no offset.
    pub time_zone: Tz,
}

/// Errors raised while listing calendars or fetching events.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Calendar API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid API URL '{0}'")]
    InvalidUrl(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid calendar data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Missing source configuration: {0}")]
    MissingConfig(&'static str),
}

/// Trait for calendar data sources
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// List every calendar visible to the caller.
    async fn list_calendars(&self) -> Result<Vec<CalendarInfo>, SourceError>;

    /// Fetch the events of one calendar that overlap `window`.
    async fn fetch_events(
        &self,
        calendar: &CalendarInfo,
        window: &QueryWindow,
    ) -> Result<Vec<CalendarEvent>, SourceError>;
}

/// Create the source selected by `config`.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn CalendarSource>, SourceError> {
    match config.kind {
        SourceKind::Google => {
            let token = config
                .access_token
                .as_deref()
                .ok_or(SourceError::MissingConfig("source.access_token"))?;
            Ok(Box::new(google::GoogleCalendarSource::new(
                &config.api_base,
                token,
                Duration::from_secs(config.timeout_seconds),
            )?))
        }
        SourceKind::File => {
            let path = config
                .events_file
                .as_deref()
                .ok_or(SourceError::MissingConfig("source.events_file"))?;
            Ok(Box::new(file::SnapshotSource::from_path(path)?))
        }
    }
}
