//! Fetch every calendar's events for a query window.
//!
//! Calendars are independent, so their events are fetched concurrently and gathered
//! back in the order the source listed them.

use futures::future::join_all;
use quickcal_engine::{CalendarEvents, FailedCalendar, QueryWindow};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::FetchPolicy;
use crate::source::{CalendarInfo, CalendarSource, SourceError};

/// Errors that end a fetch run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to list calendars: {0}")]
    List(#[source] SourceError),

    #[error("Failed to fetch calendar '{calendar_id}': {source}")]
    Calendar {
        calendar_id: String,
        #[source]
        source: SourceError,
    },
}

/// Events for every calendar that was fetched, plus the ones that were skipped.
#[derive(Debug, Default)]
pub struct FetchedCalendars {
    pub calendars: Vec<CalendarEvents>,
    pub failed: Vec<FailedCalendar>,
}

/// Fetch the events of every calendar (or only those in `only`, if non-empty).
///
/// A failure to list calendars always ends the run. A failure on one calendar ends
/// the run under [`FetchPolicy::Abort`]; under [`FetchPolicy::Skip`] it is logged and
/// recorded in [`FetchedCalendars::failed`].
pub async fn fetch_all(
    source: &dyn CalendarSource,
    window: &QueryWindow,
    only: &[String],
    policy: FetchPolicy,
) -> Result<FetchedCalendars, FetchError> {
    let listed = source.list_calendars().await.map_err(FetchError::List)?;
    let calendars = select_calendars(listed, only);
    info!(count = calendars.len(), "fetching calendars");

    let results = join_all(calendars.iter().map(|calendar| async move {
        (calendar, source.fetch_events(calendar, window).await)
    }))
    .await;

    let mut fetched = FetchedCalendars::default();
    for (calendar, result) in results {
        match result {
            Ok(events) => fetched.calendars.push(CalendarEvents {
                calendar_id: calendar.id.clone(),
                name: calendar.name.clone(),
                events,
            }),
            Err(source) => match policy {
                FetchPolicy::Abort => {
                    return Err(FetchError::Calendar {
                        calendar_id: calendar.id.clone(),
                        source,
                    })
                }
                FetchPolicy::Skip => {
                    warn!(calendar_id = %calendar.id, error = %source, "skipping calendar");
                    fetched.failed.push(FailedCalendar {
                        calendar_id: calendar.id.clone(),
                        error: source.to_string(),
                    });
                }
            },
        }
    }

    Ok(fetched)
}

/// Keep the calendars named in `only`, in listing order. An empty filter keeps all.
fn select_calendars(listed: Vec<CalendarInfo>, only: &[String]) -> Vec<CalendarInfo> {
    if only.is_empty() {
        return listed;
    }

    for id in only {
        if !listed.iter().any(|calendar| &calendar.id == id) {
            warn!(calendar_id = %id, "requested calendar not found");
        }
    }

    listed
        .into_iter()
        .filter(|calendar| only.contains(&calendar.id))
        .collect()
}
