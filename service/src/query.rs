use chrono::Datelike;
use log::info;

use crate::config::LeagueConfig;
use crate::dto::{Event, EventListing, ResultsProvider};
use crate::error::GenericError;

/// Scheduled events keep their type and special, anything else is scored as an
/// individual event. An explicit id wins over the scheduled one.
pub fn resolve_event(
    config: &LeagueConfig,
    event_name: &str,
    tourn_id: Option<u32>,
) -> Result<(Event, u32), GenericError> {
    let event = match config.event(event_name) {
        Some(event) => event.clone(),
        None => {
            info!("'{event_name}' is not on the schedule, scoring as individual event");
            Event::unscheduled(event_name.trim())
        }
    };
    let tourn_id = tourn_id
        .or(event.id)
        .ok_or(GenericError::BadRequest("No tournament ID provided"))?;
    Ok((event, tourn_id))
}

/// Searches the PDGA event list of `year`, the current year if not given.
pub async fn lookup_tournament(
    provider: &dyn ResultsProvider,
    name: &str,
    year: Option<i32>,
) -> Result<EventListing, GenericError> {
    if name.trim().is_empty() {
        return Err(GenericError::BadRequest("Event name is empty"));
    }
    let year = year.unwrap_or_else(|| chrono::Local::now().year());
    provider
        .lookup_tournament_id(name.trim(), year)
        .await?
        .ok_or(GenericError::NotFound("No tournament matches that name"))
}

pub const HELP_TEXT: &str = "\
**Fantasy Disc Golf Scorer**

`POST /api/score` with `event_name` and optionally:
- `tourn_id`: PDGA tournament id, required for events without one on the schedule
- `round`: round for live scores, defaults to the round in progress
- `final`: score the last completed round and update the season sheet
- `skip_discord`, `skip_sheets`: do not publish

`GET /api/schedule` lists the season, `GET /api/lookup?name=&year=` finds a PDGA id.";
