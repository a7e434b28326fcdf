use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use service::dto::{Event, EventListing};

use crate::error::Error;
use crate::AppState;

/// # Usage
#[openapi(tag = "Scoring")]
#[get("/score-help")]
pub(crate) async fn score_help() -> &'static str {
    service::HELP_TEXT
}

/// # Season schedule
///
/// Events in schedule order with their PDGA id, type and special.
#[openapi(tag = "Schedule")]
#[get("/schedule")]
pub(crate) async fn schedule(state: &State<AppState>) -> Json<Vec<Event>> {
    Json(state.config.schedule.clone())
}

/// # Find a PDGA tournament id
///
/// First ES, NT or Major event of `year` whose name contains `name`.
/// `year` defaults to the current year.
#[openapi(tag = "Schedule")]
#[get("/lookup?<name>&<year>")]
pub(crate) async fn lookup(
    name: String,
    year: Option<i32>,
    state: &State<AppState>,
) -> Result<Json<EventListing>, Error> {
    let listing = service::lookup_tournament(state.provider.as_ref(), &name, year).await?;
    Ok(Json(listing))
}
