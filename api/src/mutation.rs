use log::error;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use service::dto::{Event, ScoreRequest, ScoreResponse};
use service::error::GenericError;
use service::{RunOptions, RunOutcome};

use crate::error::Error;
use crate::AppState;

async fn run(
    state: &AppState,
    event: &Event,
    tourn_id: u32,
    options: &RunOptions,
) -> Result<RunOutcome, GenericError> {
    service::run_event(
        &state.config,
        event,
        tourn_id,
        state.provider.as_ref(),
        state.notifier.as_ref(),
        state.sheets.as_ref(),
        options,
    )
    .await
}

/// # Score an event
///
/// Fetches PDGA results for the event, posts the standings to Discord and,
/// for final results, writes the team totals to the season sheet.
///
/// # Parameters
///
/// - `event_name` - Schedule name of the event, or any name for an unscheduled one
///
/// - `tourn_id` - PDGA tournament id, required when the schedule has none
///
/// - `wait` - Score before responding. Otherwise the job runs in the background
///
/// # Returns
///
/// The resolved event and, when waiting, the report lines
///
/// # Errors
///
/// - `ScoreError::BadRequest` - No tournament id for the event
///
/// - `Error::ProviderUnavailable` - PDGA could not be reached (only when waiting)
#[openapi(tag = "Scoring")]
#[post("/score", format = "json", data = "<request>")]
pub(crate) async fn score(
    request: Json<ScoreRequest>,
    state: &State<AppState>,
) -> Result<Json<ScoreResponse>, Error> {
    let request = request.into_inner();
    let (event, tourn_id) = service::resolve_event(&state.config, &request.event_name, request.tourn_id)?;
    let options = RunOptions::from(&request);
    let mut response = ScoreResponse {
        event_name: event.name.clone(),
        tourn_id,
        mode: options.mode().to_string(),
        status: "accepted".to_string(),
        report: vec![],
    };

    if request.wait {
        match run(state.inner(), &event, tourn_id, &options).await? {
            RunOutcome::NoResults => response.status = "no scores returned".to_string(),
            RunOutcome::Scored { report, .. } => {
                response.status = "scored".to_string();
                response.report = report;
            }
        }
    } else {
        let state = state.inner().clone();
        tokio::spawn(async move {
            if let Err(e) = run(&state, &event, tourn_id, &options).await {
                error!("Scoring {} failed: {e}", event.name);
            }
        });
    }
    Ok(Json(response))
}
