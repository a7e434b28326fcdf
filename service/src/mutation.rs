use chrono::Local;
use log::{error, info, warn};

use crate::config::LeagueConfig;
use crate::dto::{Division, Event, ResultsByDivision, ResultsProvider, ScoreRequest};
use crate::error::GenericError;
use crate::notify::{Notifier, NotifyOutcome};
use crate::report;
use crate::scoring::{score_event, FuzzyMatch, Standings};
use crate::sheets::{SheetOutcome, SheetSink};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Round for a live run, the latest round with scores when unset
    pub round: Option<u8>,
    pub final_results: bool,
    pub post_discord: bool,
    pub update_sheets: bool,
}

impl RunOptions {
    pub fn mode(&self) -> &'static str {
        if self.final_results {
            "final"
        } else {
            "live"
        }
    }
}

impl From<&ScoreRequest> for RunOptions {
    fn from(request: &ScoreRequest) -> Self {
        Self {
            round: request.round,
            final_results: request.final_results,
            post_discord: !request.skip_discord,
            update_sheets: !request.skip_sheets,
        }
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Neither division returned any scores, nothing was published
    NoResults,
    Scored {
        standings: Standings,
        report: Vec<String>,
        posted: bool,
        sheet_row_updated: Option<usize>,
    },
}

async fn fetch_results(
    provider: &dyn ResultsProvider,
    tourn_id: u32,
    options: &RunOptions,
) -> Result<ResultsByDivision, GenericError> {
    let mut results = ResultsByDivision::new();
    for division in Division::ALL {
        let scores = if options.final_results {
            provider.fetch_final(tourn_id, division).await?
        } else {
            match options.round {
                Some(round) => provider.fetch_round(tourn_id, division, round).await?,
                None => provider.fetch_latest(tourn_id, division).await?,
            }
        };
        results.insert(division, scores);
    }
    Ok(results)
}

/// Fetches, scores and publishes one event. Publishing failures are logged and
/// do not fail the run.
pub async fn run_event(
    config: &LeagueConfig,
    event: &Event,
    tourn_id: u32,
    provider: &dyn ResultsProvider,
    notifier: &dyn Notifier,
    sheets: &dyn SheetSink,
    options: &RunOptions,
) -> Result<RunOutcome, GenericError> {
    info!(
        "Fetching {} results for {} (TournID {tourn_id})",
        options.mode(),
        event.name
    );
    let results = fetch_results(provider, tourn_id, options).await?;
    let count = |division: Division| results.get(&division).map(Vec::len).unwrap_or(0);
    info!("MPO: {} players, FPO: {} players", count(Division::MPO), count(Division::FPO));

    if results.values().all(Vec::is_empty) {
        warn!("No scores returned for {} (TournID {tourn_id})", event.name);
        return Ok(RunOutcome::NoResults);
    }

    let standings = score_event(config, event, &results, !options.final_results, &FuzzyMatch);
    for line in report::terminal_summary(&standings) {
        info!("{line}");
    }

    let lines = report::build_report(&standings, Local::now().naive_local());
    let mut posted = false;
    if options.post_discord {
        match notifier.post(&report::render(&lines)).await {
            Ok(outcome) => posted = outcome == NotifyOutcome::Posted,
            Err(e) => error!("Discord post failed: {e}"),
        }
    }

    let mut sheet_row_updated = None;
    if options.update_sheets && options.final_results {
        match sheets
            .update_event_row(&event.name, &report::sheet_row(&standings))
            .await
        {
            Ok(SheetOutcome::Updated { row, .. }) => sheet_row_updated = Some(row),
            Ok(SheetOutcome::Skipped(reason)) => info!("Sheets update skipped: {reason}"),
            Err(e) => error!("Sheets update failed: {e}"),
        }
    }

    Ok(RunOutcome::Scored {
        standings,
        report: lines,
        posted,
        sheet_row_updated,
    })
}
